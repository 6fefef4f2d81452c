// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;

use super::backtrace::backtrace;
use super::expand::{expand, Unreachable};
use super::lay::lay;
use crate::config::{ConfigError, RouterConfig, ValidatedConfig};
use crate::model::{Board, GridIndex, Point, Route};
use crate::stm::{run_transaction, CellArena, RetryStrategy, TxnError, TxnReport};

/// A route whose wavefront cannot reach its destination.
///
/// Obstructions alone decide reachability, so retrying never helps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StuckError {
    pub route_index: usize,
    pub route: Route,
    pub rounds: usize,
    pub visited: usize,
}

impl fmt::Display for StuckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "route #{} {} is stuck after {} expansion rounds ({} cells reached)",
            self.route_index, self.route, self.rounds, self.visited
        )
    }
}

impl std::error::Error for StuckError {}

/// Aggregate counters for one board solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SolveStats {
    pub routes: usize,
    pub par_limit: usize,
    /// Transaction attempts, committed ones included.
    pub attempts: u64,
    pub conflicts: u64,
    /// Increments laid through tickets (every path cell except the source).
    pub ticket_writes: u64,
    /// Sum of path lengths (cells, endpoints included).
    pub path_cells: u64,
    #[serde(serialize_with = "serialize_micros")]
    pub elapsed: Duration,
}

fn serialize_micros<S: serde::Serializer>(
    value: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(value.as_micros()).unwrap_or(u64::MAX))
}

#[derive(Debug, Clone, Serialize)]
struct SolvedRouteRecord<'a> {
    source: Point,
    destination: Point,
    path: &'a [Point],
}

/// Route to path mapping for a fully solved board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    paths: BTreeMap<Route, Vec<Point>>,
    stats: SolveStats,
}

impl Solution {
    pub fn paths(&self) -> &BTreeMap<Route, Vec<Point>> {
        &self.paths
    }

    pub fn path(&self, route: &Route) -> Option<&[Point]> {
        self.paths.get(route).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    pub fn into_paths(self) -> BTreeMap<Route, Vec<Point>> {
        self.paths
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let routes = self
            .paths
            .iter()
            .map(|(route, path)| SolvedRouteRecord {
                source: route.source(),
                destination: route.destination(),
                path,
            })
            .collect::<Vec<_>>();
        serde_json::to_string_pretty(&serde_json::json!({
            "routes": routes,
            "stats": self.stats,
        }))
    }
}

/// Committed congestion depths, copied out when a solve finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CongestionSnapshot {
    grid: GridIndex,
    depths: Vec<u32>,
}

impl CongestionSnapshot {
    pub fn grid(&self) -> GridIndex {
        self.grid
    }

    pub fn depth(&self, point: Point) -> Option<u32> {
        self.grid.idx_of(point).map(|idx| self.depths[idx])
    }

    pub fn depths(&self) -> &[u32] {
        &self.depths
    }

    pub fn total(&self) -> u64 {
        self.depths.iter().map(|&depth| u64::from(depth)).sum()
    }
}

/// Bounded-concurrency map over `items`, returning results in item order.
///
/// Without a pool the items run one after another on the calling thread. The first error
/// wins; no partial result is returned.
pub fn parallel_for<T, R, E>(
    pool: Option<&rayon::ThreadPool>,
    items: &[T],
    f: impl Fn(usize, &T) -> Result<R, E> + Sync + Send,
) -> Result<Vec<R>, E>
where
    T: Sync,
    R: Send,
    E: Send,
{
    match pool {
        None => items.iter().enumerate().map(|(idx, item)| f(idx, item)).collect(),
        Some(pool) => pool.install(|| {
            items.par_iter().enumerate().map(|(idx, item)| f(idx, item)).collect()
        }),
    }
}

#[derive(Debug)]
struct RouteOutcome {
    route: Route,
    path: Vec<Point>,
    report: TxnReport,
}

/// Solves whole boards: one optimistic transaction per route, at most `par_limit` at a time.
#[derive(Debug)]
pub struct Router {
    par_limit: usize,
    retry: RetryStrategy,
    pool: Option<rayon::ThreadPool>,
}

impl Router {
    pub fn new(config: &RouterConfig) -> Result<Self, ConfigError> {
        Self::from_validated(config.validate()?)
    }

    pub fn from_validated(config: ValidatedConfig) -> Result<Self, ConfigError> {
        let par_limit = config.par_limit();
        let pool = if par_limit > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(par_limit)
                .thread_name(|idx| format!("leeway-route-{idx}"))
                .build()
                .map_err(|err| ConfigError::ThreadPool { message: err.to_string() })?;
            Some(pool)
        } else {
            None
        };
        Ok(Self { par_limit, retry: config.retry(), pool })
    }

    pub fn par_limit(&self) -> usize {
        self.par_limit
    }

    pub fn retry(&self) -> RetryStrategy {
        self.retry
    }

    /// Concurrency actually used for `routes` routes: `par_limit` clamped to `[1, routes]`.
    pub fn effective_par_limit(&self, routes: usize) -> usize {
        self.par_limit.min(routes).max(1)
    }

    pub fn solve_board(&self, board: &Board) -> Result<Solution, StuckError> {
        self.solve_board_with_grid(board).map(|(solution, _)| solution)
    }

    /// Like [`Router::solve_board`], also returning the final congestion depths.
    pub fn solve_board_with_grid(
        &self,
        board: &Board,
    ) -> Result<(Solution, CongestionSnapshot), StuckError> {
        let started = Instant::now();
        let routes = board.routes();
        let par_limit = self.effective_par_limit(routes.len());
        log::info!(
            "solving {} routes on a {}x{} board (par_limit {par_limit})",
            routes.len(),
            board.width(),
            board.height()
        );

        let depth = CellArena::new(board.grid().len());
        let pool = if par_limit > 1 { self.pool.as_ref() } else { None };
        let outcomes = parallel_for(pool, routes, |route_index, route| {
            solve_route(board, &depth, self.retry, route_index, route)
        })
        .map_err(|err| {
            log::error!("{err}");
            err
        })?;

        let mut stats = SolveStats { routes: routes.len(), par_limit, ..SolveStats::default() };
        let mut paths = BTreeMap::new();
        for outcome in outcomes {
            stats.attempts += u64::from(outcome.report.attempts);
            stats.conflicts += u64::from(outcome.report.conflicts);
            stats.ticket_writes += outcome.report.ticket_writes as u64;
            stats.path_cells += outcome.path.len() as u64;
            paths.insert(outcome.route, outcome.path);
        }
        stats.elapsed = started.elapsed();

        log::info!(
            "solved {} routes in {:?}: {} attempts, {} conflicts, {} path cells",
            stats.routes,
            stats.elapsed,
            stats.attempts,
            stats.conflicts,
            stats.path_cells
        );

        let snapshot = CongestionSnapshot { grid: board.grid(), depths: depth.snapshot() };
        Ok((Solution { paths, stats }, snapshot))
    }
}

/// Expansion, backtrace and lay for one route, as a single retried transaction.
fn solve_route(
    board: &Board,
    depth: &CellArena,
    retry: RetryStrategy,
    route_index: usize,
    route: &Route,
) -> Result<RouteOutcome, StuckError> {
    let (path, report) = run_transaction(depth, retry, |txn| {
        let field = expand(board, route, txn).map_err(|Unreachable { rounds, visited }| {
            TxnError::Abort(StuckError { route_index, route: *route, rounds, visited })
        })?;

        // A broken field means the expansion itself is wrong; retrying would not help.
        let path = backtrace(board, &field, route)
            .unwrap_or_else(|err| panic!("wavefront invariant violated: {err}"));
        lay(txn, board, &field, route, &path)
            .unwrap_or_else(|err| panic!("wavefront invariant violated: {err}"));
        Ok(path)
    })?;

    log::debug!(
        "route #{route_index} {route} committed: {} cells, {} attempts",
        path.len(),
        report.attempts
    );
    Ok(RouteOutcome { route: *route, path, report })
}

/// Solves `board` with a router built from `config`.
pub fn solve_board(board: &Board, config: &RouterConfig) -> Result<Solution, SolveBoardError> {
    let router = Router::new(config).map_err(SolveBoardError::Config)?;
    router.solve_board(board).map_err(SolveBoardError::Stuck)
}

#[derive(Debug)]
pub enum SolveBoardError {
    Config(ConfigError),
    Stuck(StuckError),
}

impl fmt::Display for SolveBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Stuck(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SolveBoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Stuck(err) => Some(err),
        }
    }
}
