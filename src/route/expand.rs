// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wavefront expansion.
//!
//! Builds a per-attempt cost field from the route source outwards. Each round expands the
//! whole frontier; a neighbour joins the next frontier whenever its cost improves. Expansion
//! stops as soon as the destination cost is no larger than the cheapest point of the new
//! frontier, since frontier costs only grow from there.

use crate::model::{Board, GridIndex, Point, Route};
use crate::stm::{Ticket, Txn};

/// Cost of the source cell. Zero is reserved for "unvisited".
pub const SOURCE_COST: u64 = 1;

/// Per-attempt costs plus the ticket behind each cell's current cost.
///
/// Never shared between attempts; a retry starts from a fresh field.
#[derive(Debug, Clone)]
pub struct CostField {
    grid: GridIndex,
    costs: Vec<u64>,
    tickets: Vec<Option<Ticket>>,
    rounds: usize,
}

impl CostField {
    fn new(grid: GridIndex) -> Self {
        Self { grid, costs: vec![0; grid.len()], tickets: vec![None; grid.len()], rounds: 0 }
    }

    pub fn grid(&self) -> GridIndex {
        self.grid
    }

    /// `0` means unvisited.
    #[inline(always)]
    pub fn cost(&self, idx: usize) -> u64 {
        self.costs[idx]
    }

    pub fn cost_at(&self, point: Point) -> Option<u64> {
        self.grid.idx_of(point).map(|idx| self.costs[idx])
    }

    pub fn costs(&self) -> &[u64] {
        &self.costs
    }

    /// The ticket taken when `idx` last improved (last write wins). The source has none.
    pub fn ticket(&self, idx: usize) -> Option<Ticket> {
        self.tickets[idx]
    }

    pub fn visited(&self) -> usize {
        self.costs.iter().filter(|&&cost| cost != 0).count()
    }

    /// Expansion rounds it took to build this field.
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

/// The frontier emptied before the destination was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unreachable {
    pub rounds: usize,
    pub visited: usize,
}

/// Expands `route` over `board`, reading congestion through tickets only.
pub fn expand(board: &Board, route: &Route, txn: &mut Txn<'_>) -> Result<CostField, Unreachable> {
    let grid = board.grid();
    let Some((source, destination)) = endpoint_indices(grid, route) else {
        return Err(Unreachable { rounds: 0, visited: 0 });
    };

    let mut field = CostField::new(grid);
    field.costs[source] = SOURCE_COST;

    // Round stamps dedupe the next frontier (same idea as a visit generation).
    let mut queued_round = vec![0usize; grid.len()];
    let mut front = vec![source];
    let mut next = Vec::<usize>::with_capacity(front.len() * 4);

    loop {
        field.rounds += 1;
        let round = field.rounds;
        next.clear();

        for &current in &front {
            // Pads are never routed through, the destination included.
            if current == destination {
                continue;
            }
            let current_cost = field.costs[current];
            for adjacent in board.adjacent_idx(current) {
                if adjacent != destination && board.is_obstructed_idx(adjacent) {
                    continue;
                }
                let (depth, ticket) = txn.ticket_read(adjacent);
                // Costs are simple-path sums; `BoardBuilder::build` keeps one step past any of
                // them below u64::MAX.
                let candidate = current_cost.saturating_add(board.cost(depth));
                let existing = field.costs[adjacent];
                if existing != 0 && candidate >= existing {
                    continue;
                }
                field.costs[adjacent] = candidate;
                field.tickets[adjacent] = Some(ticket);
                if queued_round[adjacent] != round {
                    queued_round[adjacent] = round;
                    next.push(adjacent);
                }
            }
        }

        let destination_cost = field.costs[destination];
        if next.is_empty() {
            if destination_cost != 0 {
                return Ok(field);
            }
            return Err(Unreachable { rounds: field.rounds, visited: field.visited() });
        }

        if destination_cost != 0 {
            let frontier_min = next.iter().map(|&idx| field.costs[idx]).min().unwrap_or(u64::MAX);
            if destination_cost <= frontier_min {
                return Ok(field);
            }
        }

        std::mem::swap(&mut front, &mut next);
    }
}

pub(crate) fn endpoint_indices(grid: GridIndex, route: &Route) -> Option<(usize, usize)> {
    Some((grid.idx_of(route.source())?, grid.idx_of(route.destination())?))
}
