// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Direction, GridIndex, Point};

/// A connection to lay: `a` is the source, `b` the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Route {
    a: Point,
    b: Point,
}

impl Route {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    pub fn source(&self) -> Point {
        self.a
    }

    pub fn destination(&self) -> Point {
        self.b
    }

    pub fn manhattan(&self) -> u32 {
        self.a.manhattan(self.b)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.a, self.b)
    }
}

/// Cost of entering a cell: `step + congestion * depth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostModel {
    step: u32,
    congestion: u32,
}

impl CostModel {
    pub fn new(step: u32, congestion: u32) -> Result<Self, BoardError> {
        if step == 0 {
            return Err(BoardError::ZeroStepCost);
        }
        Ok(Self { step, congestion })
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn congestion(&self) -> u32 {
        self.congestion
    }

    /// Always at least `step >= 1`, so cost fields strictly increase away from the source.
    ///
    /// Widened to `u64`; two `u32` factors plus a `u32` term cannot overflow it.
    #[inline(always)]
    pub fn cost(&self, depth: u32) -> u64 {
        u64::from(self.step) + u64::from(self.congestion) * u64::from(depth)
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self { step: 1, congestion: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    EmptyGrid { width: usize, height: usize },
    AreaOverflow { width: usize, height: usize },
    OutOfBounds { point: Point, width: usize, height: usize },
    DegenerateRoute { point: Point },
    ZeroStepCost,
    CostOverflow { cells: usize, routes: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => write!(f, "board has no cells: {width}x{height}"),
            Self::AreaOverflow { width, height } => {
                write!(f, "board area overflow: {width}*{height}")
            }
            Self::OutOfBounds { point, width, height } => {
                write!(f, "point {point} is outside the {width}x{height} board")
            }
            Self::DegenerateRoute { point } => {
                write!(f, "route starts and ends at the same point {point}")
            }
            Self::ZeroStepCost => write!(f, "cost model step must be at least 1"),
            Self::CostOverflow { cells, routes } => write!(
                f,
                "path costs over {cells} cells with {routes} routes overflow the cost model"
            ),
        }
    }
}

impl std::error::Error for BoardError {}

/// Immutable board geometry plus the routes to lay on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: GridIndex,
    obstructed: Vec<bool>,
    pads: Vec<bool>,
    cost_model: CostModel,
    routes: Vec<Route>,
}

impl Board {
    pub fn builder(width: usize, height: usize) -> Result<BoardBuilder, BoardError> {
        BoardBuilder::new(width, height)
    }

    pub fn grid(&self) -> GridIndex {
        self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn cost_model(&self) -> CostModel {
        self.cost_model
    }

    #[inline(always)]
    pub fn cost(&self, depth: u32) -> u64 {
        self.cost_model.cost(depth)
    }

    /// Points outside the board count as obstructed.
    pub fn is_obstructed(&self, point: Point) -> bool {
        self.grid.idx_of(point).map_or(true, |idx| self.obstructed[idx])
    }

    #[inline(always)]
    pub(crate) fn is_obstructed_idx(&self, idx: usize) -> bool {
        self.obstructed[idx]
    }

    pub fn is_pad(&self, point: Point) -> bool {
        self.grid.idx_of(point).is_some_and(|idx| self.pads[idx])
    }

    /// In-bounds orthogonal neighbours in [`Direction::ALL`] order.
    pub fn adjacent(&self, point: Point) -> SmallVec<[Point; 4]> {
        Direction::ALL
            .iter()
            .map(|&direction| point.step(direction))
            .filter(|&next| self.grid.contains(next))
            .collect()
    }

    /// Index form of [`Board::adjacent`]; same enumeration order.
    #[inline]
    pub(crate) fn adjacent_idx(&self, idx: usize) -> SmallVec<[usize; 4]> {
        let width = self.grid.width();
        let height = self.grid.height();
        let (x, y) = (idx % width, idx / width);

        let mut out = SmallVec::new();
        for direction in Direction::ALL {
            match direction {
                Direction::North if y > 0 => out.push(idx - width),
                Direction::East if x + 1 < width => out.push(idx + 1),
                Direction::South if y + 1 < height => out.push(idx + width),
                Direction::West if x > 0 => out.push(idx - 1),
                _ => {}
            }
        }
        out
    }

    /// Reorders routes shortest-first (ties by endpoints) so cheap routes are laid early.
    pub fn normalized(mut self) -> Self {
        self.routes.sort_by(|a, b| a.manhattan().cmp(&b.manhattan()).then_with(|| a.cmp(b)));
        self
    }
}

/// Incremental [`Board`] construction with bounds checking.
#[derive(Debug, Clone)]
pub struct BoardBuilder {
    grid: GridIndex,
    obstructed: Vec<bool>,
    pads: Vec<bool>,
    cost_model: CostModel,
    routes: Vec<Route>,
}

impl BoardBuilder {
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::EmptyGrid { width, height });
        }
        if width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(BoardError::AreaOverflow { width, height });
        }
        let grid =
            GridIndex::new(width, height).ok_or(BoardError::AreaOverflow { width, height })?;
        Ok(Self {
            grid,
            obstructed: vec![false; grid.len()],
            pads: vec![false; grid.len()],
            cost_model: CostModel::default(),
            routes: Vec::new(),
        })
    }

    fn idx_checked(&self, point: Point) -> Result<usize, BoardError> {
        self.grid.idx_of(point).ok_or(BoardError::OutOfBounds {
            point,
            width: self.grid.width(),
            height: self.grid.height(),
        })
    }

    pub fn cost_model(&mut self, cost_model: CostModel) -> &mut Self {
        self.cost_model = cost_model;
        self
    }

    /// Obstructs the inclusive rectangle spanned by two corners (in any order).
    pub fn obstruct_rect(
        &mut self,
        corner0: Point,
        corner1: Point,
    ) -> Result<&mut Self, BoardError> {
        self.idx_checked(corner0)?;
        self.idx_checked(corner1)?;
        let (x0, x1) = (corner0.x().min(corner1.x()), corner0.x().max(corner1.x()));
        let (y0, y1) = (corner0.y().min(corner1.y()), corner0.y().max(corner1.y()));
        for y in y0..=y1 {
            for x in x0..=x1 {
                let idx = self.idx_checked(Point::new(x, y))?;
                self.obstructed[idx] = true;
            }
        }
        Ok(self)
    }

    pub fn pad(&mut self, point: Point) -> Result<&mut Self, BoardError> {
        let idx = self.idx_checked(point)?;
        self.obstructed[idx] = true;
        self.pads[idx] = true;
        Ok(self)
    }

    /// Adds a route; both endpoints become pads so other routes cannot cross them.
    pub fn route(&mut self, a: Point, b: Point) -> Result<&mut Self, BoardError> {
        if a == b {
            return Err(BoardError::DegenerateRoute { point: a });
        }
        self.pad(a)?;
        self.pad(b)?;
        self.routes.push(Route::new(a, b));
        Ok(self)
    }

    /// Upper bound on any expansion candidate: a simple path through every cell plus one more
    /// step, each at the deepest possible congestion (one layer per route), plus the source.
    fn max_path_cost(&self) -> Option<u64> {
        let max_depth = u32::try_from(self.routes.len()).ok()?;
        let cells = u64::try_from(self.grid.len()).ok()?;
        cells.checked_mul(self.cost_model.cost(max_depth))?.checked_add(1)
    }

    pub fn build(&self) -> Result<Board, BoardError> {
        if self.max_path_cost().is_none() {
            return Err(BoardError::CostOverflow {
                cells: self.grid.len(),
                routes: self.routes.len(),
            });
        }
        Ok(Board {
            grid: self.grid,
            obstructed: self.obstructed.clone(),
            pads: self.pads.clone(),
            cost_model: self.cost_model,
            routes: self.routes.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, BoardError, CostModel, Route};
    use crate::model::Point;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn rejects_empty_boards() {
        assert_eq!(
            Board::builder(0, 4).unwrap_err(),
            BoardError::EmptyGrid { width: 0, height: 4 }
        );
    }

    #[test]
    fn route_endpoints_become_pads() {
        let mut builder = Board::builder(5, 5).expect("builder");
        builder.route(p(0, 0), p(4, 4)).expect("route");
        let board = builder.build().expect("board");

        assert!(board.is_pad(p(0, 0)));
        assert!(board.is_obstructed(p(4, 4)));
        assert!(!board.is_obstructed(p(2, 2)));
        assert_eq!(board.routes(), &[Route::new(p(0, 0), p(4, 4))]);
    }

    #[test]
    fn rejects_out_of_bounds_and_degenerate_routes() {
        let mut builder = Board::builder(3, 3).expect("builder");
        assert_eq!(
            builder.route(p(0, 0), p(3, 0)).unwrap_err(),
            BoardError::OutOfBounds { point: p(3, 0), width: 3, height: 3 }
        );
        assert_eq!(
            builder.route(p(1, 1), p(1, 1)).unwrap_err(),
            BoardError::DegenerateRoute { point: p(1, 1) }
        );
    }

    #[test]
    fn obstruct_rect_accepts_corners_in_any_order() {
        let mut builder = Board::builder(4, 4).expect("builder");
        builder.obstruct_rect(p(2, 2), p(1, 1)).expect("rect");
        let board = builder.build().expect("board");
        for (x, y) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            assert!(board.is_obstructed(p(x, y)));
        }
        assert!(!board.is_obstructed(p(3, 3)));
        assert!(board.is_obstructed(p(-1, 0)));
    }

    #[test]
    fn adjacency_follows_direction_order_and_clips_edges() {
        let board = Board::builder(3, 3).expect("builder").build().expect("board");
        assert_eq!(board.adjacent(p(1, 1)).as_slice(), &[p(1, 0), p(2, 1), p(1, 2), p(0, 1)]);
        assert_eq!(board.adjacent(p(0, 0)).as_slice(), &[p(1, 0), p(0, 1)]);

        let grid = board.grid();
        for idx in 0..grid.len() {
            let by_point = board
                .adjacent(grid.point_of(idx))
                .into_iter()
                .map(|point| grid.idx_of(point).unwrap())
                .collect::<Vec<_>>();
            assert_eq!(board.adjacent_idx(idx).as_slice(), by_point.as_slice());
        }
    }

    #[test]
    fn normalized_orders_routes_shortest_first() {
        let mut builder = Board::builder(10, 10).expect("builder");
        builder.route(p(0, 0), p(9, 9)).unwrap();
        builder.route(p(5, 5), p(5, 7)).unwrap();
        builder.route(p(1, 1), p(1, 3)).unwrap();
        let board = builder.build().expect("board").normalized();

        assert_eq!(
            board.routes(),
            &[
                Route::new(p(1, 1), p(1, 3)),
                Route::new(p(5, 5), p(5, 7)),
                Route::new(p(0, 0), p(9, 9)),
            ]
        );
    }

    #[test]
    fn cost_grows_with_congestion() {
        let model = CostModel::new(2, 3).expect("model");
        assert_eq!(model.cost(0), 2);
        assert_eq!(model.cost(4), 14);
        assert_eq!(model.cost(u32::MAX), 2 + 3 * u64::from(u32::MAX));
        let extreme = CostModel::new(u32::MAX, u32::MAX).expect("model");
        assert_eq!(extreme.cost(u32::MAX), u64::from(u32::MAX) * (1 + u64::from(u32::MAX)));
        assert_eq!(CostModel::new(0, 1), Err(BoardError::ZeroStepCost));
    }

    #[test]
    fn rejects_cost_models_whose_paths_could_overflow() {
        let mut builder = Board::builder(1000, 1000).expect("builder");
        builder.cost_model(CostModel::new(1, u32::MAX).expect("model"));
        assert!(builder.build().is_ok(), "no routes means no congestion");

        for y in 0..10 {
            for x in (0..1000).step_by(2) {
                builder.route(p(x, y), p(x + 1, y)).expect("route");
            }
        }
        assert_eq!(
            builder.build().unwrap_err(),
            BoardError::CostOverflow { cells: 1_000_000, routes: 5000 }
        );

        builder.cost_model(CostModel::default());
        assert!(builder.build().is_ok());
    }
}
