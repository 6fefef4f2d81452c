// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark boards (no RNG).

use leeway::model::{Board, Point};
use leeway::route::Solution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardParams {
    /// Width and height of the square board.
    pub size: usize,
    pub routes: usize,
    /// Distance between the 2x2 obstruction blocks sprinkled over the interior; 0 for none.
    pub block_stride: usize,
}

impl BoardParams {
    pub const fn new(size: usize, routes: usize, block_stride: usize) -> Self {
        Self { size, routes, block_stride }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumBlocked,
    LargeCrossing,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Small, Case::MediumBlocked, Case::LargeCrossing];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumBlocked => "medium_blocked",
            Self::LargeCrossing => "large_crossing",
        }
    }

    pub const fn params(self) -> BoardParams {
        match self {
            Self::Small => BoardParams::new(32, 12, 0),
            Self::MediumBlocked => BoardParams::new(64, 40, 7),
            Self::LargeCrossing => BoardParams::new(128, 96, 11),
        }
    }
}

fn point(x: usize, y: usize) -> Point {
    Point::new(x as i32, y as i32)
}

/// Deterministic crossing board.
///
/// - Route `i` joins row `r_i` on the left edge to row `r_(n-1-i)` on the right edge, so every
///   pair of routes has to cross somewhere.
/// - Obstruction blocks stay clear of the two outermost columns on each side, so every pad keeps
///   a free neighbour and no route can get stuck.
pub fn board(params: BoardParams) -> Board {
    assert!(params.size >= 8, "size must be >= 8");
    assert!(params.routes >= 1, "routes must be >= 1");
    assert!(params.routes <= params.size - 2, "at most one route per interior row");

    let last = params.size - 1;
    let mut builder = Board::builder(params.size, params.size).expect("board size");

    if params.block_stride > 0 {
        let mut y = 2;
        while y + 1 < last {
            let mut x = 3;
            while x + 1 < last - 2 {
                builder.obstruct_rect(point(x, y), point(x + 1, y + 1)).expect("block in bounds");
                x += params.block_stride;
            }
            y += params.block_stride;
        }
    }

    let rows = (0..params.routes)
        .map(|i| 1 + i * (params.size - 2) / params.routes)
        .collect::<Vec<_>>();
    for (i, &row) in rows.iter().enumerate() {
        let target = rows[params.routes - 1 - i];
        builder.route(point(0, row), point(last, target)).expect("route in bounds");
    }

    builder.build().expect("bench board").normalized()
}

pub fn fixture(case: Case) -> Board {
    board(case.params())
}

/// Order-independent digest of every solved path.
pub fn checksum_solution(solution: &Solution) -> u64 {
    let mut acc = 0u64;
    for (route, path) in solution.paths() {
        acc = acc.wrapping_add(u64::from(route.manhattan()));
        for point in path {
            acc = acc.wrapping_mul(31).wrapping_add(point.x().unsigned_abs() as u64);
            acc = acc.wrapping_mul(31).wrapping_add(point.y().unsigned_abs() as u64);
        }
    }
    acc
}
