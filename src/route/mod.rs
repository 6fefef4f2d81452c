// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Lee routing: wavefront expansion, backtrace, and the lay step, run per route as one
//! optimistic transaction against the shared congestion grid.

pub mod backtrace;
pub mod expand;
pub mod lay;
pub mod solver;


pub use backtrace::{backtrace, BrokenField};
pub use expand::{expand, CostField, Unreachable, SOURCE_COST};
pub use lay::lay;
pub use solver::{
    parallel_for, solve_board, CongestionSnapshot, Router, SolveBoardError, SolveStats, Solution,
    StuckError,
};
