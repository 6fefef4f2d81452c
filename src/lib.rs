// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Leeway: concurrent Lee wavefront maze router.
//!
//! A [`model::Board`] lists routes between cell pairs on a rectangular grid. Each route is
//! solved inside its own optimistic transaction ([`stm`]): a wavefront expands from the source
//! over the shared congestion grid, a backtrace picks the cheapest path, and the path is laid by
//! incrementing every cell it covers. Expansion reads are released early, so concurrent routes
//! only conflict when they actually touch the same cells at commit time.
//!
//! [`route::Router`] runs up to `par_limit` route transactions at once and returns a
//! [`route::Solution`] or the first [`route::StuckError`].

pub mod config;
pub mod format;
pub mod model;
pub mod render;
pub mod route;
pub mod stm;

pub use config::{ConfigError, RetrySetting, RouterConfig};
pub use model::{Board, Point, Route};
pub use route::{solve_board, Router, SolveBoardError, Solution, StuckError};
