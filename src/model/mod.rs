// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Board geometry: points, the dense cell index, and the routing problem itself.

pub mod board;
pub mod grid;
pub mod point;

pub use board::{Board, BoardBuilder, BoardError, CostModel, Route};
pub use grid::GridIndex;
pub use point::{Direction, Point};
