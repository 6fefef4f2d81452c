// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Board file formats.
//!
//! The line-oriented board format is documented in [`board`].

pub mod board;

pub use board::{load_board, parse_board, BoardFileError, BoardParseError};
