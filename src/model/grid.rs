// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::Point;

/// Dense row-major indexing for a `width x height` board anchored at `(0, 0)`.
///
/// Every per-cell array in the crate (obstructions, congestion cells, cost fields, tickets) is
/// laid out with this mapping so a cell index can be shared between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridIndex {
    width: usize,
    height: usize,
}

impl GridIndex {
    /// Returns `None` when the area does not fit in `usize`.
    pub fn new(width: usize, height: usize) -> Option<Self> {
        width.checked_mul(height)?;
        Some(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        // Checked in `new`.
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, point: Point) -> bool {
        self.idx_of(point).is_some()
    }

    pub fn idx_of(&self, point: Point) -> Option<usize> {
        if point.x() < 0 || point.y() < 0 {
            return None;
        }
        let (x, y) = (point.x() as usize, point.y() as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn point_of(&self, idx: usize) -> Point {
        debug_assert!(idx < self.len());
        let x = (idx % self.width) as i32;
        let y = (idx / self.width) as i32;
        Point::new(x, y)
    }
}
