// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text rendering for boards and solved layouts.
//!
//! Every board cell maps to exactly one character cell. Paths are drawn with Unicode box
//! characters; where two paths meet, their segments merge into junctions instead of overwriting
//! each other, so crossings stay visible in the output.

use std::fmt;

mod board;
mod text;

pub use board::{render_congestion, render_solution};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoxEdges(u8);

impl BoxEdges {
    const NONE: Self = Self(0);
    const LEFT: Self = Self(1 << 0);
    const RIGHT: Self = Self(1 << 1);
    const UP: Self = Self(1 << 2);
    const DOWN: Self = Self(1 << 3);

    fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

fn box_char_from_edges(edges: BoxEdges) -> char {
    match edges.0 {
        0 => ' ',
        // Straight segments, including dangling ends.
        1..=3 => '─',
        4 | 8 | 12 => '│',
        // Corners.
        10 => '┌',
        9 => '┐',
        6 => '└',
        5 => '┘',
        // Tees.
        14 => '├',
        13 => '┤',
        11 => '┬',
        7 => '┴',
        _ => '┼',
    }
}

/// A fixed-size, bounds-checked character grid.
///
/// Characters overwrite (last writer wins). Links accumulate per cell and merge into corners
/// and junctions; a later `set` on the same cell replaces them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    box_edges: Vec<BoxEdges>,
}

impl Canvas {
    /// Creates a new canvas filled with spaces (`' '`).
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        Self::new_filled(width, height, ' ')
    }

    /// Creates a new canvas filled with `fill`.
    pub fn new_filled(width: usize, height: usize, fill: char) -> Result<Self, CanvasError> {
        let len = width
            .checked_mul(height)
            .ok_or(CanvasError::AreaOverflow { width, height })?;

        Ok(Self {
            width,
            height,
            cells: vec![fill; len],
            box_edges: vec![BoxEdges::NONE; len],
        })
    }

    /// Sets the character at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = ch;
        self.box_edges[idx] = BoxEdges::NONE;
        Ok(())
    }

    /// Connects two orthogonally adjacent cells with a box-drawing segment.
    ///
    /// Each cell receives the half-edge pointing at the other, so a run of links renders as a
    /// continuous line with corners where it turns. Cells that are not adjacent are rejected
    /// without touching the canvas.
    pub fn link(&mut self, from: (usize, usize), to: (usize, usize)) -> Result<(), CanvasError> {
        let from_idx = self.index_of(from.0, from.1)?;
        let to_idx = self.index_of(to.0, to.1)?;

        let (from_edge, to_edge) = match (
            to.0 as isize - from.0 as isize,
            to.1 as isize - from.1 as isize,
        ) {
            (1, 0) => (BoxEdges::RIGHT, BoxEdges::LEFT),
            (-1, 0) => (BoxEdges::LEFT, BoxEdges::RIGHT),
            (0, 1) => (BoxEdges::DOWN, BoxEdges::UP),
            (0, -1) => (BoxEdges::UP, BoxEdges::DOWN),
            _ => return Err(CanvasError::NotAdjacent { from, to }),
        };

        self.box_edges[from_idx] = self.box_edges[from_idx].union(from_edge);
        self.box_edges[to_idx] = self.box_edges[to_idx].union(to_edge);
        Ok(())
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        Ok((y * self.width) + x)
    }

    fn render_at(&self, idx: usize) -> char {
        let edges = self.box_edges[idx];
        if edges.is_empty() {
            return self.cells[idx];
        }
        box_char_from_edges(edges)
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            for x in 0..self.width {
                f.write_char(self.render_at((y * self.width) + x))?;
            }

            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    AreaOverflow {
        width: usize,
        height: usize,
    },
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    NotAdjacent {
        from: (usize, usize),
        to: (usize, usize),
    },
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaOverflow { width, height } => {
                write!(f, "canvas area overflow: {width}*{height}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "out of bounds: ({x},{y}) for {width}x{height} canvas")
            }
            Self::NotAdjacent { from, to } => write!(
                f,
                "cannot link ({},{}) to ({},{}): cells are not adjacent",
                from.0, from.1, to.0, to.1
            ),
        }
    }
}

impl std::error::Error for CanvasError {}

#[cfg(test)]
mod tests {
    use super::{Canvas, CanvasError};

    #[test]
    fn set_overwrites_in_bounds() {
        let mut c = Canvas::new_filled(3, 2, '.').expect("canvas");
        c.set(1, 0, 'X').unwrap();
        c.set(2, 1, 'Y').unwrap();
        c.set(2, 1, 'Z').unwrap();
        assert_eq!(c.to_string(), ".X.\n..Z");
    }

    #[test]
    fn set_out_of_bounds_errors() {
        let mut c = Canvas::new(2, 2).expect("canvas");
        let err = c.set(2, 0, 'X').unwrap_err();
        assert_eq!(
            err,
            CanvasError::OutOfBounds {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            }
        );
    }

    #[test]
    fn rejects_area_overflow() {
        let err = Canvas::new_filled(usize::MAX, 2, '.').unwrap_err();
        assert_eq!(
            err,
            CanvasError::AreaOverflow {
                width: usize::MAX,
                height: 2
            }
        );
    }

    #[test]
    fn links_turn_into_corners() {
        let mut c = Canvas::new_filled(3, 3, '.').expect("canvas");
        c.link((0, 0), (1, 0)).unwrap();
        c.link((1, 0), (1, 1)).unwrap();
        c.link((1, 1), (2, 1)).unwrap();
        assert_eq!(c.to_string(), "─┐.\n.└─\n...");
    }

    #[test]
    fn crossing_links_merge_into_a_cross() {
        let mut c = Canvas::new_filled(3, 3, '.').expect("canvas");
        c.link((0, 1), (1, 1)).unwrap();
        c.link((1, 1), (2, 1)).unwrap();
        c.link((1, 0), (1, 1)).unwrap();
        c.link((1, 1), (1, 2)).unwrap();
        assert_eq!(c.to_string(), ".│.\n─┼─\n.│.");
    }

    #[test]
    fn set_replaces_links_on_its_cell() {
        let mut c = Canvas::new_filled(3, 1, '.').expect("canvas");
        c.link((0, 0), (1, 0)).unwrap();
        c.link((1, 0), (2, 0)).unwrap();
        c.set(2, 0, '●').unwrap();
        assert_eq!(c.to_string(), "──●");
    }

    #[test]
    fn non_adjacent_link_is_rejected_without_drawing() {
        let mut c = Canvas::new_filled(3, 1, '.').expect("canvas");
        let err = c.link((0, 0), (2, 0)).unwrap_err();
        assert_eq!(
            err,
            CanvasError::NotAdjacent {
                from: (0, 0),
                to: (2, 0)
            }
        );
        assert_eq!(c.to_string(), "...");
    }
}
