// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::text::canvas_to_string_trimmed;
use super::{Canvas, CanvasError};
use crate::model::{Board, Point};
use crate::route::{CongestionSnapshot, Solution};

const OBSTRUCTED: char = '█';
const PAD: char = '●';
const IDLE: char = '.';
const SATURATED: char = '+';

fn cell(point: Point) -> (usize, usize) {
    // Negative coordinates map past the canvas edge and surface as `OutOfBounds`.
    let x = usize::try_from(point.x()).unwrap_or(usize::MAX);
    let y = usize::try_from(point.y()).unwrap_or(usize::MAX);
    (x, y)
}

/// Draws `board` with every solved path on top of it.
///
/// Obstructions render as `█` and pads as `●`. Paths are box-drawn cell to cell; where several
/// paths share or cross a cell the segments merge into junctions. Trailing blanks are trimmed
/// from each row.
pub fn render_solution(board: &Board, solution: &Solution) -> Result<String, CanvasError> {
    let mut canvas = Canvas::new(board.width(), board.height())?;
    let grid = board.grid();

    for idx in 0..grid.len() {
        let point = grid.point_of(idx);
        if board.is_obstructed(point) && !board.is_pad(point) {
            let (x, y) = cell(point);
            canvas.set(x, y, OBSTRUCTED)?;
        }
    }

    for path in solution.paths().values() {
        for pair in path.windows(2) {
            canvas.link(cell(pair[0]), cell(pair[1]))?;
        }
    }

    for idx in 0..grid.len() {
        let point = grid.point_of(idx);
        if board.is_pad(point) {
            let (x, y) = cell(point);
            canvas.set(x, y, PAD)?;
        }
    }

    Ok(canvas_to_string_trimmed(&canvas))
}

/// Draws the committed congestion depth of every cell.
///
/// Depths 1 to 9 print as digits, deeper cells as `+` and untouched cells as `.`, except
/// untouched obstructions which keep their `█`.
pub fn render_congestion(
    board: &Board,
    congestion: &CongestionSnapshot,
) -> Result<String, CanvasError> {
    let grid = congestion.grid();
    let mut canvas = Canvas::new_filled(grid.width(), grid.height(), IDLE)?;

    for (idx, &depth) in congestion.depths().iter().enumerate() {
        let point = grid.point_of(idx);
        let ch = match depth {
            0 if board.is_obstructed(point) => OBSTRUCTED,
            0 => continue,
            1..=9 => char::from_digit(depth, 10).unwrap_or(SATURATED),
            _ => SATURATED,
        };
        let (x, y) = cell(point);
        canvas.set(x, y, ch)?;
    }

    Ok(canvas.to_string())
}
