// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::Canvas;

/// Renders `canvas` with trailing spaces removed from every row.
///
/// Rows are never dropped, so the line count always equals the canvas height.
pub(crate) fn canvas_to_string_trimmed(canvas: &Canvas) -> String {
    let rendered = canvas.to_string();
    let mut out = String::with_capacity(rendered.len());
    for (y, line) in rendered.split('\n').enumerate() {
        if y > 0 {
            out.push('\n');
        }
        out.push_str(line.trim_end_matches(' '));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::canvas_to_string_trimmed;
    use crate::render::Canvas;

    #[test]
    fn trims_row_ends_but_keeps_blank_rows() {
        let mut canvas = Canvas::new(4, 3).expect("canvas");
        canvas.set(1, 0, 'a').unwrap();
        canvas.link((0, 1), (1, 1)).unwrap();
        assert_eq!(canvas_to_string_trimmed(&canvas), " a\n──\n");
    }
}
