// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Line-oriented board files.
//!
//! ```text
//! # comment
//! G 10 10          grid width height (first directive)
//! C 1 2            cost model: step congestion
//! B 2 2 4 5        obstructed rectangle, inclusive corners
//! P 7 1            pad
//! J 0 0 9 9        route from (0,0) to (9,9); endpoints become pads
//! E                end of board
//! ```

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::{Board, BoardBuilder, BoardError, CostModel, Point};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    MissingGrid,
    DuplicateGrid { line_no: usize },
    UnknownDirective { line_no: usize, directive: String },
    WrongArity { line_no: usize, directive: char, expected: usize, found: usize },
    InvalidNumber { line_no: usize, token: String },
    Board { line_no: usize, source: BoardError },
}

impl fmt::Display for BoardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGrid => write!(f, "board file has no `G <width> <height>` line"),
            Self::DuplicateGrid { line_no } => write!(f, "line {line_no}: grid size given twice"),
            Self::UnknownDirective { line_no, directive } => {
                write!(f, "line {line_no}: unknown directive {directive:?}")
            }
            Self::WrongArity { line_no, directive, expected, found } => write!(
                f,
                "line {line_no}: `{directive}` takes {expected} numbers, found {found}"
            ),
            Self::InvalidNumber { line_no, token } => {
                write!(f, "line {line_no}: {token:?} is not a valid number")
            }
            Self::Board { line_no, source } => write!(f, "line {line_no}: {source}"),
        }
    }
}

impl std::error::Error for BoardParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Board { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum BoardFileError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: BoardParseError },
}

impl fmt::Display for BoardFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Parse { path, source } => write!(f, "cannot parse board {path:?}: {source}"),
        }
    }
}

impl std::error::Error for BoardFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

fn parse_numbers<const N: usize>(
    line_no: usize,
    directive: char,
    args: &[&str],
) -> Result<[i64; N], BoardParseError> {
    if args.len() != N {
        return Err(BoardParseError::WrongArity {
            line_no,
            directive,
            expected: N,
            found: args.len(),
        });
    }
    let mut out = [0i64; N];
    for (slot, token) in out.iter_mut().zip(args) {
        *slot = token
            .parse()
            .map_err(|_| BoardParseError::InvalidNumber { line_no, token: (*token).to_owned() })?;
    }
    Ok(out)
}

fn to_coord(line_no: usize, value: i64) -> Result<i32, BoardParseError> {
    i32::try_from(value)
        .map_err(|_| BoardParseError::InvalidNumber { line_no, token: value.to_string() })
}

fn point(line_no: usize, x: i64, y: i64) -> Result<Point, BoardParseError> {
    Ok(Point::new(to_coord(line_no, x)?, to_coord(line_no, y)?))
}

fn to_unsigned<T: TryFrom<i64>>(line_no: usize, value: i64) -> Result<T, BoardParseError> {
    T::try_from(value)
        .map_err(|_| BoardParseError::InvalidNumber { line_no, token: value.to_string() })
}

/// Parses a board file. Routes keep file order; see [`Board::normalized`].
pub fn parse_board(input: &str) -> Result<Board, BoardParseError> {
    let mut builder: Option<BoardBuilder> = None;
    let mut last_line_no = 0;

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        last_line_no = line_no;
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(directive) = tokens.next() else {
            continue;
        };
        let args = tokens.collect::<Vec<_>>();
        let board_err = |source| BoardParseError::Board { line_no, source };

        let directive = match directive {
            "G" | "E" | "C" | "B" | "P" | "J" => directive.chars().next().unwrap_or('?'),
            other => {
                return Err(BoardParseError::UnknownDirective {
                    line_no,
                    directive: other.to_owned(),
                });
            }
        };

        if directive == 'E' {
            parse_numbers::<0>(line_no, directive, &args)?;
            break;
        }

        if directive == 'G' {
            if builder.is_some() {
                return Err(BoardParseError::DuplicateGrid { line_no });
            }
            let [width, height] = parse_numbers::<2>(line_no, directive, &args)?;
            let width = to_unsigned::<usize>(line_no, width)?;
            let height = to_unsigned::<usize>(line_no, height)?;
            builder = Some(BoardBuilder::new(width, height).map_err(board_err)?);
            continue;
        }

        let Some(builder) = builder.as_mut() else {
            return Err(BoardParseError::MissingGrid);
        };

        match directive {
            'C' => {
                let [step, congestion] = parse_numbers::<2>(line_no, directive, &args)?;
                let model = CostModel::new(
                    to_unsigned::<u32>(line_no, step)?,
                    to_unsigned::<u32>(line_no, congestion)?,
                )
                .map_err(board_err)?;
                builder.cost_model(model);
            }
            'B' => {
                let [x0, y0, x1, y1] = parse_numbers::<4>(line_no, directive, &args)?;
                builder
                    .obstruct_rect(point(line_no, x0, y0)?, point(line_no, x1, y1)?)
                    .map_err(board_err)?;
            }
            'P' => {
                let [x, y] = parse_numbers::<2>(line_no, directive, &args)?;
                builder.pad(point(line_no, x, y)?).map_err(board_err)?;
            }
            'J' => {
                let [x0, y0, x1, y1] = parse_numbers::<4>(line_no, directive, &args)?;
                builder
                    .route(point(line_no, x0, y0)?, point(line_no, x1, y1)?)
                    .map_err(board_err)?;
            }
            _ => unreachable!("directive validated above"),
        }
    }

    // Cost bounds depend on the whole board, so they are reported against the last line read.
    builder
        .ok_or(BoardParseError::MissingGrid)?
        .build()
        .map_err(|source| BoardParseError::Board { line_no: last_line_no, source })
}

pub fn load_board(path: impl AsRef<Path>) -> Result<Board, BoardFileError> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path)
        .map_err(|source| BoardFileError::Io { path: path.to_path_buf(), source })?;
    parse_board(&input).map_err(|source| BoardFileError::Parse { path: path.to_path_buf(), source })
}
