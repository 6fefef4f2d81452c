// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::expand::{endpoint_indices, CostField};
use crate::model::{Board, Point, Route};

/// A cost field that a correct expansion cannot produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrokenField {
    EndpointOutsideBoard { route: Route },
    DestinationUnvisited { route: Route },
    /// No visited neighbour cheaper than `at`.
    DeadEnd { route: Route, at: Point },
    /// A non-source cell on the path carries no ticket.
    MissingTicket { route: Route, at: Point },
}

impl fmt::Display for BrokenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndpointOutsideBoard { route } => {
                write!(f, "route {route} has an endpoint outside the board")
            }
            Self::DestinationUnvisited { route } => {
                write!(f, "route {route}: destination has no cost")
            }
            Self::DeadEnd { route, at } => {
                write!(f, "route {route}: backtrace has no cheaper neighbour at {at}")
            }
            Self::MissingTicket { route, at } => {
                write!(f, "route {route}: no ticket recorded for path cell {at}")
            }
        }
    }
}

impl std::error::Error for BrokenField {}

/// Greedy descent from the destination to the source over `field`.
///
/// At each step the cheapest visited neighbour wins; ties go to the first one in
/// [`crate::model::Direction::ALL`] order. The returned path runs source to destination,
/// both inclusive.
pub fn backtrace(
    board: &Board,
    field: &CostField,
    route: &Route,
) -> Result<Vec<Point>, BrokenField> {
    let grid = board.grid();
    let (source, destination) =
        endpoint_indices(grid, route).ok_or(BrokenField::EndpointOutsideBoard { route: *route })?;
    if field.cost(destination) == 0 {
        return Err(BrokenField::DestinationUnvisited { route: *route });
    }

    let mut path = vec![route.destination()];
    let mut current = destination;
    while current != source {
        let current_cost = field.cost(current);
        let mut best: Option<(u64, usize)> = None;
        for adjacent in board.adjacent_idx(current) {
            let cost = field.cost(adjacent);
            if cost == 0 {
                continue;
            }
            if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                best = Some((cost, adjacent));
            }
        }

        // Costs strictly decrease towards the source; anything else would loop.
        let next = match best {
            Some((cost, next)) if cost < current_cost => next,
            _ => return Err(BrokenField::DeadEnd { route: *route, at: grid.point_of(current) }),
        };
        path.push(grid.point_of(next));
        current = next;
    }

    path.reverse();
    Ok(path)
}
