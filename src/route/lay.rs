// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::backtrace::BrokenField;
use super::expand::CostField;
use crate::model::{Board, Point, Route};
use crate::stm::Txn;

/// Records one more use of every cell on `path` in the congestion grid.
///
/// Non-source cells are incremented from the value their expansion ticket observed, not from
/// a fresh read. This is weaker than snapshot isolation: the base value may be
/// stale relative to a serial execution, and the commit still fails if the cell changed since
/// the ticket was taken, so no increment is lost. The source never has a ticket and goes
/// through an ordinary read-modify-write.
///
/// Returns the number of ticket writes.
pub fn lay(
    txn: &mut Txn<'_>,
    board: &Board,
    field: &CostField,
    route: &Route,
    path: &[Point],
) -> Result<usize, BrokenField> {
    let grid = board.grid();
    let mut ticket_writes = 0usize;

    for &point in path {
        let Some(idx) = grid.idx_of(point) else {
            return Err(BrokenField::EndpointOutsideBoard { route: *route });
        };

        if point == route.source() {
            let depth = txn.read(idx);
            txn.write(idx, depth.saturating_add(1));
            continue;
        }

        let ticket = field.ticket(idx).ok_or(BrokenField::MissingTicket {
            route: *route,
            at: point,
        })?;
        txn.ticket_write(ticket, ticket.value().saturating_add(1));
        ticket_writes += 1;
    }

    Ok(ticket_writes)
}
