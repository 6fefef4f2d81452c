// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-cell optimistic transactions over a shared integer arena.
//!
//! The arena stores one versioned word per cell (value, lock bit, version). A [`Txn`] buffers
//! its writes and only touches shared memory at commit, where it locks its write set in
//! ascending cell order, validates, publishes, and unlocks. There is no grid-wide lock.
//!
//! Two read flavours exist:
//! - [`Txn::read`] joins the read set and is validated at commit.
//! - [`Txn::ticket_read`] returns a [`Ticket`] and is *not* validated at commit. It is an
//!   early release: the value may be stale by the time the transaction commits, and a
//!   transaction built only from ticket reads does not observe a consistent snapshot.
//!   A later [`Txn::ticket_write`] through the ticket is validated against the word the ticket
//!   observed, so increments derived from a ticket are never lost.

mod arena;
mod retry;
mod txn;


pub use arena::CellArena;
pub use retry::RetryStrategy;
pub use txn::{run_transaction, Conflict, Ticket, Txn, TxnError, TxnReport};
