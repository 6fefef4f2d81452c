// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use super::arena::{CellArena, Word};
use super::RetryStrategy;

const WARN_ATTEMPTS: u32 = 64;

/// The attempt observed data another transaction has since changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict;

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transaction conflict")
    }
}

impl std::error::Error for Conflict {}

/// Outcome of a transaction body that did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxnError<E> {
    /// Retried by [`run_transaction`]; never surfaced to its caller.
    Conflict,
    /// Ends the transaction without committing; surfaced as `Err(E)`.
    Abort(E),
}

impl<E> From<Conflict> for TxnError<E> {
    fn from(_: Conflict) -> Self {
        Self::Conflict
    }
}

/// Deferred-write handle from [`Txn::ticket_read`].
///
/// Only valid inside the attempt that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    idx: usize,
    observed: Word,
    attempt: u64,
}

impl Ticket {
    pub fn cell(&self) -> usize {
        self.idx
    }

    /// The value seen when the ticket was taken; possibly stale by now.
    pub fn value(&self) -> u32 {
        self.observed.value()
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingWrite {
    /// Word the cell must still hold at commit; `None` for blind writes.
    expected: Option<Word>,
    value: u32,
}

/// Counters for one committed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxnReport {
    pub attempts: u32,
    pub conflicts: u32,
    pub writes: usize,
    pub ticket_writes: usize,
}

/// One attempt of an optimistic transaction against a [`CellArena`].
#[derive(Debug)]
pub struct Txn<'a> {
    arena: &'a CellArena,
    attempt: u64,
    reads: BTreeMap<usize, Word>,
    writes: BTreeMap<usize, PendingWrite>,
    ticket_writes: usize,
}

impl<'a> Txn<'a> {
    pub(crate) fn begin(arena: &'a CellArena) -> Self {
        Self {
            arena,
            attempt: arena.next_attempt_id(),
            reads: BTreeMap::new(),
            writes: BTreeMap::new(),
            ticket_writes: 0,
        }
    }

    /// Validated read: the cell joins the read set and must be unchanged at commit.
    pub fn read(&mut self, idx: usize) -> u32 {
        if let Some(pending) = self.writes.get(&idx) {
            return pending.value;
        }
        let arena = self.arena;
        self.reads.entry(idx).or_insert_with(|| arena.load_stable(idx)).value()
    }

    /// Early-release read: returns the current value and a ticket for a later
    /// [`Txn::ticket_write`]. The cell is not validated at commit unless written through the
    /// ticket.
    pub fn ticket_read(&mut self, idx: usize) -> (u32, Ticket) {
        let observed = self.arena.load_stable(idx);
        (observed.value(), Ticket { idx, observed, attempt: self.attempt })
    }

    pub fn write(&mut self, idx: usize, value: u32) {
        let expected = match self.writes.get(&idx) {
            Some(pending) => pending.expected,
            None => self.reads.get(&idx).copied(),
        };
        self.writes.insert(idx, PendingWrite { expected, value });
    }

    /// Writes `value` to the ticket's cell. Commit succeeds only if the cell still holds the
    /// word the ticket observed.
    ///
    /// # Panics
    ///
    /// If the ticket was taken by a different attempt.
    pub fn ticket_write(&mut self, ticket: Ticket, value: u32) {
        assert_eq!(ticket.attempt, self.attempt, "ticket used outside the attempt that took it");
        self.writes.insert(ticket.idx, PendingWrite { expected: Some(ticket.observed), value });
        self.ticket_writes += 1;
    }

    fn release(&self, locked: &[(usize, Word)]) {
        for &(idx, previous) in locked {
            self.arena.unlock(idx, previous);
        }
    }

    pub(crate) fn commit(self) -> Result<(usize, usize), Conflict> {
        let mut locked = Vec::<(usize, Word)>::with_capacity(self.writes.len());

        // BTreeMap iteration gives the global ascending lock order.
        for (&idx, pending) in &self.writes {
            let current = match pending.expected {
                Some(expected) => expected,
                None => self.arena.load(idx),
            };
            if current.is_locked() || !self.arena.try_lock(idx, current) {
                self.release(&locked);
                return Err(Conflict);
            }
            locked.push((idx, current));
        }

        for (&idx, &observed) in &self.reads {
            if self.writes.contains_key(&idx) {
                continue;
            }
            if self.arena.load(idx) != observed {
                self.release(&locked);
                return Err(Conflict);
            }
        }

        for (idx, previous) in locked {
            let value = self.writes[&idx].value;
            self.arena.publish(idx, previous, value);
        }

        Ok((self.writes.len(), self.ticket_writes))
    }
}

/// Runs `body` atomically, re-running it from scratch after every conflict.
///
/// Returns once an attempt commits, or with `Err(e)` as soon as the body aborts with
/// [`TxnError::Abort`]. There is no retry limit.
pub fn run_transaction<T, E>(
    arena: &CellArena,
    strategy: RetryStrategy,
    mut body: impl FnMut(&mut Txn<'_>) -> Result<T, TxnError<E>>,
) -> Result<(T, TxnReport), E> {
    let mut conflicts = 0u32;
    loop {
        let mut txn = Txn::begin(arena);
        let outcome = match body(&mut txn) {
            Ok(value) => txn.commit().map(|counts| (value, counts)),
            Err(TxnError::Conflict) => Err(Conflict),
            Err(TxnError::Abort(err)) => return Err(err),
        };

        match outcome {
            Ok((value, (writes, ticket_writes))) => {
                let report = TxnReport {
                    attempts: conflicts.saturating_add(1),
                    conflicts,
                    writes,
                    ticket_writes,
                };
                return Ok((value, report));
            }
            Err(Conflict) => {
                conflicts = conflicts.saturating_add(1);
                log::trace!("transaction conflict, retry {conflicts}");
                if conflicts >= WARN_ATTEMPTS && conflicts.is_power_of_two() {
                    log::warn!("transaction still conflicting after {conflicts} attempts");
                }
                strategy.pause(conflicts);
            }
        }
    }
}
