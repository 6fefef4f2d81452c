// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::atomic::{AtomicU64, Ordering};

const VALUE_MASK: u64 = 0xFFFF_FFFF;
const LOCK_BIT: u64 = 1 << 32;
const VERSION_SHIFT: u32 = 33;
const SPINS_BEFORE_YIELD: u32 = 64;

/// Packed cell state: bits `0..32` value, bit `32` commit lock, bits `33..64` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Word(u64);

impl Word {
    pub(crate) fn value(self) -> u32 {
        (self.0 & VALUE_MASK) as u32
    }

    pub(crate) fn version(self) -> u32 {
        (self.0 >> VERSION_SHIFT) as u32
    }

    pub(crate) fn is_locked(self) -> bool {
        self.0 & LOCK_BIT != 0
    }

    fn locked(self) -> Self {
        Self(self.0 | LOCK_BIT)
    }

    /// Unlocked successor carrying `value`; the version wraps within its 31 bits.
    fn next(self, value: u32) -> Self {
        let version = u64::from(self.version().wrapping_add(1)) & (u64::MAX >> VERSION_SHIFT);
        Self((version << VERSION_SHIFT) | u64::from(value))
    }
}

/// Fixed-size arena of versioned `u32` cells, shared by reference between workers.
#[derive(Debug)]
pub struct CellArena {
    cells: Box<[AtomicU64]>,
    attempts: AtomicU64,
}

impl CellArena {
    pub fn new(len: usize) -> Self {
        let cells = (0..len).map(|_| AtomicU64::new(0)).collect::<Vec<_>>().into_boxed_slice();
        Self { cells, attempts: AtomicU64::new(0) }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Non-transactional read of the latest committed value.
    pub fn peek(&self, idx: usize) -> u32 {
        self.load_stable(idx).value()
    }

    /// Committed values of every cell, in index order.
    ///
    /// Only meaningful once no transaction is in flight.
    pub fn snapshot(&self) -> Vec<u32> {
        (0..self.cells.len()).map(|idx| self.peek(idx)).collect()
    }

    pub(crate) fn next_attempt_id(&self) -> u64 {
        self.attempts.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn load(&self, idx: usize) -> Word {
        Word(self.cells[idx].load(Ordering::Acquire))
    }

    /// Waits out an in-flight commit on `idx`.
    ///
    /// Lock holders never wait on anything while holding a lock, so this always terminates.
    pub(crate) fn load_stable(&self, idx: usize) -> Word {
        let mut spins = 0u32;
        loop {
            let word = self.load(idx);
            if !word.is_locked() {
                return word;
            }
            spins += 1;
            if spins < SPINS_BEFORE_YIELD {
                std::hint::spin_loop();
            } else {
                std::thread::yield_now();
            }
        }
    }

    /// Locks `idx` if it still holds exactly `expected` (which must be unlocked).
    pub(crate) fn try_lock(&self, idx: usize, expected: Word) -> bool {
        debug_assert!(!expected.is_locked());
        self.cells[idx]
            .compare_exchange(expected.0, expected.locked().0, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Restores a word locked by [`CellArena::try_lock`] without publishing anything.
    pub(crate) fn unlock(&self, idx: usize, previous: Word) {
        self.cells[idx].store(previous.0, Ordering::Release);
    }

    /// Publishes `value` on a cell locked from `previous`, bumping its version.
    pub(crate) fn publish(&self, idx: usize, previous: Word, value: u32) {
        self.cells[idx].store(previous.next(value).0, Ordering::Release);
    }
}
