// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

const MAX_BACKOFF_DOUBLINGS: u32 = 20;

/// What a worker does between a conflicting attempt and its retry.
///
/// Every strategy retries without bound; only the pause differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryStrategy {
    /// Retry at once (spin).
    Immediate,
    /// Give up the time slice first (cede).
    #[default]
    Yield,
    /// Sleep `base * 2^(conflicts - 1)`, capped at `max`.
    Delay { base: Duration, max: Duration },
}

impl RetryStrategy {
    /// Pause length before retry number `conflicts` (1-based); `None` means no sleep.
    pub fn delay_for(&self, conflicts: u32) -> Option<Duration> {
        match *self {
            Self::Immediate | Self::Yield => None,
            Self::Delay { base, max } => {
                let doublings = conflicts.saturating_sub(1).min(MAX_BACKOFF_DOUBLINGS);
                let delay = base.checked_mul(1u32 << doublings).unwrap_or(max);
                Some(delay.min(max))
            }
        }
    }

    pub(crate) fn pause(&self, conflicts: u32) {
        match self {
            Self::Immediate => std::hint::spin_loop(),
            Self::Yield => std::thread::yield_now(),
            Self::Delay { .. } => {
                if let Some(delay) = self.delay_for(conflicts) {
                    std::thread::sleep(delay);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::RetryStrategy;

    #[test]
    fn delay_doubles_up_to_the_cap() {
        let strategy = RetryStrategy::Delay {
            base: Duration::from_micros(10),
            max: Duration::from_micros(70),
        };
        let delays = (1..=5).map(|n| strategy.delay_for(n).unwrap()).collect::<Vec<_>>();
        assert_eq!(
            delays,
            vec![
                Duration::from_micros(10),
                Duration::from_micros(20),
                Duration::from_micros(40),
                Duration::from_micros(70),
                Duration::from_micros(70),
            ]
        );
    }

    #[test]
    fn delay_saturates_for_huge_conflict_counts() {
        let strategy =
            RetryStrategy::Delay { base: Duration::from_secs(1), max: Duration::from_secs(2) };
        assert_eq!(strategy.delay_for(u32::MAX), Some(Duration::from_secs(2)));
    }

    #[test]
    fn spin_and_yield_never_sleep() {
        assert_eq!(RetryStrategy::Immediate.delay_for(100), None);
        assert_eq!(RetryStrategy::Yield.delay_for(100), None);
    }
}
