// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

const DEFAULT_PAR_LIMITS: [usize; 4] = [1, 2, 4, 8];

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<T>().ok()).unwrap_or(default)
}

/// Criterion tuned through `LEEWAY_BENCH_*` variables, sampled by pprof into a flamegraph.
pub fn criterion() -> Criterion {
    let frequency = env_or("LEEWAY_PROFILE_FREQ", 100i32).clamp(1, 1000);
    let sample_size = env_or("LEEWAY_BENCH_SAMPLE_SIZE", 30usize).clamp(10, 200);
    let warmup_secs = env_or("LEEWAY_BENCH_WARMUP_SECS", 2u64).clamp(1, 60);
    let measurement_secs = env_or("LEEWAY_BENCH_MEASUREMENT_SECS", 5u64).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}

/// `par_limit` sweep, overridable as a comma list in `LEEWAY_BENCH_PAR_LIMITS` (e.g. `1,4,16`).
pub fn par_limits() -> Vec<usize> {
    let parsed = std::env::var("LEEWAY_BENCH_PAR_LIMITS")
        .ok()
        .map(|raw| {
            raw.split(',')
                .filter_map(|part| part.trim().parse::<usize>().ok())
                .filter(|&limit| limit > 0)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    if parsed.is_empty() {
        DEFAULT_PAR_LIMITS.to_vec()
    } else {
        parsed
    }
}
