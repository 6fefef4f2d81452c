// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use leeway::config::{RetrySetting, RouterConfig};
use leeway::route::Router;

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `solve.board`, `solve.retry`
// - Case IDs are `<fixture>/<par_limit>` and `<fixture>/<retry>`; keep them stable so results
//   stay comparable over time.
fn benches_solve(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("solve.board");
        let par_limits = profiler::par_limits();

        for case in fixtures::Case::ALL {
            let board = fixtures::fixture(case);
            group.throughput(Throughput::Elements(board.routes().len() as u64));

            for &par_limit in &par_limits {
                let router = Router::new(&RouterConfig::new(par_limit, RetrySetting::Yield))
                    .expect("router");
                group.bench_with_input(
                    BenchmarkId::new(case.id(), par_limit),
                    &board,
                    |b, board| {
                        b.iter(|| {
                            let solution = router.solve_board(black_box(board)).expect("solved");
                            black_box(fixtures::checksum_solution(&solution))
                        })
                    },
                );
            }
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("solve.retry");
        let board = fixtures::fixture(fixtures::Case::MediumBlocked);
        group.throughput(Throughput::Elements(board.routes().len() as u64));

        for (retry_id, retry) in [
            ("immediate", RetrySetting::Immediate),
            ("yield", RetrySetting::Yield),
            ("delay", RetrySetting::Delay { base_us: 5, max_us: 500 }),
        ] {
            let router = Router::new(&RouterConfig::new(8, retry)).expect("router");
            group.bench_with_input(
                BenchmarkId::new(fixtures::Case::MediumBlocked.id(), retry_id),
                &board,
                |b, board| {
                    b.iter(|| {
                        let (solution, congestion) =
                            router.solve_board_with_grid(black_box(board)).expect("solved");
                        black_box(solution.stats().conflicts.wrapping_add(congestion.total()))
                    })
                },
            );
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_solve
}
criterion_main!(benches);
