// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Leeway CLI entrypoint.
//!
//! Loads a board file, solves it, and prints one summary line per repetition. Logging goes to
//! stderr; `-v`/`-vv`/`-vvv` or `LEEWAY_LOG=<level>` raise the level (default `warn`).

use std::error::Error;
use std::str::FromStr;

use leeway::config::{RetrySetting, RouterConfig};
use leeway::format::load_board;
use leeway::render::render_solution;
use leeway::route::Router;

const LOG_ENV: &str = "LEEWAY_LOG";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <board-file> [--par-limit <n>] [--retry <strategy>] [--config <json>]\n  {program} <board-file> [--repeat <k>] [--json] [--render] [-v|-vv|-vvv]\n\n--retry is one of immediate, yield, delay:<base_us>:<max_us> (default yield).\n--par-limit and --retry override the values read from --config.\n--repeat solves the same board k times on fresh congestion grids.\n--json prints the last solution as JSON; --render draws it."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    board: String,
    par_limit: Option<usize>,
    retry: Option<RetrySetting>,
    config: Option<String>,
    repeat: Option<usize>,
    json: bool,
    render: bool,
    verbosity: u8,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();
    let mut board = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--par-limit" => {
                if options.par_limit.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.par_limit = Some(raw.parse().map_err(|_| ())?);
            }
            "--retry" => {
                if options.retry.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.retry = Some(RetrySetting::parse(&raw).map_err(|_| ())?);
            }
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(args.next().ok_or(())?);
            }
            "--repeat" => {
                if options.repeat.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let repeat: usize = raw.parse().map_err(|_| ())?;
                if repeat == 0 {
                    return Err(());
                }
                options.repeat = Some(repeat);
            }
            "--json" => {
                if options.json {
                    return Err(());
                }
                options.json = true;
            }
            "--render" => {
                if options.render {
                    return Err(());
                }
                options.render = true;
            }
            "-v" | "-vv" | "-vvv" => {
                if options.verbosity != 0 {
                    return Err(());
                }
                options.verbosity = (arg.len() - 1) as u8;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if board.is_some() {
                    return Err(());
                }
                board = Some(arg);
            }
        }
    }

    options.board = board.ok_or(())?;
    Ok(options)
}

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("leeway: [{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn log_level(verbosity: u8, env: Option<&str>) -> log::LevelFilter {
    match verbosity {
        0 => env
            .and_then(|raw| log::LevelFilter::from_str(raw.trim()).ok())
            .unwrap_or(log::LevelFilter::Warn),
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn router_config(options: &CliOptions) -> Result<RouterConfig, Box<dyn Error>> {
    let mut config = match options.config.as_deref() {
        Some(path) => RouterConfig::load(path)?,
        None => RouterConfig::default(),
    };
    if let Some(par_limit) = options.par_limit {
        config.par_limit = par_limit;
    }
    if let Some(retry) = options.retry {
        config.retry = retry;
    }
    Ok(config)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "leeway".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let env_level = std::env::var(LOG_ENV).ok();
        log::set_logger(&LOGGER).map_err(|err| err.to_string())?;
        log::set_max_level(log_level(options.verbosity, env_level.as_deref()));

        let router = Router::new(&router_config(&options)?)?;
        let board = load_board(&options.board)?.normalized();

        let repeat = options.repeat.unwrap_or(1);
        let mut last = None;
        for run in 1..=repeat {
            let (solution, congestion) = router.solve_board_with_grid(&board)?;
            let stats = solution.stats();
            println!(
                "run {run}/{repeat}: {} routes, {} path cells, congestion {}, \
                 {} attempts ({} conflicts), par_limit {}, {:?}",
                stats.routes,
                stats.path_cells,
                congestion.total(),
                stats.attempts,
                stats.conflicts,
                stats.par_limit,
                stats.elapsed
            );
            last = Some(solution);
        }

        if let Some(solution) = last {
            if options.render {
                println!("{}", render_solution(&board, &solution)?);
            }
            if options.json {
                println!("{}", solution.to_json()?);
            }
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("leeway: {err}");
        std::process::exit(1);
    }
}
