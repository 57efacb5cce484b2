//! `confseal` CLI entry point.
//!
//! Startup sequence:
//! 1. Parse command-line arguments.
//! 2. Load and validate [`Config`] from `CONFSEAL_*` environment variables.
//! 3. Initialise logging to stderr.
//! 4. Run the subcommand and map failures to an exit status.

mod cli;
mod commands;
mod config;
mod props;
mod source;
mod telemetry;

use std::process::ExitCode;

use clap::Parser;
use common::SealError;
use tracing::debug;

use crate::config::Config;

/// Exit status for failures that are not a [`SealError`] (I/O, configuration).
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    // -----------------------------------------------------------------------
    // 1. Arguments
    // -----------------------------------------------------------------------
    let args = cli::Cli::parse();

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Telemetry is not yet up; write to stderr directly.
            eprintln!("ERROR: configuration invalid: {e:#}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    if let Err(e) = telemetry::init(&cfg.log_level, cfg.log_format) {
        eprintln!("ERROR: {e:#}");
        return ExitCode::from(EXIT_FAILURE);
    }
    debug!(version = env!("CARGO_PKG_VERSION"), ?cfg, "confseal starting");

    // -----------------------------------------------------------------------
    // 4. Command
    // -----------------------------------------------------------------------
    match commands::run(&args, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let seal = e.downcast_ref::<SealError>();
            debug!(kind = seal.map_or("other", SealError::kind), "command failed");
            eprintln!("ERROR: {e:#}");
            ExitCode::from(seal.map_or(EXIT_FAILURE, SealError::exit_code))
        }
    }
}
