//! graph-engine: command-line front end for graph-engine-core.
//!
//! Reads a graph document (file or stdin), runs one BFS, DFS or widest-path
//! query, and prints or writes a JSON result document. Ctrl-C and the
//! configured timeout both cancel the running query.

mod cli;
mod commands;
mod config;
mod error;
mod logging;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::Cli;
use config::{FileConfig, Settings};
use error::ExitCode as EngineExitCode;

fn main() -> ExitCode {
    let start = Instant::now();
    let cli = Cli::parse();

    let file_config = match cli.config.as_deref().map(FileConfig::load).transpose() {
        Ok(cfg) => cfg.unwrap_or_default(),
        Err(e) => {
            eprintln!("error: {}", e);
            return e.exit_code().into();
        }
    };
    let settings = Settings::resolve(&cli, file_config);

    if let Err(e) = logging::init_tracing(
        settings.verbose,
        settings.log_level.as_deref(),
        settings.log_json,
    ) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let cancel = settings.cancel_token();
    let handle = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handle.cancel()) {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }

    tracing::debug!(elapsed = ?start.elapsed(), command = ?cli.command, "parse_args");

    match commands::run(&cli, &settings, &cancel) {
        Ok(()) => {
            tracing::debug!(elapsed = ?start.elapsed(), "done");
            EngineExitCode::Success.into()
        }
        Err(e) => {
            eprintln!("error: {}", e);
            e.exit_code().into()
        }
    }
}
