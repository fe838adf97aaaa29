//! # tripquote
//!
//! Command-line front end for the TripQuote pricing engine.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        tripquote startup                                │
//! │                                                                         │
//! │  1. tracing subscriber (RUST_LOG, default "info", stderr)              │
//! │  2. Cli::parse()            (clap; usage errors exit 2)                │
//! │  3. AppConfig::from_env()   (TRIPQUOTE_*)                              │
//! │  4. Database::new()         (SQLite file, migrations)                  │
//! │  5. command handler                                                     │
//! │  6. exit 0 on success, 1 on any error                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod config;
mod error;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;
use crate::config::AppConfig;
use crate::error::CliResult;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.code().as_str(), error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = AppConfig::from_env()?;
    debug!(
        db_path = %config.db_path.display(),
        locale = %config.locale,
        autosave_ms = config.autosave_delay.as_millis() as u64,
        "Configuration loaded"
    );
    cli.run(config).await
}
