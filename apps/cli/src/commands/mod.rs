//! # Command Tree
//!
//! ```text
//! tripquote
//! ├── quote
//! │   ├── calculate --quote FILE [--pricing FILE] [--locale] [--json]
//! │   ├── save --quote FILE
//! │   ├── list [--search TEXT]
//! │   ├── show NUMBER [--locale] [--json]
//! │   ├── delete NUMBER
//! │   ├── next [--from NUMBER]
//! │   └── new
//! └── pricing
//!     ├── show [--locale] [--json]
//!     ├── validate [--file FILE]
//!     ├── import --file FILE
//!     ├── reset
//!     ├── item TARGET [--model] [--multiplier]
//!     ├── tier add|remove|set
//!     └── extra add|set|remove
//! ```
//!
//! Every handler gets a [`Context`] holding the loaded [`AppConfig`] and an
//! open [`Database`].

use std::fs;
use std::path::Path;

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::debug;
use tripquote_db::{Database, DbConfig};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

mod pricing;
mod quote;

#[derive(Debug, Parser)]
#[command(name = "tripquote", version, about = "Tiered trip-quote pricing", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Calculate, save and browse quotes
    Quote(quote::QuoteCommand),
    /// Inspect and edit the pricing configuration
    Pricing(pricing::PricingCommand),
}

/// Shared state for command handlers.
pub struct Context {
    pub config: AppConfig,
    pub db: Database,
}

impl Cli {
    pub async fn run(self, config: AppConfig) -> CliResult<()> {
        let db = Database::new(DbConfig::new(&config.db_path)).await?;
        let ctx = Context { config, db };

        let result = match self.command {
            Commands::Quote(command) => quote::run(command, &ctx).await,
            Commands::Pricing(command) => pricing::run(command, &ctx).await,
        };

        ctx.db.close().await;
        result
    }
}

/// Reads a whole file as text.
pub(crate) fn read_text(path: &Path) -> CliResult<String> {
    debug!(path = %path.display(), "Reading file");
    fs::read_to_string(path).map_err(|e| CliError::io(path, e))
}

/// Reads and deserializes a JSON file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Prints a value as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_nested_commands() {
        let cli = Cli::try_parse_from(["tripquote", "pricing", "tier", "set", "dinner", "1", "--open"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["tripquote", "quote", "calculate", "--quote", "q.json", "--locale", "de"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["tripquote", "pricing", "tier", "add", "hotel.palace"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_read_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<serde_json::Value>(&path).unwrap_err();
        assert!(matches!(err, CliError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));

        let missing = read_text(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, CliError::Io { .. }));
    }
}
