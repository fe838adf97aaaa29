//! # CLI Error Type
//!
//! Unified error type for `tripquote` commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in tripquote                              │
//! │                                                                         │
//! │  Command handler ── Result<T, CliError>                                │
//! │       │                                                                 │
//! │       ├── CoreError::NoTierMatch ──────┐                               │
//! │       ├── DbError::QuoteNumberExists ──┤                               │
//! │       ├── ConfigError::InvalidValue ───┼──► CliError ──► main()        │
//! │       └── io / JSON file errors ───────┘        │                      │
//! │                                                 ▼                      │
//! │                              error!(code = "NO_TIER_MATCH", ...)       │
//! │                              stderr: "error: No pricing tier for ..."  │
//! │                              exit status 1                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tripquote_core::{ConfigReport, CoreError};
use tripquote_db::DbError;

use crate::config::ConfigError;

/// Errors a command can end with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A pricing configuration file failed the contract check.
    #[error("Invalid pricing configuration: {0}")]
    InvalidConfig(ConfigReport),

    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Cannot write JSON output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Machine-readable error codes, logged with every failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidInput,
    NoTierMatch,
    NotFound,
    AmountOverflow,
    QuoteNumberExists,
    InvalidConfig,
    Configuration,
    Io,
    Storage,
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::NoTierMatch => "NO_TIER_MATCH",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::AmountOverflow => "AMOUNT_OVERFLOW",
            ErrorCode::QuoteNumberExists => "QUOTE_NUMBER_EXISTS",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::Configuration => "CONFIGURATION",
            ErrorCode::Io => "IO",
            ErrorCode::Storage => "STORAGE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl From<&CoreError> for ErrorCode {
    fn from(err: &CoreError) -> Self {
        match err {
            CoreError::InvalidInput(_) => ErrorCode::InvalidInput,
            CoreError::NoTierMatch { .. } => ErrorCode::NoTierMatch,
            CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::AmountOverflow { .. } => ErrorCode::AmountOverflow,
        }
    }
}

impl CliError {
    /// Wraps an I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Core(e) => ErrorCode::from(e),
            CliError::Db(e) => match e {
                DbError::Core(core) => ErrorCode::from(core),
                DbError::NotFound { .. } => ErrorCode::NotFound,
                DbError::QuoteNumberExists(_) => ErrorCode::QuoteNumberExists,
                DbError::InvalidConfig(_) => ErrorCode::InvalidConfig,
                DbError::Serialization(_) | DbError::Internal(_) => ErrorCode::Internal,
                _ => ErrorCode::Storage,
            },
            CliError::Config(_) => ErrorCode::Configuration,
            CliError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            CliError::Io { .. } | CliError::Parse { .. } => ErrorCode::Io,
            CliError::Output(_) => ErrorCode::Internal,
        }
    }
}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

// =============================================================================
// Unit Tests
// =============================================================================
