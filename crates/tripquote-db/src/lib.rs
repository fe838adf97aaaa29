//! # tripquote-db: Persistence Layer for TripQuote
//!
//! This crate stores the pricing configuration and the saved-quote registry.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        TripQuote Data Flow                              │
//! │                                                                         │
//! │  CLI command (tripquote quote save)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tripquote-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │  │   │
//! │  │   │               │    │ PricingConfig  │   │              │  │   │
//! │  │   │ SqlitePool    │◄───│ SavedQuote     │   │ 001_init.sql │  │   │
//! │  │   └───────▲───────┘    └────────────────┘   └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  │   ┌───────┴───────┐                                             │   │
//! │  │   │   AutoSaver   │  debounced pricing saves (tokio task)      │   │
//! │  │   └───────────────┘                                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ./data/tripquote.db (TRIPQUOTE_DB_PATH)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Pricing config and saved-quote repositories
//! - [`autosave`] - Debounced pricing auto-save task
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tripquote_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./data/tripquote.db")).await?;
//!
//! let pricing = db.pricing().load().await?;
//! let number = db.quotes().next_quote_number(today).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod autosave;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use autosave::{AutoSaveHandle, AutoSaver, ConfigSink, DEFAULT_AUTOSAVE_DELAY};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::pricing::PricingConfigRepository;
pub use repository::quote::{quote_file_key, SavedQuote, SavedQuoteRepository, SavedQuoteSummary};
