//! # Repository Module
//!
//! Database repository implementations for TripQuote.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI command / AutoSaver                                               │
//! │       │                                                                 │
//! │       │  db.pricing().save(&config)                                    │
//! │       ▼                                                                 │
//! │  PricingConfigRepository          SavedQuoteRepository                 │
//! │  ├── load()                       ├── save(&quote, &pricing)           │
//! │  ├── save(&config)                ├── list(search)                     │
//! │  ├── save_section(target, &cfg)   ├── get(number) / delete(number)     │
//! │  └── reset()                      └── next_quote_number(today)         │
//! │       │                                                                 │
//! │       │  SQL (documents stored as JSON text)                           │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`PricingConfigRepository`] - The single current pricing configuration
//! - [`SavedQuoteRepository`] - Registry of saved quotes

pub mod pricing;
pub mod quote;

pub use pricing::PricingConfigRepository;
pub use quote::{quote_file_key, SavedQuote, SavedQuoteRepository, SavedQuoteSummary};
