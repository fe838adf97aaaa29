//! # tripquote-core: Pure Pricing Logic for TripQuote
//!
//! This crate is the **heart** of TripQuote. It turns a tiered pricing
//! configuration and a quote's parameters into priced line items, stacked
//! commissions and a grand total, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        TripQuote Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    tripquote CLI (apps/cli)                     │   │
//! │  │   quote calculate / save / list    pricing show / tier / extra  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ tripquote-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   tiers   │  │  pricing  │  │commission │  │quote_numbr│  │   │
//! │  │   │ resolve   │  │ calculate │  │  stacking │  │   next    │  │   │
//! │  │   │ validate  │  │   quote   │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO LOGGING • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tripquote-db (Storage Layer)                    │   │
//! │  │       pricing config, saved quotes, debounced auto-save         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Pricing configuration, quote input and calculation output
//! - [`money`] - Money type with integer-cent arithmetic
//! - [`tiers`] - Tier lookup (first match) and ladder validation (sorted)
//! - [`pricing`] - The quote calculator
//! - [`commission`] - Non-compounding commission stacking
//! - [`quote_number`] - `Q-YYYY-NNN` sequencing
//! - [`validation`] - Quote input checks and the pricing config contract
//! - [`editor`] / [`draft`] - Pure edits from the pricing editor and quote form
//! - [`report`] - Printable rows for a calculated quote
//! - [`notes`] - Localized labels and pricing notes
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Same config + quote + locale = same result
//! 2. **No I/O**: Storage, files and clocks live in other crates
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tripquote_core::{calculate_quote, Locale, Percentage, PricingConfig, QuoteInput};
//!
//! let mut quote = QuoteInput::draft("Q-2026-001", NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
//! quote.people_count = 2;
//! quote.days = 5;
//! quote.local_agency_commission_pct = Percentage::from_pct(10.0);
//!
//! let result = calculate_quote(&quote, &PricingConfig::default(), Locale::En).unwrap();
//!
//! // 2 travellers × 4 nights × €60.00, plus 10%
//! assert_eq!(result.base_total.cents(), 48_000);
//! assert_eq!(result.total.cents(), 52_800);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod commission;
pub mod draft;
pub mod editor;
pub mod error;
pub mod money;
pub mod notes;
pub mod pricing;
pub mod quote_number;
pub mod report;
pub mod tiers;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::calculate_quote;
pub use quote_number::{next_quote_number, QuoteNumber};
pub use tiers::{resolve_tier, validate_tiers, TierDefect};
pub use types::*;
pub use validation::{check_pricing_config, parse_pricing_config, ConfigDefect, ConfigReport};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency symbol used when none is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "€";
