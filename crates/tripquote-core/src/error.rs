//! # Error Types
//!
//! Domain-specific error types for tripquote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tripquote-core errors (this file)                                     │
//! │  ├── CoreError        - Calculation and editing failures               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tripquote-db errors (separate crate)                                  │
//! │  └── DbError          - Persistence failures                           │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → CliError → Terminal     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Not Errors
//! Some conditions look like failures but are deliberate no-ops:
//! - A selected extra whose id is not in the pricing config is skipped.
//! - A commission rate of zero or less is omitted from the output.
//! - Tier-ladder gaps and overlaps are reported by
//!   [`crate::tiers::validate_tiers`], never raised during calculation.
//! - A malformed quote number is passed through by the sequencer.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// A calculation that fails produces no partial quote; callers should show
/// "no valid quote" rather than guess at defaults.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Quote parameters are out of range (`INVALID_INPUT`).
    ///
    /// ## When This Occurs
    /// - `peopleCount < 1`
    /// - `days < 1`
    ///
    /// Raised before any tier lookup is attempted.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// No tier covers the traveller count for an included component
    /// (`NO_TIER_MATCH`).
    ///
    /// ## User Workflow
    /// ```text
    /// Quote form (people: 25, dinner: yes)
    ///      │
    ///      ▼
    /// Dinner ladder: 1-10, 11-20
    ///      │
    ///      ▼
    /// NoTierMatch { component: "dinner", people_count: 25 }
    ///      │
    ///      ▼
    /// UI shows: "No pricing tier for dinner and 25 people"
    /// ```
    #[error("No pricing tier for {component} and {people_count} people")]
    NoTierMatch {
        component: String,
        people_count: u32,
    },

    /// An editing operation referenced something that does not exist.
    ///
    /// ## When This Occurs
    /// - Tier index past the end of a ladder
    /// - Extra service or selected extra id that is not present
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// An amount does not fit in the cent range (`AMOUNT_OVERFLOW`).
    ///
    /// ## When This Occurs
    /// - `qty × unitPrice` of a line item
    /// - the base total, a commission or the final total
    ///
    /// Quantities themselves are exact; only money can overflow.
    #[error("Amount too large for {item}")]
    AmountOverflow { item: String },
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates an AmountOverflow error for the named line or total.
    pub fn overflow(item: impl Into<String>) -> Self {
        CoreError::AmountOverflow { item: item.into() }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::InvalidInput(_) => "INVALID_INPUT",
            CoreError::NoTierMatch { .. } => "NO_TIER_MATCH",
            CoreError::NotFound { .. } => "NOT_FOUND",
            CoreError::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value must be at least one.
    #[error("{field} must be at least 1")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed quote number, malformed date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::NoTierMatch {
            component: "dinner".to_string(),
            people_count: 25,
        };
        assert_eq!(err.to_string(), "No pricing tier for dinner and 25 people");
        assert_eq!(err.code(), "NO_TIER_MATCH");

        let err = CoreError::overflow("extra_transfer");
        assert_eq!(err.to_string(), "Amount too large for extra_transfer");
        assert_eq!(err.code(), "AMOUNT_OVERFLOW");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "peopleCount".to_string(),
        };
        assert_eq!(err.to_string(), "peopleCount must be at least 1");

        let err = ValidationError::InvalidFormat {
            field: "quoteNumber".to_string(),
            reason: "expected Q-YYYY-NNN".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "quoteNumber has invalid format: expected Q-YYYY-NNN"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "days".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::InvalidInput(_)));
        assert_eq!(core_err.code(), "INVALID_INPUT");
    }
}
