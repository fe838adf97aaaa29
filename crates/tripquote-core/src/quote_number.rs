//! # Quote Numbering
//!
//! Quote identifiers look like `Q-2026-018`: a `Q` prefix, a four-digit
//! year and a per-year sequence.
//!
//! ## Sequencing
//! ```text
//! Q-2026-018 ──next──► Q-2026-019
//! Q-2026-999 ──next──► Q-2027-001     (sequence rolls into next year)
//! INVALID    ──next──► INVALID        (free-form numbers pass through)
//! ```
//!
//! The sequencer never fails: operators sometimes type legacy or free-form
//! identifiers, and those are kept exactly as typed.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Highest sequence number within a year before rolling over.
pub const MAX_SEQUENCE: u32 = 999;

/// A parsed `Q-YYYY-NNN` identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuoteNumber {
    year: u32,
    sequence: u32,
}

impl QuoteNumber {
    /// Creates a quote number from its parts.
    pub const fn new(year: u32, sequence: u32) -> Self {
        QuoteNumber { year, sequence }
    }

    /// The first number of a year (`Q-YYYY-001`).
    pub const fn first_of_year(year: u32) -> Self {
        QuoteNumber { year, sequence: 1 }
    }

    pub const fn year(&self) -> u32 {
        self.year
    }

    pub const fn sequence(&self) -> u32 {
        self.sequence
    }

    /// The number issued after this one.
    ///
    /// Past [`MAX_SEQUENCE`] the sequence restarts at 1 in the next year.
    pub fn next(&self) -> Self {
        let sequence = self.sequence.saturating_add(1);
        if sequence > MAX_SEQUENCE {
            QuoteNumber {
                year: self.year.saturating_add(1),
                sequence: 1,
            }
        } else {
            QuoteNumber {
                year: self.year,
                sequence,
            }
        }
    }
}

impl fmt::Display for QuoteNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q-{}-{:03}", self.year, self.sequence)
    }
}

impl FromStr for QuoteNumber {
    type Err = ValidationError;

    /// Parses `Q-YYYY-N...`: case-insensitive prefix, exactly four year
    /// digits, one or more sequence digits. Nothing else may surround it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "quoteNumber".to_string(),
            reason: reason.to_string(),
        };

        let rest = s
            .strip_prefix("Q-")
            .or_else(|| s.strip_prefix("q-"))
            .ok_or_else(|| invalid("expected Q-YYYY-NNN"))?;
        let (year, sequence) = rest
            .split_once('-')
            .ok_or_else(|| invalid("expected Q-YYYY-NNN"))?;

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || !all_digits(year) {
            return Err(invalid("year must be exactly four digits"));
        }
        if !all_digits(sequence) {
            return Err(invalid("sequence must be digits"));
        }

        let year = year.parse().map_err(|_| invalid("year out of range"))?;
        // Digits only, so a failed parse means overflow: saturate, which
        // still sorts above every real sequence and rolls over on next().
        let sequence = sequence.parse().unwrap_or(u32::MAX);
        Ok(QuoteNumber { year, sequence })
    }
}

/// Computes the identifier that follows `current`.
///
/// Input that is not a `Q-YYYY-NNN` number is returned unchanged.
///
/// ## Example
/// ```rust
/// use tripquote_core::quote_number::next_quote_number;
///
/// assert_eq!(next_quote_number("Q-2026-018"), "Q-2026-019");
/// assert_eq!(next_quote_number("Q-2026-999"), "Q-2027-001");
/// assert_eq!(next_quote_number("q-2026-7"), "Q-2026-008");
/// assert_eq!(next_quote_number("INVALID"), "INVALID");
/// ```
pub fn next_quote_number(current: &str) -> String {
    match current.parse::<QuoteNumber>() {
        Ok(number) => number.next().to_string(),
        Err(_) => current.to_string(),
    }
}
