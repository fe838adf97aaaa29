//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A quote sums dozens of line items and then stacks commissions on      │
//! │  top. Every intermediate figure must already be a whole cent, or the   │
//! │  printed breakdown stops adding up to the printed total.               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Prices enter as JSON numbers and are rounded to cents ONCE, on      │
//! │    the way in. Sums and quantity products stay integer (checked);      │
//! │    a commission rate is applied once and rounded back to a cent.       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Collaborators exchange amounts as JSON numbers in major units
//! (`125.5` = €125.50). `Money` serializes to and deserializes from that
//! representation, rounding to the cent on the way in.
//!
//! ## Usage
//! ```rust
//! use tripquote_core::money::Money;
//!
//! let price = Money::from_cents(12550); // €125.50
//! let subtotal = price.checked_multiply_quantity(4);
//! assert_eq!(subtotal, Some(Money::from_cents(50200)));
//!
//! // The round2 operation: nearest cent, half away from zero
//! assert_eq!(Money::round_from(19.999).cents(), 2000);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::types::{Locale, Percentage};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic never needs a second type for differences
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Custom serde**: JSON carries major units, memory carries cents
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Tier.price ──► LineItem.unitPrice ──► LineItem.subtotal               │
/// │                                              │                          │
/// │                                              ▼                          │
/// │                                   CalculatedQuote.baseTotal             │
/// │                                              │                          │
/// │                         ┌────────────────────┴──────────┐              │
/// │                         ▼                               ▼              │
/// │              CommissionItem.amount ──► commissionTotal ──► total       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a major-unit amount to the nearest cent (the round2 operation).
    ///
    /// Halves round away from zero, so `0.125` becomes `0.13`.
    ///
    /// ## Example
    /// ```rust
    /// use tripquote_core::money::Money;
    ///
    /// assert_eq!(Money::round_from(125.5).cents(), 12550);
    /// assert_eq!(Money::round_from(0.125).cents(), 13);
    /// ```
    pub fn round_from(major: f64) -> Self {
        Money((major * 100.0).round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (euros).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value in major units, for serialization and display only.
    #[inline]
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// Exact: a cent amount times a whole quantity is still whole cents.
    /// Returns `None` when the product does not fit in the cent range.
    ///
    /// ## Example
    /// ```rust
    /// use tripquote_core::money::Money;
    ///
    /// let per_night = Money::from_cents(8000);
    /// assert_eq!(per_night.checked_multiply_quantity(12), Some(Money::from_cents(96000)));
    /// assert_eq!(per_night.checked_multiply_quantity(u64::MAX), None);
    /// ```
    pub fn checked_multiply_quantity(&self, qty: u64) -> Option<Self> {
        let qty = i64::try_from(qty).ok()?;
        self.0.checked_mul(qty).map(Money)
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Calculates `round2(self × rate / 100)`.
    ///
    /// The rate is applied at full precision; only the result is rounded to
    /// the nearest cent, halves away from zero. Returns `None` when the
    /// result is not finite or does not fit in the cent range.
    ///
    /// ## Example
    /// ```rust
    /// use tripquote_core::money::Money;
    /// use tripquote_core::types::Percentage;
    ///
    /// let base = Money::from_cents(100_000); // €1000.00
    /// let fee = base.percentage(Percentage::from_pct(12.5));
    /// assert_eq!(fee, Some(Money::from_cents(12_500)));
    /// ```
    pub fn percentage(&self, rate: Percentage) -> Option<Money> {
        let cents = (self.to_major() * (rate.pct() / 100.0) * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
        if !cents.is_finite() || cents >= i64::MAX as f64 || cents < i64::MIN as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Divides by a count, rounding to the nearest cent.
    ///
    /// Used for per-traveller figures. A zero divisor returns the amount
    /// unchanged.
    pub fn divide_round(&self, divisor: u32) -> Money {
        if divisor == 0 {
            return *self;
        }
        let divisor = divisor as i128;
        let value = self.0 as i128;
        let rounded = (value.abs() * 2 + divisor) / (2 * divisor);
        Money::from_cents((rounded * value.signum()) as i64)
    }

    /// Formats the amount for a locale with the given currency symbol.
    ///
    /// ```text
    /// en: €1,234.50   -€3.00
    /// de: 1.234,50 €  -3,00 €
    /// ```
    pub fn format(&self, locale: Locale, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let (group, decimal) = match locale {
            Locale::En => (',', '.'),
            Locale::De => ('.', ','),
        };
        let whole = group_thousands(self.major().unsigned_abs(), group);
        match locale {
            Locale::En => format!("{sign}{symbol}{whole}{decimal}{:02}", self.minor()),
            Locale::De => format!("{sign}{whole}{decimal}{:02} {symbol}", self.minor()),
        }
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation for logs and debugging.
///
/// Use [`Money::format`] for anything an operator reads.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}€{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom("amount must be a finite number"));
        }
        Ok(Money::round_from(value))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_round_from_half_away_from_zero() {
        assert_eq!(Money::round_from(10.0).cents(), 1000);
        assert_eq!(Money::round_from(0.125).cents(), 13);
        assert_eq!(Money::round_from(99.994).cents(), 9999);
        assert_eq!(Money::round_from(-0.125).cents(), -13);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "€10.99");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-€5.50");
        assert_eq!(format!("{}", Money::zero()), "€0.00");
    }

    #[test]
    fn test_format_by_locale() {
        let amount = Money::from_cents(123_450);
        assert_eq!(amount.format(Locale::En, "€"), "€1,234.50");
        assert_eq!(amount.format(Locale::De, "€"), "1.234,50 €");
        assert_eq!(Money::from_cents(-300).format(Locale::De, "€"), "-3,00 €");
        assert_eq!(
            Money::from_cents(123_456_789).format(Locale::En, "€"),
            "€1,234,567.89"
        );
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3u32).cents(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    fn pct_of(amount: Money, rate: f64) -> i64 {
        amount.percentage(Percentage::from_pct(rate)).unwrap().cents()
    }

    #[test]
    fn test_percentage() {
        let base = Money::from_cents(100_000);
        assert_eq!(pct_of(base, 10.0), 10_000);
        assert_eq!(pct_of(base, 5.0), 5_000);

        // €10.05 at 5% = €0.5025 → €0.50
        assert_eq!(pct_of(Money::from_cents(1005), 5.0), 50);

        // €0.10 at 5% = €0.005 → €0.01 (half rounds up)
        assert_eq!(pct_of(Money::from_cents(10), 5.0), 1);

        // €480.00 at 12.345% = €59.256 → €59.26
        assert_eq!(pct_of(Money::from_cents(48_000), 12.345), 5_926);
    }

    #[test]
    fn test_percentage_out_of_range() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!(huge.percentage(Percentage::from_pct(500.0)), None);
        assert_eq!(Money::from_cents(100).percentage(Percentage::from_pct(f64::MAX)), None);
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Money::from_cents(6_000);
        assert_eq!(
            price.checked_multiply_quantity(10_000_000_000),
            Some(Money::from_cents(60_000_000_000_000))
        );
        assert_eq!(Money::from_cents(i64::MAX / 2).checked_multiply_quantity(3), None);
        assert_eq!(price.checked_multiply_quantity(u64::MAX), None);

        assert_eq!(price.checked_add(price), Some(Money::from_cents(12_000)));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_divide_round() {
        assert_eq!(Money::from_cents(1000).divide_round(3).cents(), 333);
        assert_eq!(Money::from_cents(1001).divide_round(2).cents(), 501);
        assert_eq!(Money::from_cents(1000).divide_round(0).cents(), 1000);
    }

    #[test]
    fn test_serde_uses_major_units() {
        let money: Money = serde_json::from_str("125.5").unwrap();
        assert_eq!(money.cents(), 12550);

        let money: Money = serde_json::from_str("40").unwrap();
        assert_eq!(money.cents(), 4000);

        assert_eq!(serde_json::to_string(&Money::from_cents(12550)).unwrap(), "125.5");
    }
}
