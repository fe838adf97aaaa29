//! # Commission Engine
//!
//! Stacks percentage commissions on top of a quote's base total.
//!
//! ## Stacking
//! ```text
//! baseTotal ─┬─► local agency  (rate₁ × baseTotal) ─┐
//!            │                                       ├─► commissionTotal
//!            └─► jinn          (rate₂ × baseTotal) ─┘
//!
//! total = baseTotal + commissionTotal
//! ```
//!
//! Every rate applies to `baseTotal`; commissions never compound on each
//! other or on the running total.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CommissionItem, Percentage, QuoteInput};

/// Key of the local agency commission.
pub const LOCAL_AGENCY_KEY: &str = "commission_local_agency";

/// Key of the platform (Jinn) commission.
pub const JINN_KEY: &str = "commission_jinn";

/// The result of stacking commissions on a base total.
#[derive(Debug, Clone, PartialEq)]
pub struct CommissionSummary {
    pub items: Vec<CommissionItem>,
    pub commission_total: Money,
    pub total: Money,
}

/// Translation key for a commission key.
pub fn commission_title_key(key: &str) -> &'static str {
    match key {
        LOCAL_AGENCY_KEY => "labels.localAgencyCommission",
        JINN_KEY => "labels.jinnCommission",
        _ => "",
    }
}

/// Applies the commission rates, in order, to `base_total`.
///
/// A rate of zero or less is omitted; it does not become a zero item.
/// Any positive rate, however small, produces an item.
///
/// ## Errors
/// [`CoreError::AmountOverflow`] when a commission or the total does not fit
/// in the cent range.
///
/// ## Example
/// ```rust
/// use tripquote_core::commission::apply_commissions;
/// use tripquote_core::money::Money;
/// use tripquote_core::types::Percentage;
///
/// let summary = apply_commissions(
///     Money::from_cents(100_000),
///     &[
///         ("commission_local_agency", Percentage::from_pct(10.0)),
///         ("commission_jinn", Percentage::from_pct(5.0)),
///     ],
/// )
/// .unwrap();
/// assert_eq!(summary.commission_total.cents(), 15_000);
/// assert_eq!(summary.total.cents(), 115_000);
/// ```
pub fn apply_commissions(base_total: Money, rates: &[(&str, Percentage)]) -> CoreResult<CommissionSummary> {
    let items = rates
        .iter()
        .filter(|(_, rate)| rate.is_positive())
        .map(|&(key, rate)| {
            let amount = base_total
                .percentage(rate)
                .ok_or_else(|| CoreError::overflow(key))?;
            Ok(CommissionItem {
                key: key.to_string(),
                title_key: commission_title_key(key).to_string(),
                rate_pct: rate,
                amount,
            })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    let commission_total = items
        .iter()
        .try_fold(Money::zero(), |sum, item| sum.checked_add(item.amount))
        .ok_or_else(|| CoreError::overflow("commissionTotal"))?;
    let total = base_total
        .checked_add(commission_total)
        .ok_or_else(|| CoreError::overflow("total"))?;

    Ok(CommissionSummary {
        items,
        commission_total,
        total,
    })
}

/// Applies a quote's local agency and Jinn commissions, in that order.
pub fn quote_commissions(quote: &QuoteInput, base_total: Money) -> CoreResult<CommissionSummary> {
    apply_commissions(
        base_total,
        &[
            (LOCAL_AGENCY_KEY, quote.local_agency_commission_pct),
            (JINN_KEY, quote.jinn_commission_pct),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn quote(local: f64, jinn: f64) -> QuoteInput {
        let mut quote = QuoteInput::draft("Q-2026-001", NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        quote.local_agency_commission_pct = Percentage::from_pct(local);
        quote.jinn_commission_pct = Percentage::from_pct(jinn);
        quote
    }

    #[test]
    fn test_commissions_do_not_compound() {
        let summary = quote_commissions(&quote(10.0, 5.0), Money::from_cents(100_000)).unwrap();

        let amounts: Vec<i64> = summary.items.iter().map(|i| i.amount.cents()).collect();
        assert_eq!(amounts, vec![10_000, 5_000]);
        assert_eq!(summary.items[0].key, LOCAL_AGENCY_KEY);
        assert_eq!(summary.items[0].title_key, "labels.localAgencyCommission");
        assert_eq!(summary.items[1].key, JINN_KEY);
        assert_eq!(summary.items[1].title_key, "labels.jinnCommission");
        assert_eq!(summary.commission_total.cents(), 15_000);
        assert_eq!(summary.total.cents(), 115_000);
    }

    #[test]
    fn test_zero_and_negative_rates_are_omitted() {
        let summary = quote_commissions(&quote(0.0, -4.0), Money::from_cents(50_000)).unwrap();
        assert!(summary.items.is_empty());
        assert_eq!(summary.commission_total, Money::zero());
        assert_eq!(summary.total.cents(), 50_000);

        let summary = quote_commissions(&quote(-1.0, 7.5), Money::from_cents(50_000)).unwrap();
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.items[0].key, JINN_KEY);
        assert_eq!(summary.items[0].amount.cents(), 3_750);
    }

    #[test]
    fn test_amounts_round_to_cents() {
        // 333.33 × 12.5% = 41.66625
        let summary = quote_commissions(&quote(12.5, 0.0), Money::from_cents(33_333)).unwrap();
        assert_eq!(summary.items[0].amount.cents(), 4_167);
        assert_eq!(summary.total.cents(), 37_500);
    }

    #[test]
    fn test_rate_is_applied_unrounded() {
        let summary = quote_commissions(&quote(12.345, 0.0), Money::from_cents(48_000)).unwrap();
        assert_eq!(summary.items[0].rate_pct, Percentage::from_pct(12.345));
        assert_eq!(summary.items[0].amount.cents(), 5_926);

        let json = serde_json::to_value(&summary.items[0]).unwrap();
        assert_eq!(json["ratePct"], serde_json::json!(12.345));
        assert_eq!(json["amount"], serde_json::json!(59.26));
    }

    #[test]
    fn test_tiny_positive_rate_still_produces_item() {
        let summary = quote_commissions(&quote(0.0, 0.004), Money::from_cents(48_000)).unwrap();
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.items[0].key, JINN_KEY);
        assert_eq!(summary.items[0].rate_pct.pct(), 0.004);
        // 480.00 × 0.004% = 0.0192
        assert_eq!(summary.items[0].amount.cents(), 2);
        assert_eq!(summary.total.cents(), 48_002);
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let err = quote_commissions(&quote(60.0, 60.0), Money::from_cents(i64::MAX / 2)).unwrap_err();
        assert_eq!(err.code(), "AMOUNT_OVERFLOW");
    }
}
