//! # Report Rows
//!
//! The presentation view of a [`CalculatedQuote`], as printed on a quote
//! document or in the terminal.
//!
//! ## Differences From Line Items
//! ```text
//! LineItem                                ReportRow
//! ────────                                ─────────
//! qty = people × nights (hotel)    ──►    qty = round(qty / people)
//! "tier 1-9 people, per person, …" ──►    "per person, …"
//! ```
//!
//! Hotel quantities are shown as an approximate number of nights, and the
//! tier range is dropped from the notes. Nothing else changes; amounts are
//! copied as-is.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::notes::{commission_title, strip_tier_prefix};
use crate::types::{CalculatedQuote, Locale, Percentage, QuoteInput};

/// One printable row of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub key: String,
    pub title: String,
    pub notes: String,
    #[ts(type = "number")]
    pub qty: u64,
    #[ts(type = "number")]
    pub unit_price: Money,
    #[ts(type = "number")]
    pub subtotal: Money,
}

/// One printable commission line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CommissionRow {
    pub key: String,
    pub title: String,
    #[ts(type = "number")]
    pub rate_pct: Percentage,
    #[ts(type = "number")]
    pub amount: Money,
}

/// Everything a quote document prints below the header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteReport {
    pub rows: Vec<ReportRow>,
    #[ts(type = "number")]
    pub base_total: Money,
    pub commissions: Vec<CommissionRow>,
    #[ts(type = "number")]
    pub total: Money,
    #[ts(type = "number")]
    pub per_traveller_total: Money,
}

/// Quantity as shown on the report.
///
/// Accommodation rows are divided back by the traveller count (rounded,
/// halves up); other rows keep their quantity.
pub fn display_qty(key: &str, qty: u64, people_count: u32) -> u64 {
    if key.starts_with("hotel_") && people_count > 0 {
        let people = u64::from(people_count);
        let (whole, rest) = (qty / people, qty % people);
        whole + u64::from(2 * rest >= people)
    } else {
        qty
    }
}

/// Builds the printable rows for a calculated quote.
pub fn report_rows(quote: &QuoteInput, calculated: &CalculatedQuote) -> Vec<ReportRow> {
    calculated
        .items
        .iter()
        .map(|item| ReportRow {
            key: item.key.clone(),
            title: item.title.clone(),
            notes: strip_tier_prefix(&item.pricing_notes).to_string(),
            qty: display_qty(&item.key, item.qty, quote.people_count),
            unit_price: item.unit_price,
            subtotal: item.subtotal,
        })
        .collect()
}

/// Grand total divided by the traveller count, rounded to cents.
pub fn per_traveller_total(quote: &QuoteInput, calculated: &CalculatedQuote) -> Money {
    calculated.total.divide_round(quote.people_count)
}

/// Builds the full printable view of a calculated quote.
pub fn build_report(quote: &QuoteInput, calculated: &CalculatedQuote, locale: Locale) -> QuoteReport {
    QuoteReport {
        rows: report_rows(quote, calculated),
        base_total: calculated.base_total,
        commissions: calculated
            .commission_items
            .iter()
            .map(|item| CommissionRow {
                key: item.key.clone(),
                title: commission_title(&item.key, locale).to_string(),
                rate_pct: item.rate_pct,
                amount: item.amount,
            })
            .collect(),
        total: calculated.total,
        per_traveller_total: per_traveller_total(quote, calculated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::calculate_quote;
    use crate::types::PricingConfig;
    use chrono::NaiveDate;

    #[test]
    fn test_display_qty() {
        assert_eq!(display_qty("hotel_budget", 8, 2), 4);
        assert_eq!(display_qty("hotel_luxury", 3, 2), 2);
        assert_eq!(display_qty("hotel_luxury", 0, 3), 0);
        assert_eq!(display_qty("dinner", 8, 2), 8);
        assert_eq!(display_qty("hotel_budget", 100_000 * 99_999, 100_000), 99_999);
    }

    #[test]
    fn test_report_for_calculated_quote() {
        let mut quote = QuoteInput::draft("Q-2026-004", NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        quote.people_count = 3;
        quote.days = 4;
        quote.dinner_included = true;
        quote.jinn_commission_pct = Percentage::from_pct(10.0);

        let calculated = calculate_quote(&quote, &PricingConfig::default(), Locale::En).unwrap();
        let report = build_report(&quote, &calculated, Locale::En);

        assert_eq!(report.rows[0].qty, 3);
        assert_eq!(report.rows[0].notes, "per night");
        assert_eq!(report.rows[1].qty, 12);
        assert_eq!(report.rows[1].notes, "per person, per day");
        assert_eq!(report.commissions[0].title, "Jinn commission");

        // 3×3×60 + 12×35 = 960; +10% = 1056; /3 = 352
        assert_eq!(report.total.cents(), 105_600);
        assert_eq!(report.per_traveller_total.cents(), 35_200);
    }
}
