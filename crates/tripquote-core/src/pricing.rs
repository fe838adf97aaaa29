//! # Pricing Calculator
//!
//! Turns a [`PricingConfig`] and a [`QuoteInput`] into a [`CalculatedQuote`].
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        calculate_quote()                                │
//! │                                                                         │
//! │  1. validate_quote_input ── peopleCount ≥ 1, days ≥ 1 ──► INVALID_INPUT │
//! │                                                                         │
//! │  2. Line items, in this order:                                         │
//! │     hotel_{grade}   always          time = nights = days - 1           │
//! │     dinner          if included     time = days                        │
//! │     guide           if included     time = min(days, guideDays)        │
//! │     flight          if included     time = days                        │
//! │     extra_{id}...   selected order  unknown ids skipped                │
//! │                                                                         │
//! │     qty      = people factor × time factor    (exact, u64)            │
//! │     subtotal = qty × unitPrice                                         │
//! │     (no tier for an included component ──► NO_TIER_MATCH)             │
//! │     (subtotal or total past the cent range ──► AMOUNT_OVERFLOW)        │
//! │                                                                         │
//! │  3. baseTotal = Σ subtotal                                             │
//! │                                                                         │
//! │  4. commission::quote_commissions(baseTotal) ──► total                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Prices are held in whole cents from the moment they are read, so every
//! product of a price and an integer quantity is already cent-exact. The
//! only rounding left happens in commission percentages.
//!
//! ## Multipliers
//! The time factor is only applied when the component's multiplier is
//! `per_day`; `per_trip` and `per_piece` components count once. The people
//! factor is `peopleCount` for `per_person` and `1` for `per_group`.

use crate::commission::quote_commissions;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::notes::{component_title, extra_note, hotel_title, hotel_title_key, night_label, tiered_note};
use crate::tiers::resolve_tier;
use crate::types::{
    CalculatedQuote, ExtraService, LineItem, Locale, Multiplier, PricedItemConfig, PricingConfig,
    PricingModel, QuoteInput, SelectedExtra,
};
use crate::validation::validate_quote_input;

/// Calculates a priced quote.
///
/// ## Errors
/// * [`CoreError::InvalidInput`] - `peopleCount` or `days` is zero; no tier
///   lookup is attempted
/// * [`CoreError::NoTierMatch`] - an included component has no tier for the
///   traveller count; no partial quote is returned
/// * [`CoreError::AmountOverflow`] - a subtotal or total does not fit in the
///   cent range
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use tripquote_core::pricing::calculate_quote;
/// use tripquote_core::types::{Locale, PricingConfig, QuoteInput};
///
/// let mut quote = QuoteInput::draft("Q-2026-001", NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
/// quote.people_count = 2;
/// quote.days = 5;
///
/// let result = calculate_quote(&quote, &PricingConfig::default(), Locale::En).unwrap();
/// // Budget hotel: 2 people × 4 nights × €60.00
/// assert_eq!(result.items[0].qty, 8);
/// assert_eq!(result.total.cents(), 48_000);
/// ```
pub fn calculate_quote(
    quote: &QuoteInput,
    config: &PricingConfig,
    locale: Locale,
) -> CoreResult<CalculatedQuote> {
    validate_quote_input(quote)?;

    let mut items = Vec::with_capacity(4 + quote.selected_extras.len());

    let grade = quote.hotel_tier;
    let nights = quote.days.saturating_sub(1);
    let mut hotel = price_component(
        &format!("hotel_{}", grade.as_str()),
        config.hotel.grade(grade),
        quote.people_count,
        nights,
        locale,
    )?;
    hotel.title_key = Some(hotel_title_key(grade));
    hotel.title = hotel_title(grade, locale).to_string();
    hotel.pricing_notes = night_label(locale).to_string();
    items.push(hotel);

    if quote.dinner_included {
        items.push(built_in_item("dinner", &config.dinner, quote.people_count, quote.days, locale)?);
    }

    if quote.guide_included {
        let days = if config.guide.multiplier == Multiplier::PerDay {
            guide_days(quote)
        } else {
            quote.days
        };
        items.push(built_in_item("guide", &config.guide, quote.people_count, days, locale)?);
    }

    if quote.international_flight {
        items.push(built_in_item("flight", &config.flight, quote.people_count, quote.days, locale)?);
    }

    for selected in &quote.selected_extras {
        if let Some(extra) = config.extra(&selected.id) {
            items.push(extra_item(extra, selected, quote, locale)?);
        }
    }

    let base_total = items
        .iter()
        .try_fold(Money::zero(), |sum, item| sum.checked_add(item.subtotal))
        .ok_or_else(|| CoreError::overflow("baseTotal"))?;
    let commissions = quote_commissions(quote, base_total)?;

    Ok(CalculatedQuote {
        items,
        base_total,
        commission_items: commissions.items,
        commission_total: commissions.commission_total,
        total: commissions.total,
    })
}

/// Days the guide is booked for: the whole trip unless fewer are requested.
///
/// `guideDays` of `None` or `0` means the whole trip; anything else is
/// clamped to `[1, days]`.
pub fn guide_days(quote: &QuoteInput) -> u32 {
    let requested = quote.guide_days.filter(|&d| d > 0).unwrap_or(quote.days);
    requested.max(1).min(quote.days)
}

/// Quantity for a priced component: people factor × time factor.
///
/// Both factors are `u32`, so the product always fits in a `u64`.
pub fn component_quantity(model: PricingModel, multiplier: Multiplier, people_count: u32, days: u32) -> u64 {
    let people = match model {
        PricingModel::PerPerson => people_count,
        PricingModel::PerGroup => 1,
    };
    let time = match multiplier {
        Multiplier::PerDay => days,
        Multiplier::PerTrip | Multiplier::PerPiece => 1,
    };
    u64::from(people) * u64::from(time)
}

/// Quantity for a selected extra.
///
/// `days = 0` falls back to the trip length and `quantity = 0` to one piece.
pub fn extra_quantity(extra: &ExtraService, selected: &SelectedExtra, quote: &QuoteInput) -> u64 {
    let people = match extra.pricing_model {
        PricingModel::PerPerson => quote.people_count,
        PricingModel::PerGroup => 1,
    };
    let time = match extra.multiplier {
        Multiplier::PerDay => {
            let days = if selected.days > 0 { selected.days } else { quote.days };
            days.max(1)
        }
        Multiplier::PerPiece => selected.quantity.max(1),
        Multiplier::PerTrip => 1,
    };
    u64::from(people) * u64::from(time)
}

// =============================================================================
// Line Item Builders
// =============================================================================

/// Resolves the tier and prices one component. Titles are left for the
/// caller.
fn price_component(
    key: &str,
    config: &PricedItemConfig,
    people_count: u32,
    days: u32,
    locale: Locale,
) -> CoreResult<LineItem> {
    let tier = resolve_tier(&config.tiers, people_count).ok_or_else(|| CoreError::NoTierMatch {
        component: key.to_string(),
        people_count,
    })?;

    let qty = component_quantity(config.pricing_model, config.multiplier, people_count, days);
    let subtotal = tier
        .price
        .checked_multiply_quantity(qty)
        .ok_or_else(|| CoreError::overflow(key))?;

    Ok(LineItem {
        key: key.to_string(),
        title_key: None,
        title: String::new(),
        qty,
        unit_price: tier.price,
        subtotal,
        pricing_notes: tiered_note(tier, config.pricing_model, config.multiplier, locale),
    })
}

/// Dinner, guide and flight: tiered note and built-in title.
fn built_in_item(
    key: &str,
    config: &PricedItemConfig,
    people_count: u32,
    days: u32,
    locale: Locale,
) -> CoreResult<LineItem> {
    let mut item = price_component(key, config, people_count, days, locale)?;
    item.title_key = Some(format!("items.{key}"));
    item.title = component_title(key, locale).to_string();
    Ok(item)
}

fn extra_item(
    extra: &ExtraService,
    selected: &SelectedExtra,
    quote: &QuoteInput,
    locale: Locale,
) -> CoreResult<LineItem> {
    let key = format!("extra_{}", extra.id);
    let qty = extra_quantity(extra, selected, quote);
    let subtotal = extra
        .price
        .checked_multiply_quantity(qty)
        .ok_or_else(|| CoreError::overflow(&key))?;

    Ok(LineItem {
        key,
        title_key: None,
        title: extra.title(locale).to_string(),
        qty,
        unit_price: extra.price,
        subtotal,
        pricing_notes: extra_note(extra.pricing_model, extra.multiplier, locale),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HotelGrade, Percentage, Tier};
    use chrono::NaiveDate;

    fn quote(people: u32, days: u32) -> QuoteInput {
        let mut quote = QuoteInput::draft("Q-2026-018", NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        quote.people_count = people;
        quote.days = days;
        quote
    }

    #[test]
    fn test_hotel_uses_nights() {
        let config = PricingConfig::default();

        let result = calculate_quote(&quote(1, 1), &config, Locale::En).unwrap();
        assert_eq!(result.items[0].qty, 0);
        assert_eq!(result.items[0].subtotal, Money::zero());

        let result = calculate_quote(&quote(1, 5), &config, Locale::En).unwrap();
        assert_eq!(result.items[0].qty, 4);
        assert_eq!(result.items[0].key, "hotel_budget");
        assert_eq!(result.items[0].title_key.as_deref(), Some("items.hotel_budget"));
        assert_eq!(result.items[0].pricing_notes, "per night");
    }

    #[test]
    fn test_hotel_per_trip_ignores_nights() {
        let mut config = PricingConfig::default();
        config.hotel.luxury.multiplier = Multiplier::PerTrip;
        let mut q = quote(3, 6);
        q.hotel_tier = HotelGrade::Luxury;

        let result = calculate_quote(&q, &config, Locale::De).unwrap();
        assert_eq!(result.items[0].qty, 3);
        assert_eq!(result.items[0].subtotal.cents(), 3 * 16_000);
        assert_eq!(result.items[0].pricing_notes, "pro Nacht");
    }

    #[test]
    fn test_component_order_and_notes() {
        let mut q = quote(4, 3);
        q.dinner_included = true;
        q.guide_included = true;
        q.international_flight = true;

        let result = calculate_quote(&q, &PricingConfig::default(), Locale::En).unwrap();
        let keys: Vec<&str> = result.items.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["hotel_budget", "dinner", "guide", "flight"]);

        let dinner = &result.items[1];
        assert_eq!(dinner.qty, 12);
        assert_eq!(dinner.subtotal.cents(), 12 * 3_500);
        assert_eq!(dinner.pricing_notes, "tier 1-9 people, per person, per day");
        assert_eq!(dinner.title, "Dinner");

        let guide = &result.items[2];
        assert_eq!(guide.qty, 3);
        assert_eq!(guide.pricing_notes, "tier 1-9 people, per group, per day");

        let flight = &result.items[3];
        assert_eq!(flight.qty, 4);
        assert_eq!(flight.title_key.as_deref(), Some("items.flight"));
    }

    #[test]
    fn test_german_notes() {
        let mut q = quote(12, 2);
        q.dinner_included = true;
        let result = calculate_quote(&q, &PricingConfig::default(), Locale::De).unwrap();
        assert_eq!(result.items[1].pricing_notes, "Staffel 10-20 Personen, pro Person, pro Tag");
        assert_eq!(result.items[1].title, "Abendessen");
    }

    #[test]
    fn test_guide_days_are_capped() {
        let mut q = quote(2, 5);
        q.guide_included = true;

        q.guide_days = Some(3);
        assert_eq!(guide_days(&q), 3);
        q.guide_days = Some(9);
        assert_eq!(guide_days(&q), 5);
        q.guide_days = Some(0);
        assert_eq!(guide_days(&q), 5);
        q.guide_days = None;
        assert_eq!(guide_days(&q), 5);

        q.guide_days = Some(2);
        let result = calculate_quote(&q, &PricingConfig::default(), Locale::En).unwrap();
        assert_eq!(result.items[1].qty, 2);
        assert_eq!(result.items[1].subtotal.cents(), 2 * 15_000);
    }

    #[test]
    fn test_guide_days_ignored_when_not_per_day() {
        let mut config = PricingConfig::default();
        config.guide.multiplier = Multiplier::PerTrip;
        let mut q = quote(2, 5);
        q.guide_included = true;
        q.guide_days = Some(2);

        let result = calculate_quote(&q, &config, Locale::En).unwrap();
        assert_eq!(result.items[1].qty, 1);
    }

    #[test]
    fn test_extras_quantities() {
        let mut q = quote(3, 4);
        q.selected_extras = vec![
            SelectedExtra {
                id: "airport-transfer".to_string(),
                days: 0,
                quantity: 0,
            },
            SelectedExtra {
                id: "museum-pass".to_string(),
                days: 0,
                quantity: 5,
            },
        ];

        let result = calculate_quote(&q, &PricingConfig::default(), Locale::En).unwrap();
        let transfer = &result.items[1];
        assert_eq!(transfer.key, "extra_airport-transfer");
        assert_eq!(transfer.qty, 1);
        assert_eq!(transfer.title_key, None);
        assert_eq!(transfer.pricing_notes, "per group, per piece");

        let pass = &result.items[2];
        assert_eq!(pass.qty, 3);
        assert_eq!(pass.subtotal.cents(), 3 * 2_500);
        assert_eq!(pass.pricing_notes, "per person, per trip");
    }

    #[test]
    fn test_extra_per_day_uses_selected_days() {
        let mut config = PricingConfig::default();
        config.extras[0].multiplier = Multiplier::PerDay;
        let mut q = quote(2, 6);
        q.selected_extras = vec![SelectedExtra {
            id: "airport-transfer".to_string(),
            days: 2,
            quantity: 0,
        }];
        let result = calculate_quote(&q, &config, Locale::En).unwrap();
        assert_eq!(result.items[1].qty, 2);

        q.selected_extras[0].days = 0;
        let result = calculate_quote(&q, &config, Locale::En).unwrap();
        assert_eq!(result.items[1].qty, 6);
    }

    #[test]
    fn test_unknown_extra_is_skipped() {
        let base = calculate_quote(&quote(2, 3), &PricingConfig::default(), Locale::En).unwrap();

        let mut q = quote(2, 3);
        q.selected_extras.push(SelectedExtra {
            id: "helicopter".to_string(),
            days: 0,
            quantity: 0,
        });
        let result = calculate_quote(&q, &PricingConfig::default(), Locale::En).unwrap();
        assert_eq!(result.items.len(), base.items.len());
        assert_eq!(result.base_total, base.base_total);
    }

    #[test]
    fn test_invalid_input_fails_before_tier_lookup() {
        let mut empty = PricingConfig::default();
        empty.hotel.budget.tiers.clear();

        for (people, days) in [(0, 3), (2, 0)] {
            let err = calculate_quote(&quote(people, days), &empty, Locale::En).unwrap_err();
            assert_eq!(err.code(), "INVALID_INPUT");
        }
    }

    #[test]
    fn test_invalid_input_wins_over_empty_included_ladder() {
        let mut config = PricingConfig::default();
        config.dinner.tiers.clear();
        config.guide.tiers.clear();
        config.flight.tiers.clear();

        let mut q = quote(0, 3);
        q.dinner_included = true;
        q.guide_included = true;
        q.international_flight = true;

        let err = calculate_quote(&q, &config, Locale::En).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)), "got {err:?}");

        q.people_count = 2;
        let err = calculate_quote(&q, &config, Locale::En).unwrap_err();
        assert_eq!(err.code(), "NO_TIER_MATCH");
    }

    #[test]
    fn test_large_quantities_are_exact() {
        let mut config = PricingConfig::default();
        config.hotel.budget.tiers = vec![Tier::open(1, Money::from_cents(6_000))];
        config.dinner.tiers = vec![Tier::open(1, Money::from_cents(3_500))];
        let mut q = quote(100_000, 100_000);
        q.dinner_included = true;

        let result = calculate_quote(&q, &config, Locale::En).unwrap();
        assert_eq!(result.items[0].qty, 100_000 * 99_999);
        assert_eq!(result.items[1].qty, 10_000_000_000);
        assert_eq!(result.items[1].subtotal.cents(), 35_000_000_000_000);
        assert_eq!(
            result.base_total.cents(),
            6_000 * 9_999_900_000 + 35_000_000_000_000
        );
    }

    #[test]
    fn test_subtotal_overflow_is_an_error() {
        let mut config = PricingConfig::default();
        config.extras[0].price = Money::from_cents(i64::MAX / 4);
        let mut q = quote(2, 3);
        q.selected_extras = vec![SelectedExtra {
            id: config.extras[0].id.clone(),
            days: 0,
            quantity: 5,
        }];

        match calculate_quote(&q, &config, Locale::En) {
            Err(CoreError::AmountOverflow { item }) => assert_eq!(item, "extra_airport-transfer"),
            other => panic!("expected AmountOverflow, got {other:?}"),
        }
    }

    #[test]
    fn test_base_total_overflow_is_an_error() {
        let mut config = PricingConfig::default();
        config.dinner.tiers = vec![Tier::open(1, Money::from_cents(i64::MAX / 3))];
        config.flight.tiers = vec![Tier::open(1, Money::from_cents(i64::MAX / 3))];
        config.dinner.multiplier = Multiplier::PerTrip;
        config.flight.multiplier = Multiplier::PerTrip;
        config.dinner.pricing_model = PricingModel::PerGroup;
        config.flight.pricing_model = PricingModel::PerGroup;
        let mut q = quote(2, 3);
        q.dinner_included = true;
        q.international_flight = true;
        q.selected_extras = vec![SelectedExtra {
            id: config.extras[0].id.clone(),
            days: 0,
            quantity: 0,
        }];
        config.extras[0].price = Money::from_cents(i64::MAX / 3);

        let err = calculate_quote(&q, &config, Locale::En).unwrap_err();
        assert_eq!(err.code(), "AMOUNT_OVERFLOW");
        assert_eq!(err.to_string(), "Amount too large for baseTotal");
    }

    #[test]
    fn test_no_tier_match_names_component() {
        let mut q = quote(25, 3);
        q.dinner_included = true;
        let mut config = PricingConfig::default();
        config.hotel.budget.tiers.push(Tier::open(21, Money::from_cents(4_000)));

        match calculate_quote(&q, &config, Locale::En) {
            Err(CoreError::NoTierMatch {
                component,
                people_count,
            }) => {
                assert_eq!(component, "dinner");
                assert_eq!(people_count, 25);
            }
            other => panic!("expected NoTierMatch, got {other:?}"),
        }
    }

    #[test]
    fn test_excluded_component_needs_no_tier() {
        let mut config = PricingConfig::default();
        config.flight.tiers.clear();
        assert!(calculate_quote(&quote(2, 3), &config, Locale::En).is_ok());
    }

    #[test]
    fn test_totals_with_commissions() {
        let mut q = quote(2, 5);
        q.local_agency_commission_pct = Percentage::from_pct(10.0);
        q.jinn_commission_pct = Percentage::from_pct(5.0);

        let result = calculate_quote(&q, &PricingConfig::default(), Locale::En).unwrap();
        let sum: Money = result.items.iter().map(|i| i.subtotal).sum();
        assert_eq!(result.base_total, sum);
        assert_eq!(result.base_total.cents(), 48_000);
        assert_eq!(result.commission_items.len(), 2);
        assert_eq!(result.commission_total.cents(), 7_200);
        assert_eq!(result.total, result.base_total + result.commission_total);
    }

    #[test]
    fn test_first_declared_tier_wins() {
        let mut config = PricingConfig::default();
        config.hotel.budget.tiers = vec![
            Tier::closed(1, 10, Money::from_cents(10_000)),
            Tier::closed(2, 3, Money::from_cents(1)),
        ];
        let result = calculate_quote(&quote(2, 2), &config, Locale::En).unwrap();
        assert_eq!(result.items[0].unit_price.cents(), 10_000);
    }
}
