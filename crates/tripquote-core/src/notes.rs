//! # Labels and Pricing Notes
//!
//! Human-readable phrasing for line items. Nothing here affects a number;
//! the locale only picks words.
//!
//! ## Note Shapes
//! ```text
//! accommodation   per night
//! dinner          tier 1-9 people, per person, per day
//! guide           tier 10+ people, per group, per day
//! extra           per person, per piece
//! ```

use crate::types::{HotelGrade, Locale, Multiplier, PricingModel, Tier};

/// Label for a pricing model (`per person`, `pro Gruppe`, ...).
pub fn model_label(model: PricingModel, locale: Locale) -> &'static str {
    match (model, locale) {
        (PricingModel::PerPerson, Locale::En) => "per person",
        (PricingModel::PerPerson, Locale::De) => "pro Person",
        (PricingModel::PerGroup, Locale::En) => "per group",
        (PricingModel::PerGroup, Locale::De) => "pro Gruppe",
    }
}

/// Label for a multiplier unit (`per day`, `pro Stück`, ...).
pub fn multiplier_label(multiplier: Multiplier, locale: Locale) -> &'static str {
    match (multiplier, locale) {
        (Multiplier::PerDay, Locale::En) => "per day",
        (Multiplier::PerDay, Locale::De) => "pro Tag",
        (Multiplier::PerTrip, Locale::En) => "per trip",
        (Multiplier::PerTrip, Locale::De) => "pro Reise",
        (Multiplier::PerPiece, Locale::En) => "per piece",
        (Multiplier::PerPiece, Locale::De) => "pro Stück",
    }
}

/// Accommodation is always described per night.
pub fn night_label(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "per night",
        Locale::De => "pro Nacht",
    }
}

/// Describes a tier's range (`tier 1-9 people`, `Staffel 10+ Personen`).
pub fn tier_label(tier: &Tier, locale: Locale) -> String {
    match (tier.max_people, locale) {
        (Some(max), Locale::En) => format!("tier {}-{} people", tier.min_people, max),
        (Some(max), Locale::De) => format!("Staffel {}-{} Personen", tier.min_people, max),
        (None, Locale::En) => format!("tier {}+ people", tier.min_people),
        (None, Locale::De) => format!("Staffel {}+ Personen", tier.min_people),
    }
}

/// Full note for a tiered component: `{tier}, {model}, {unit}`.
pub fn tiered_note(tier: &Tier, model: PricingModel, multiplier: Multiplier, locale: Locale) -> String {
    format!(
        "{}, {}, {}",
        tier_label(tier, locale),
        model_label(model, locale),
        multiplier_label(multiplier, locale)
    )
}

/// Note for an extra service: `{model}, {unit}`.
pub fn extra_note(model: PricingModel, multiplier: Multiplier, locale: Locale) -> String {
    format!(
        "{}, {}",
        model_label(model, locale),
        multiplier_label(multiplier, locale)
    )
}

/// Removes a leading `tier ...,` / `Staffel ...,` segment from a note.
///
/// Printed reports show the unit basis only; the tier range is an
/// internal detail of how the price was chosen.
pub fn strip_tier_prefix(note: &str) -> &str {
    let starts_with = |prefix: &str| {
        note.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    if !(starts_with("tier") || starts_with("staffel")) {
        return note;
    }
    match note.split_once(',') {
        Some((_, rest)) => rest.trim_start(),
        None => note,
    }
}

// =============================================================================
// Built-in Titles
// =============================================================================

/// Translation key for an accommodation grade (`items.hotel_budget`).
pub fn hotel_title_key(grade: HotelGrade) -> String {
    format!("items.hotel_{}", grade.as_str())
}

/// Built-in display title for an accommodation grade.
pub fn hotel_title(grade: HotelGrade, locale: Locale) -> &'static str {
    match (grade, locale) {
        (HotelGrade::Budget, Locale::En) => "Hotel (budget)",
        (HotelGrade::Budget, Locale::De) => "Hotel (Standard)",
        (HotelGrade::Premium, Locale::En) => "Hotel (premium)",
        (HotelGrade::Premium, Locale::De) => "Hotel (Premium)",
        (HotelGrade::Luxury, Locale::En) => "Hotel (luxury)",
        (HotelGrade::Luxury, Locale::De) => "Hotel (Luxus)",
    }
}

/// Built-in display title for dinner, guide and flight.
pub fn component_title(key: &str, locale: Locale) -> &'static str {
    match (key, locale) {
        ("dinner", Locale::En) => "Dinner",
        ("dinner", Locale::De) => "Abendessen",
        ("guide", Locale::En) => "Tour guide",
        ("guide", Locale::De) => "Reiseleitung",
        ("flight", Locale::En) => "International flight",
        ("flight", Locale::De) => "Internationaler Flug",
        _ => "",
    }
}

/// Built-in display title for a commission key.
pub fn commission_title(key: &str, locale: Locale) -> &'static str {
    match (key, locale) {
        ("commission_local_agency", Locale::En) => "Local agency commission",
        ("commission_local_agency", Locale::De) => "Provision lokale Agentur",
        ("commission_jinn", Locale::En) => "Jinn commission",
        ("commission_jinn", Locale::De) => "Jinn-Provision",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_tier_labels() {
        let closed = Tier::closed(1, 9, Money::zero());
        let open = Tier::open(10, Money::zero());
        assert_eq!(tier_label(&closed, Locale::En), "tier 1-9 people");
        assert_eq!(tier_label(&open, Locale::En), "tier 10+ people");
        assert_eq!(tier_label(&closed, Locale::De), "Staffel 1-9 Personen");
        assert_eq!(tier_label(&open, Locale::De), "Staffel 10+ Personen");
    }

    #[test]
    fn test_tiered_note() {
        let tier = Tier::closed(1, 9, Money::zero());
        assert_eq!(
            tiered_note(&tier, PricingModel::PerGroup, Multiplier::PerDay, Locale::En),
            "tier 1-9 people, per group, per day"
        );
        assert_eq!(
            tiered_note(&tier, PricingModel::PerPerson, Multiplier::PerTrip, Locale::De),
            "Staffel 1-9 Personen, pro Person, pro Reise"
        );
    }

    #[test]
    fn test_strip_tier_prefix() {
        assert_eq!(strip_tier_prefix("tier 1-9 people, per person, per day"), "per person, per day");
        assert_eq!(strip_tier_prefix("Staffel 10+ Personen, pro Gruppe, pro Tag"), "pro Gruppe, pro Tag");
        assert_eq!(strip_tier_prefix("per night"), "per night");
        assert_eq!(strip_tier_prefix("per person, per piece"), "per person, per piece");
    }
}
