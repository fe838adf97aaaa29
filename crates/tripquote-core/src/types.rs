//! # Domain Types
//!
//! Core domain types used throughout TripQuote.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUTS                                                                 │
//! │  ┌──────────────────────┐          ┌──────────────────────┐            │
//! │  │    PricingConfig     │          │     QuoteInput       │            │
//! │  │  ──────────────────  │          │  ──────────────────  │            │
//! │  │  hotel.{budget,..}   │          │  peopleCount, days   │            │
//! │  │  dinner/guide/flight │          │  hotelTier, flags    │            │
//! │  │   └─ PricedItemConfig│          │  commission pcts     │            │
//! │  │       └─ Tier[]      │          │  selectedExtras[]    │            │
//! │  │  coverageMaxPeople   │          └──────────────────────┘            │
//! │  │  extras[]            │                                               │
//! │  └──────────────────────┘                                               │
//! │                                                                         │
//! │  OUTPUT                                                                 │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  CalculatedQuote { items: LineItem[], baseTotal,                 │  │
//! │  │                    commissionItems: CommissionItem[],            │  │
//! │  │                    commissionTotal, total }                      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Shape
//! Every type here is exchanged as JSON with camelCase field names and
//! snake_case enum tags, matching the documents the config store and the
//! quote form already produce.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Locale
// =============================================================================

/// Language used for human-readable labels in line items and reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
}

impl Locale {
    /// Both supported locales, in display order.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::De];

    /// Lowercase language tag (`en`, `de`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "de" => Ok(Locale::De),
            other => Err(ValidationError::InvalidFormat {
                field: "locale".to_string(),
                reason: format!("unsupported locale '{other}', expected en or de"),
            }),
        }
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A commission rate as a percentage, e.g. `12.5` for 12.5%.
///
/// The rate is kept exactly as entered; rounding happens only on the amount
/// it produces (see [`Money::percentage`]). On the wire it is a plain
/// number.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Percentage {
    /// Creates a rate from a percentage.
    #[inline]
    pub const fn from_pct(pct: f64) -> Self {
        Percentage(pct)
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn pct(&self) -> f64 {
        self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(0.0)
    }

    /// Checks if the rate is strictly positive.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.pct())
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.pct())
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom("percentage must be a finite number"));
        }
        Ok(Percentage::from_pct(value))
    }
}

// =============================================================================
// Pricing Enums
// =============================================================================

/// Accommodation grade chosen for a quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum HotelGrade {
    #[default]
    Budget,
    Premium,
    Luxury,
}

impl HotelGrade {
    /// All grades, in display order.
    pub const ALL: [HotelGrade; 3] = [HotelGrade::Budget, HotelGrade::Premium, HotelGrade::Luxury];

    /// Lowercase tag (`budget`, `premium`, `luxury`).
    pub fn as_str(&self) -> &'static str {
        match self {
            HotelGrade::Budget => "budget",
            HotelGrade::Premium => "premium",
            HotelGrade::Luxury => "luxury",
        }
    }
}

/// Whether a price applies per traveller or per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    /// Price × number of travellers.
    PerPerson,
    /// One price for the whole group.
    PerGroup,
}

/// The time/unit basis a price is multiplied by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Multiplier {
    PerDay,
    PerTrip,
    PerPiece,
}

// =============================================================================
// Tier
// =============================================================================

/// One price point, valid for a range of traveller counts.
///
/// `max_people: None` means the range is open-ended above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub min_people: u32,
    pub max_people: Option<u32>,
    #[ts(type = "number")]
    pub price: Money,
}

impl Tier {
    /// Creates a closed tier `[min, max]`.
    pub fn closed(min_people: u32, max_people: u32, price: Money) -> Self {
        Tier {
            min_people,
            max_people: Some(max_people),
            price,
        }
    }

    /// Creates an open-ended tier `[min, ∞)`.
    pub fn open(min_people: u32, price: Money) -> Self {
        Tier {
            min_people,
            max_people: None,
            price,
        }
    }

    /// Checks whether the traveller count falls in this tier's range.
    pub fn contains(&self, people_count: u32) -> bool {
        people_count >= self.min_people
            && self.max_people.map_or(true, |max| people_count <= max)
    }
}

// =============================================================================
// Priced Items
// =============================================================================

/// One priceable component: a hotel grade, dinner, guide or flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricedItemConfig {
    pub pricing_model: PricingModel,
    pub multiplier: Multiplier,
    /// Declaration order matters for lookup: the first matching tier wins.
    pub tiers: Vec<Tier>,
}

/// Accommodation ladders, one per grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HotelPricing {
    pub budget: PricedItemConfig,
    pub premium: PricedItemConfig,
    pub luxury: PricedItemConfig,
}

impl HotelPricing {
    /// Returns the ladder for a grade.
    pub fn grade(&self, grade: HotelGrade) -> &PricedItemConfig {
        match grade {
            HotelGrade::Budget => &self.budget,
            HotelGrade::Premium => &self.premium,
            HotelGrade::Luxury => &self.luxury,
        }
    }

    /// Returns the ladder for a grade, mutably.
    pub fn grade_mut(&mut self, grade: HotelGrade) -> &mut PricedItemConfig {
        match grade {
            HotelGrade::Budget => &mut self.budget,
            HotelGrade::Premium => &mut self.premium,
            HotelGrade::Luxury => &mut self.luxury,
        }
    }
}

/// An optional service offered alongside the trip (transfer, museum pass...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExtraService {
    /// Unique within a configuration; referenced by [`SelectedExtra::id`].
    pub id: String,
    pub title_en: String,
    pub title_de: String,
    #[ts(type = "number")]
    pub price: Money,
    pub pricing_model: PricingModel,
    pub multiplier: Multiplier,
}

impl ExtraService {
    /// Title in the given locale.
    pub fn title(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.title_en,
            Locale::De => &self.title_de,
        }
    }
}

// =============================================================================
// Pricing Target
// =============================================================================

/// Addresses one tier ladder inside a [`PricingConfig`].
///
/// Serialized as the dotted path the configuration editor uses
/// (`hotel.budget`, `dinner`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PricingTarget {
    #[serde(rename = "hotel.budget")]
    HotelBudget,
    #[serde(rename = "hotel.premium")]
    HotelPremium,
    #[serde(rename = "hotel.luxury")]
    HotelLuxury,
    #[serde(rename = "dinner")]
    Dinner,
    #[serde(rename = "guide")]
    Guide,
    #[serde(rename = "flight")]
    Flight,
}

impl PricingTarget {
    /// Every ladder, in editor order.
    pub const ALL: [PricingTarget; 6] = [
        PricingTarget::HotelBudget,
        PricingTarget::HotelPremium,
        PricingTarget::HotelLuxury,
        PricingTarget::Dinner,
        PricingTarget::Guide,
        PricingTarget::Flight,
    ];

    /// The ladder for a hotel grade.
    pub fn hotel(grade: HotelGrade) -> Self {
        match grade {
            HotelGrade::Budget => PricingTarget::HotelBudget,
            HotelGrade::Premium => PricingTarget::HotelPremium,
            HotelGrade::Luxury => PricingTarget::HotelLuxury,
        }
    }

    /// Dotted path (`hotel.budget`, `dinner`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingTarget::HotelBudget => "hotel.budget",
            PricingTarget::HotelPremium => "hotel.premium",
            PricingTarget::HotelLuxury => "hotel.luxury",
            PricingTarget::Dinner => "dinner",
            PricingTarget::Guide => "guide",
            PricingTarget::Flight => "flight",
        }
    }
}

impl fmt::Display for PricingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingTarget {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PricingTarget::ALL
            .into_iter()
            .find(|target| target.as_str() == s.trim())
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "target".to_string(),
                reason: format!(
                    "unknown pricing target '{s}', expected one of hotel.budget, \
                     hotel.premium, hotel.luxury, dinner, guide, flight"
                ),
            })
    }
}

// =============================================================================
// Pricing Config
// =============================================================================

/// The complete tiered pricing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    pub hotel: HotelPricing,
    pub dinner: PricedItemConfig,
    pub guide: PricedItemConfig,
    pub flight: PricedItemConfig,
    /// Traveller count every ladder is expected to cover from 1.
    pub coverage_max_people: u32,
    /// Display order is significant.
    pub extras: Vec<ExtraService>,
}

impl PricingConfig {
    /// Returns the ladder addressed by a target.
    pub fn item(&self, target: PricingTarget) -> &PricedItemConfig {
        match target {
            PricingTarget::HotelBudget => &self.hotel.budget,
            PricingTarget::HotelPremium => &self.hotel.premium,
            PricingTarget::HotelLuxury => &self.hotel.luxury,
            PricingTarget::Dinner => &self.dinner,
            PricingTarget::Guide => &self.guide,
            PricingTarget::Flight => &self.flight,
        }
    }

    /// Returns the ladder addressed by a target, mutably.
    pub fn item_mut(&mut self, target: PricingTarget) -> &mut PricedItemConfig {
        match target {
            PricingTarget::HotelBudget => &mut self.hotel.budget,
            PricingTarget::HotelPremium => &mut self.hotel.premium,
            PricingTarget::HotelLuxury => &mut self.hotel.luxury,
            PricingTarget::Dinner => &mut self.dinner,
            PricingTarget::Guide => &mut self.guide,
            PricingTarget::Flight => &mut self.flight,
        }
    }

    /// Finds an extra service by id. The first declared entry wins.
    pub fn extra(&self, id: &str) -> Option<&ExtraService> {
        self.extras.iter().find(|extra| extra.id == id)
    }
}

impl Default for PricingConfig {
    /// Returns the starter configuration shipped with a fresh install.
    ///
    /// ## Default Values
    /// - Hotels: per person, per night, two tiers covering 1-20
    /// - Dinner: per person, per day
    /// - Guide: per group, per day
    /// - Flight: per person, per trip
    /// - Extras: airport transfer, museum pass
    fn default() -> Self {
        fn ladder(model: PricingModel, multiplier: Multiplier, tiers: &[(u32, u32, i64)]) -> PricedItemConfig {
            PricedItemConfig {
                pricing_model: model,
                multiplier,
                tiers: tiers
                    .iter()
                    .map(|&(min, max, cents)| Tier::closed(min, max, Money::from_cents(cents)))
                    .collect(),
            }
        }

        PricingConfig {
            hotel: HotelPricing {
                budget: ladder(PricingModel::PerPerson, Multiplier::PerDay, &[(1, 9, 6_000), (10, 20, 5_000)]),
                premium: ladder(PricingModel::PerPerson, Multiplier::PerDay, &[(1, 9, 9_500), (10, 20, 8_500)]),
                luxury: ladder(PricingModel::PerPerson, Multiplier::PerDay, &[(1, 9, 16_000), (10, 20, 14_000)]),
            },
            dinner: ladder(PricingModel::PerPerson, Multiplier::PerDay, &[(1, 9, 3_500), (10, 20, 3_000)]),
            guide: ladder(PricingModel::PerGroup, Multiplier::PerDay, &[(1, 9, 15_000), (10, 20, 22_000)]),
            flight: ladder(PricingModel::PerPerson, Multiplier::PerTrip, &[(1, 9, 65_000), (10, 20, 59_000)]),
            coverage_max_people: 20,
            extras: vec![
                ExtraService {
                    id: "airport-transfer".to_string(),
                    title_en: "Airport transfer".to_string(),
                    title_de: "Flughafentransfer".to_string(),
                    price: Money::from_cents(12_000),
                    pricing_model: PricingModel::PerGroup,
                    multiplier: Multiplier::PerPiece,
                },
                ExtraService {
                    id: "museum-pass".to_string(),
                    title_en: "Museum pass".to_string(),
                    title_de: "Museumspass".to_string(),
                    price: Money::from_cents(2_500),
                    pricing_model: PricingModel::PerPerson,
                    multiplier: Multiplier::PerTrip,
                },
            ],
        }
    }
}

// =============================================================================
// Quote Input
// =============================================================================

/// An optional extra chosen for a quote.
///
/// `days = 0` means "the whole trip" and `quantity = 0` means one piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectedExtra {
    /// References [`ExtraService::id`]; unknown ids are skipped.
    pub id: String,
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub quantity: u32,
}

/// The parameters of one quote, as edited in the quote form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteInput {
    pub client_name: String,
    pub quote_number: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub people_count: u32,
    pub days: u32,
    pub hotel_tier: HotelGrade,
    pub dinner_included: bool,
    pub guide_included: bool,
    /// Guide days when fewer than the whole trip; `None` or `0` = all days.
    #[serde(default)]
    pub guide_days: Option<u32>,
    pub international_flight: bool,
    #[serde(default)]
    #[ts(type = "number")]
    pub local_agency_commission_pct: Percentage,
    #[serde(default)]
    #[ts(type = "number")]
    pub jinn_commission_pct: Percentage,
    /// Display order is significant and preserved in the output.
    #[serde(default)]
    pub selected_extras: Vec<SelectedExtra>,
}

impl QuoteInput {
    /// A blank draft for a new quote: two travellers, one week, budget hotel.
    pub fn draft(quote_number: impl Into<String>, date: NaiveDate) -> Self {
        QuoteInput {
            client_name: String::new(),
            quote_number: quote_number.into(),
            date,
            people_count: 2,
            days: 7,
            hotel_tier: HotelGrade::Budget,
            dinner_included: false,
            guide_included: false,
            guide_days: None,
            international_flight: false,
            local_agency_commission_pct: Percentage::zero(),
            jinn_commission_pct: Percentage::zero(),
            selected_extras: Vec::new(),
        }
    }
}

// =============================================================================
// Calculation Output
// =============================================================================

/// One priced row of a calculated quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// `hotel_{grade}`, `dinner`, `guide`, `flight` or `extra_{id}`.
    pub key: String,
    /// Translation key for built-in components; `None` for extras.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_key: Option<String>,
    /// Display title in the calculation locale.
    pub title: String,
    #[ts(type = "number")]
    pub qty: u64,
    #[ts(type = "number")]
    pub unit_price: Money,
    #[ts(type = "number")]
    pub subtotal: Money,
    pub pricing_notes: String,
}

/// One commission stacked on the base total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CommissionItem {
    pub key: String,
    pub title_key: String,
    #[ts(type = "number")]
    pub rate_pct: Percentage,
    #[ts(type = "number")]
    pub amount: Money,
}

/// The full priced result of one quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedQuote {
    pub items: Vec<LineItem>,
    #[ts(type = "number")]
    pub base_total: Money,
    pub commission_items: Vec<CommissionItem>,
    #[ts(type = "number")]
    pub commission_total: Money,
    #[ts(type = "number")]
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_contains() {
        let closed = Tier::closed(1, 5, Money::from_cents(100));
        assert!(closed.contains(1));
        assert!(closed.contains(5));
        assert!(!closed.contains(6));
        assert!(!closed.contains(0));

        let open = Tier::open(6, Money::from_cents(100));
        assert!(open.contains(6));
        assert!(open.contains(10_000));
        assert!(!open.contains(5));
    }

    #[test]
    fn test_percentage_from_pct() {
        assert_eq!(Percentage::from_pct(12.345).pct(), 12.345);
        assert!(Percentage::from_pct(0.004).is_positive());
        assert!(!Percentage::from_pct(0.0).is_positive());
        assert!(!Percentage::from_pct(-3.0).is_positive());
        assert_eq!(Percentage::from_pct(12.5).to_string(), "12.5%");
    }

    #[test]
    fn test_pricing_target_round_trips_through_str() {
        for target in PricingTarget::ALL {
            assert_eq!(target.as_str().parse::<PricingTarget>().unwrap(), target);
        }
        assert!("hotel.palace".parse::<PricingTarget>().is_err());
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("DE".parse::<Locale>().unwrap(), Locale::De);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_config_json_shape() {
        let json = r#"{
            "hotel": {
                "budget":  { "pricingModel": "per_person", "multiplier": "per_day",
                             "tiers": [{ "minPeople": 1, "maxPeople": null, "price": 80 }] },
                "premium": { "pricingModel": "per_person", "multiplier": "per_day",
                             "tiers": [{ "minPeople": 1, "maxPeople": 10, "price": 120.5 }] },
                "luxury":  { "pricingModel": "per_group", "multiplier": "per_trip",
                             "tiers": [{ "minPeople": 1, "maxPeople": 10, "price": 999.99 }] }
            },
            "dinner": { "pricingModel": "per_person", "multiplier": "per_day",
                        "tiers": [{ "minPeople": 1, "maxPeople": 10, "price": 30 }] },
            "guide":  { "pricingModel": "per_group", "multiplier": "per_day",
                        "tiers": [{ "minPeople": 1, "maxPeople": 10, "price": 150 }] },
            "flight": { "pricingModel": "per_person", "multiplier": "per_trip",
                        "tiers": [{ "minPeople": 1, "maxPeople": 10, "price": 650 }] },
            "coverageMaxPeople": 10,
            "extras": [{ "id": "spa", "titleEn": "Spa", "titleDe": "Spa",
                         "price": 45, "pricingModel": "per_person", "multiplier": "per_piece" }]
        }"#;

        let config: PricingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.hotel.budget.tiers[0].max_people, None);
        assert_eq!(config.hotel.premium.tiers[0].price.cents(), 12_050);
        assert_eq!(config.hotel.luxury.pricing_model, PricingModel::PerGroup);
        assert_eq!(config.extras[0].multiplier, Multiplier::PerPiece);
        assert_eq!(config.extra("spa").map(|e| e.price.cents()), Some(4_500));
    }

    #[test]
    fn test_quote_input_defaults_optional_fields() {
        let json = r#"{
            "clientName": "Meyer",
            "quoteNumber": "Q-2026-018",
            "date": "2026-03-01",
            "peopleCount": 4,
            "days": 5,
            "hotelTier": "premium",
            "dinnerIncluded": true,
            "guideIncluded": false,
            "internationalFlight": false,
            "selectedExtras": [{ "id": "spa" }]
        }"#;

        let quote: QuoteInput = serde_json::from_str(json).unwrap();
        assert_eq!(quote.guide_days, None);
        assert_eq!(quote.local_agency_commission_pct, Percentage::zero());
        assert_eq!(quote.selected_extras[0].days, 0);
        assert_eq!(quote.selected_extras[0].quantity, 0);
    }

    #[test]
    fn test_default_config_is_consistent() {
        let config = PricingConfig::default();
        assert_eq!(config.coverage_max_people, 20);
        for target in PricingTarget::ALL {
            assert!(!config.item(target).tiers.is_empty(), "{target} has no tiers");
        }
    }
}
