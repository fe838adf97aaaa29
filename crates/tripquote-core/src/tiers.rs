//! # Tier Ladders
//!
//! Two deliberately separate views of the same `Vec<Tier>`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve_tier (pricing)              validate_tiers (config editor)     │
//! │  ─────────────────────               ──────────────────────────────     │
//! │  Trusts DECLARATION order.           Sorts a COPY by minPeople.         │
//! │  First tier containing the           Reports gaps, overlaps, inverted   │
//! │  traveller count wins, even if       ranges and missing coverage.       │
//! │  a later tier is narrower.           Never fails, never mutates.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no shared "canonical sorted ladder": sorting before lookup
//! would silently change which price an overlapping ladder resolves to.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Locale, Tier};

// =============================================================================
// Resolution
// =============================================================================

/// Finds the tier that prices `people_count`.
///
/// Returns the **first** tier, in the given order, whose range contains the
/// count. `None` when no tier matches; the calculator turns that into
/// [`crate::CoreError::NoTierMatch`] with the component attached.
///
/// ## Example
/// ```rust
/// use tripquote_core::money::Money;
/// use tripquote_core::tiers::resolve_tier;
/// use tripquote_core::types::Tier;
///
/// let ladder = vec![
///     Tier::closed(1, 10, Money::from_cents(100)),
///     Tier::closed(5, 6, Money::from_cents(50)), // overlaps, declared later
/// ];
/// assert_eq!(resolve_tier(&ladder, 5).map(|t| t.price.cents()), Some(100));
/// assert!(resolve_tier(&ladder, 11).is_none());
/// ```
pub fn resolve_tier(tiers: &[Tier], people_count: u32) -> Option<&Tier> {
    tiers.iter().find(|tier| tier.contains(people_count))
}

// =============================================================================
// Validation
// =============================================================================

/// A configuration defect in one tier ladder.
///
/// Defects are advisory: they are shown in the editor and never block a
/// calculation or a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TierDefect {
    /// The ladder is empty.
    NoTiers,
    /// The lowest tier starts above one traveller.
    MustStartFromOne,
    /// A tier's upper bound is below its lower bound.
    MaxBelowMin { min_people: u32 },
    /// Two adjacent tiers (by `minPeople`) share traveller counts.
    Overlap,
    /// The highest tier stops short of the coverage target.
    IncompleteCoverage { coverage_max_people: u32 },
}

impl TierDefect {
    /// Human-readable message in the given locale.
    pub fn message(&self, locale: Locale) -> String {
        match (self, locale) {
            (TierDefect::NoTiers, Locale::En) => "must declare at least one tier".to_string(),
            (TierDefect::NoTiers, Locale::De) => "mindestens eine Staffel anlegen".to_string(),
            (TierDefect::MustStartFromOne, Locale::En) => "ranges must start from 1".to_string(),
            (TierDefect::MustStartFromOne, Locale::De) => {
                "Staffeln müssen bei 1 beginnen".to_string()
            }
            (TierDefect::MaxBelowMin { min_people }, Locale::En) => {
                format!("tier starting at {min_people}: max people is less than min people")
            }
            (TierDefect::MaxBelowMin { min_people }, Locale::De) => {
                format!("Staffel ab {min_people}: Höchstzahl ist kleiner als Mindestzahl")
            }
            (TierDefect::Overlap, Locale::En) => "overlap between ranges".to_string(),
            (TierDefect::Overlap, Locale::De) => "Überschneidung zwischen Staffeln".to_string(),
            (TierDefect::IncompleteCoverage { coverage_max_people }, Locale::En) => {
                format!("ranges must cover up to {coverage_max_people}")
            }
            (TierDefect::IncompleteCoverage { coverage_max_people }, Locale::De) => {
                format!("Staffeln müssen bis {coverage_max_people} Personen reichen")
            }
        }
    }
}

impl fmt::Display for TierDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message(Locale::En))
    }
}

/// Checks a ladder for coverage of `[1, coverage_max_people]`.
///
/// ## Rules (in report order)
/// 1. Empty ladder → [`TierDefect::NoTiers`], nothing else is checked.
/// 2. Lowest `minPeople` above 1 → [`TierDefect::MustStartFromOne`].
/// 3. Each tier with `maxPeople < minPeople` → [`TierDefect::MaxBelowMin`].
/// 4. First adjacent pair where the earlier tier's max (open = ∞) reaches
///    the next tier's min → one [`TierDefect::Overlap`]; scanning stops there.
/// 5. Highest tier closed below the target → [`TierDefect::IncompleteCoverage`].
///
/// Rules 3 and 4 walk the sorted tiers together, so an inverted range
/// after the first overlap is not reported.
///
/// ## Example
/// ```rust
/// use tripquote_core::money::Money;
/// use tripquote_core::tiers::{validate_tiers, TierDefect};
/// use tripquote_core::types::Tier;
///
/// let ladder = vec![
///     Tier::closed(6, 10, Money::from_cents(150)),
///     Tier::closed(1, 5, Money::from_cents(100)),
/// ];
/// assert!(validate_tiers(&ladder, 10).is_empty());
///
/// let overlapping = vec![
///     Tier::closed(1, 5, Money::from_cents(100)),
///     Tier::closed(4, 10, Money::from_cents(150)),
/// ];
/// assert_eq!(validate_tiers(&overlapping, 10), vec![TierDefect::Overlap]);
/// ```
pub fn validate_tiers(tiers: &[Tier], coverage_max_people: u32) -> Vec<TierDefect> {
    let mut defects = Vec::new();

    let mut sorted: Vec<&Tier> = tiers.iter().collect();
    sorted.sort_by_key(|tier| tier.min_people);

    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        defects.push(TierDefect::NoTiers);
        return defects;
    };

    if first.min_people > 1 {
        defects.push(TierDefect::MustStartFromOne);
    }

    for (i, tier) in sorted.iter().enumerate() {
        if tier.max_people.is_some_and(|max| max < tier.min_people) {
            defects.push(TierDefect::MaxBelowMin {
                min_people: tier.min_people,
            });
        }
        if i > 0 {
            let prev = sorted[i - 1];
            let prev_reaches = prev.max_people.map_or(true, |max| max >= tier.min_people);
            if prev_reaches {
                defects.push(TierDefect::Overlap);
                break;
            }
        }
    }

    if last.max_people.is_some_and(|max| max < coverage_max_people) {
        defects.push(TierDefect::IncompleteCoverage {
            coverage_max_people,
        });
    }

    defects
}

/// [`validate_tiers`] rendered as display strings in the given locale.
pub fn validate_tier_messages(tiers: &[Tier], coverage_max_people: u32, locale: Locale) -> Vec<String> {
    validate_tiers(tiers, coverage_max_people)
        .iter()
        .map(|defect| defect.message(locale))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn tier(min: u32, max: Option<u32>, cents: i64) -> Tier {
        Tier {
            min_people: min,
            max_people: max,
            price: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_resolve_returns_containing_tier() {
        let ladder = vec![tier(1, Some(5), 100), tier(6, Some(10), 150), tier(11, None, 120)];
        assert_eq!(resolve_tier(&ladder, 1), Some(&ladder[0]));
        assert_eq!(resolve_tier(&ladder, 5), Some(&ladder[0]));
        assert_eq!(resolve_tier(&ladder, 6), Some(&ladder[1]));
        assert_eq!(resolve_tier(&ladder, 500), Some(&ladder[2]));
    }

    #[test]
    fn test_resolve_first_declared_wins_on_overlap() {
        let ladder = vec![tier(1, None, 300), tier(4, Some(6), 100)];
        assert_eq!(resolve_tier(&ladder, 5), Some(&ladder[0]));
    }

    #[test]
    fn test_resolve_does_not_sort() {
        // Declared out of order: the wide tier first still wins for 3.
        let ladder = vec![tier(2, Some(8), 200), tier(1, Some(3), 100)];
        assert_eq!(resolve_tier(&ladder, 3), Some(&ladder[0]));
        assert_eq!(resolve_tier(&ladder, 1), Some(&ladder[1]));
    }

    #[test]
    fn test_resolve_no_match() {
        let ladder = vec![tier(1, Some(5), 100), tier(8, Some(10), 150)];
        assert_eq!(resolve_tier(&ladder, 6), None);
        assert_eq!(resolve_tier(&ladder, 11), None);
        assert_eq!(resolve_tier(&[], 1), None);
    }

    #[test]
    fn test_validate_clean_ladder() {
        let ladder = vec![tier(1, Some(5), 100), tier(6, Some(10), 150)];
        assert!(validate_tiers(&ladder, 10).is_empty());
    }

    #[test]
    fn test_validate_open_ended_ladder_covers_anything() {
        let ladder = vec![tier(1, Some(5), 100), tier(6, None, 150)];
        assert!(validate_tiers(&ladder, 500).is_empty());
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(validate_tiers(&[], 10), vec![TierDefect::NoTiers]);
    }

    #[test]
    fn test_validate_must_start_from_one() {
        let ladder = vec![tier(2, Some(5), 100)];
        assert_eq!(
            validate_tiers(&ladder, 5),
            vec![TierDefect::MustStartFromOne]
        );
    }

    #[test]
    fn test_validate_overlap_reported_once() {
        let ladder = vec![tier(1, Some(5), 100), tier(4, Some(8), 150), tier(7, Some(10), 120)];
        assert_eq!(validate_tiers(&ladder, 10), vec![TierDefect::Overlap]);
    }

    #[test]
    fn test_validate_open_tier_before_another_overlaps() {
        let ladder = vec![tier(1, None, 100), tier(6, Some(10), 150)];
        assert_eq!(validate_tiers(&ladder, 10), vec![TierDefect::Overlap]);
    }

    #[test]
    fn test_validate_max_below_min() {
        let ladder = vec![tier(1, Some(5), 100), tier(6, Some(3), 150)];
        let defects = validate_tiers(&ladder, 3);
        assert_eq!(defects, vec![TierDefect::MaxBelowMin { min_people: 6 }]);
    }

    #[test]
    fn test_validate_incomplete_coverage() {
        let ladder = vec![tier(1, Some(5), 100), tier(6, Some(10), 150)];
        assert_eq!(
            validate_tiers(&ladder, 12),
            vec![TierDefect::IncompleteCoverage {
                coverage_max_people: 12
            }]
        );
    }

    #[test]
    fn test_validate_sorts_a_copy() {
        let ladder = vec![tier(6, Some(10), 150), tier(1, Some(5), 100)];
        assert!(validate_tiers(&ladder, 10).is_empty());
        assert_eq!(ladder[0].min_people, 6);
    }

    #[test]
    fn test_validate_multiple_defects_in_order() {
        let ladder = vec![tier(3, Some(5), 100), tier(5, Some(8), 150)];
        assert_eq!(
            validate_tiers(&ladder, 10),
            vec![
                TierDefect::MustStartFromOne,
                TierDefect::Overlap,
                TierDefect::IncompleteCoverage {
                    coverage_max_people: 10
                },
            ]
        );
    }

    #[test]
    fn test_messages() {
        let ladder = vec![tier(1, Some(5), 100), tier(4, Some(10), 150)];
        assert_eq!(
            validate_tier_messages(&ladder, 10, Locale::En),
            vec!["overlap between ranges".to_string()]
        );
        assert_eq!(
            TierDefect::IncompleteCoverage {
                coverage_max_people: 12
            }
            .to_string(),
            "ranges must cover up to 12"
        );
    }
}
