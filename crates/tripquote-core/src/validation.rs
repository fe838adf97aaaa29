//! # Validation Module
//!
//! Input validation for quotes and pricing configurations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Field names, enum tags, number types                              │
//! │  └── Malformed JSON never becomes a PricingConfig                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Contract check (THIS MODULE)                                 │
//! │  ├── Blocking: values a calculation cannot work with                   │
//! │  └── Advisory: tier-ladder gaps/overlaps (see tiers::validate_tiers)   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculation (pricing)                                        │
//! │  ├── peopleCount / days ≥ 1                                            │
//! │  └── A tier must match for every included component                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tripquote_core::types::PricingConfig;
//! use tripquote_core::validation::check_pricing_config;
//!
//! let report = check_pricing_config(&PricingConfig::default());
//! assert!(report.is_valid());
//! assert!(report.ladder_defects.is_empty());
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::tiers::{validate_tiers, TierDefect};
use crate::types::{PricingConfig, PricingTarget, QuoteInput};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Quote Validators
// =============================================================================

/// Validates a traveller count.
///
/// ## Rules
/// - Must be at least 1
pub fn validate_people_count(people_count: u32) -> ValidationResult<()> {
    if people_count < 1 {
        return Err(ValidationError::MustBePositive {
            field: "peopleCount".to_string(),
        });
    }
    Ok(())
}

/// Validates a trip length in days.
///
/// ## Rules
/// - Must be at least 1
pub fn validate_days(days: u32) -> ValidationResult<()> {
    if days < 1 {
        return Err(ValidationError::MustBePositive {
            field: "days".to_string(),
        });
    }
    Ok(())
}

/// Validates the parameters the calculator depends on.
///
/// Runs before any tier lookup; a failure here means no quote is produced.
pub fn validate_quote_input(quote: &QuoteInput) -> ValidationResult<()> {
    validate_people_count(quote.people_count)?;
    validate_days(quote.days)?;
    Ok(())
}

// =============================================================================
// Config Contract
// =============================================================================

/// A defect that makes a pricing configuration unusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigDefect {
    /// The document is not a pricing configuration at all.
    Malformed { reason: String },
    /// `coverageMaxPeople` is below 1.
    CoverageTooSmall,
    /// A ladder has no tiers, so every lookup on it would fail.
    EmptyLadder { target: PricingTarget },
    /// A tier starts below one traveller.
    TierBelowOne { target: PricingTarget, index: usize },
    /// A tier price is negative.
    NegativeTierPrice { target: PricingTarget, index: usize },
    /// An extra service has an empty id.
    BlankExtraId { index: usize },
    /// An extra service has an empty title.
    BlankExtraTitle { id: String },
    /// An extra service price is negative.
    NegativeExtraPrice { id: String },
}

impl fmt::Display for ConfigDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigDefect::Malformed { reason } => write!(f, "malformed pricing configuration: {reason}"),
            ConfigDefect::CoverageTooSmall => write!(f, "coverageMaxPeople must be at least 1"),
            ConfigDefect::EmptyLadder { target } => write!(f, "{target}: must declare at least one tier"),
            ConfigDefect::TierBelowOne { target, index } => {
                write!(f, "{target}: tier #{} must start at 1 or more people", index + 1)
            }
            ConfigDefect::NegativeTierPrice { target, index } => {
                write!(f, "{target}: tier #{} has a negative price", index + 1)
            }
            ConfigDefect::BlankExtraId { index } => write!(f, "extra #{} has no id", index + 1),
            ConfigDefect::BlankExtraTitle { id } => write!(f, "extra '{id}' needs an English and a German title"),
            ConfigDefect::NegativeExtraPrice { id } => write!(f, "extra '{id}' has a negative price"),
        }
    }
}

/// Advisory ladder defects for one pricing target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LadderDefects {
    pub target: PricingTarget,
    pub defects: Vec<TierDefect>,
}

/// The typed result of checking a pricing configuration.
///
/// `defects` block use of the configuration; `ladder_defects` are shown to
/// the editor and never block anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConfigReport {
    pub defects: Vec<ConfigDefect>,
    pub ladder_defects: Vec<LadderDefects>,
    /// Extra ids listed more than once; lookups use the first entry.
    #[serde(default)]
    pub duplicate_extra_ids: Vec<String>,
}

impl ConfigReport {
    /// True when nothing blocks using the configuration.
    pub fn is_valid(&self) -> bool {
        self.defects.is_empty()
    }

    /// Number of advisory findings: ladder defects across all targets plus
    /// duplicated extra ids.
    pub fn advisory_count(&self) -> usize {
        let ladders: usize = self.ladder_defects.iter().map(|l| l.defects.len()).sum();
        ladders + self.duplicate_extra_ids.len()
    }

    fn malformed(reason: impl Into<String>) -> Self {
        ConfigReport {
            defects: vec![ConfigDefect::Malformed {
                reason: reason.into(),
            }],
            ladder_defects: Vec::new(),
            duplicate_extra_ids: Vec::new(),
        }
    }
}

impl fmt::Display for ConfigReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.defects.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Checks a configuration against the pricing contract.
///
/// ## Blocking Rules
/// - `coverageMaxPeople ≥ 1`
/// - Every ladder has at least one tier, each starting at ≥ 1 traveller,
///   none with a negative price
/// - Every extra has a non-blank id and titles and a non-negative price
///
/// ## Advisory Rules
/// - [`validate_tiers`] against `coverageMaxPeople`, per ladder
/// - [`duplicate_extra_ids`]: not a defect, since lookups take the first
///   entry, but listed so the editor can clean them up
pub fn check_pricing_config(config: &PricingConfig) -> ConfigReport {
    let mut report = ConfigReport::default();

    if config.coverage_max_people < 1 {
        report.defects.push(ConfigDefect::CoverageTooSmall);
    }

    for target in PricingTarget::ALL {
        let item = config.item(target);
        if item.tiers.is_empty() {
            report.defects.push(ConfigDefect::EmptyLadder { target });
        }
        for (index, tier) in item.tiers.iter().enumerate() {
            if tier.min_people < 1 {
                report.defects.push(ConfigDefect::TierBelowOne { target, index });
            }
            if tier.price.is_negative() {
                report
                    .defects
                    .push(ConfigDefect::NegativeTierPrice { target, index });
            }
        }

        let defects = validate_tiers(&item.tiers, config.coverage_max_people);
        if !defects.is_empty() {
            report.ladder_defects.push(LadderDefects { target, defects });
        }
    }

    for (index, extra) in config.extras.iter().enumerate() {
        if extra.id.trim().is_empty() {
            report.defects.push(ConfigDefect::BlankExtraId { index });
            continue;
        }
        if extra.title_en.trim().is_empty() || extra.title_de.trim().is_empty() {
            report.defects.push(ConfigDefect::BlankExtraTitle {
                id: extra.id.clone(),
            });
        }
        if extra.price.is_negative() {
            report.defects.push(ConfigDefect::NegativeExtraPrice {
                id: extra.id.clone(),
            });
        }
    }
    report.duplicate_extra_ids = duplicate_extra_ids(config);

    report
}

/// Parses and checks a pricing configuration document.
///
/// ## Returns
/// * `Ok((config, report))` - usable configuration plus advisory defects
/// * `Err(report)` - malformed JSON or blocking contract defects
pub fn parse_pricing_config(json: &str) -> Result<(PricingConfig, ConfigReport), ConfigReport> {
    let config: PricingConfig =
        serde_json::from_str(json).map_err(|e| ConfigReport::malformed(e.to_string()))?;
    let report = check_pricing_config(&config);
    if report.is_valid() {
        Ok((config, report))
    } else {
        Err(report)
    }
}

/// Lists extra ids that appear more than once, in first-seen order.
pub fn duplicate_extra_ids(config: &PricingConfig) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for extra in &config.extras {
        if !seen.insert(extra.id.as_str()) && !duplicates.contains(&extra.id) {
            duplicates.push(extra.id.clone());
        }
    }
    duplicates
}

// =============================================================================
// Unit Tests
// =============================================================================
