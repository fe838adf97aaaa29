//! # Pricing Editor Operations
//!
//! Pure edits applied to a [`PricingConfig`] by the configuration editor.
//! Persisting the result (and debouncing that) is the store's job.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Editor Action            Method                  Config Change         │
//! │  ─────────────            ──────                  ─────────────         │
//! │  Change model/unit ─────► update_item() ────────► item.{model,mult}    │
//! │  Add tier ──────────────► add_tier() ───────────► tiers.push(next)     │
//! │  Edit tier ─────────────► update_tier() ────────► tiers[i] = patched   │
//! │  Remove tier ───────────► remove_tier() ────────► tiers.remove(i)      │
//! │  Add service ───────────► add_extra() ──────────► extras.push(new)     │
//! │  Edit service ──────────► update_extra() ───────► extras[id] = patched │
//! │  Remove service ────────► remove_extra() ───────► extras.remove(id)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Edits never validate the ladder; run [`crate::validation::check_pricing_config`]
//! to see what the result looks like.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ExtraService, Multiplier, PricingConfig, PricingModel, PricingTarget, Tier};

/// Partial update for a ladder's pricing model and multiplier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub pricing_model: Option<PricingModel>,
    pub multiplier: Option<Multiplier>,
}

/// Partial update for one tier.
///
/// `max_people: Some(None)` opens the tier upwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierPatch {
    pub min_people: Option<u32>,
    pub max_people: Option<Option<u32>>,
    pub price: Option<Money>,
}

/// Partial update for an extra service. The id is not editable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraPatch {
    pub title_en: Option<String>,
    pub title_de: Option<String>,
    pub price: Option<Money>,
    pub pricing_model: Option<PricingModel>,
    pub multiplier: Option<Multiplier>,
}

impl PricingConfig {
    /// Changes the pricing model and/or multiplier of a ladder.
    pub fn update_item(&mut self, target: PricingTarget, patch: &ItemPatch) {
        let item = self.item_mut(target);
        if let Some(model) = patch.pricing_model {
            item.pricing_model = model;
        }
        if let Some(multiplier) = patch.multiplier {
            item.multiplier = multiplier;
        }
    }

    /// Appends an open-ended tier after the last declared one.
    ///
    /// ## Behavior
    /// - Starts one above the last tier's max (or its min when open-ended)
    /// - Copies the last tier's price
    /// - On an empty ladder: starts at 1 with price 0
    ///
    /// Returns the new tier's index.
    pub fn add_tier(&mut self, target: PricingTarget) -> usize {
        let tiers = &mut self.item_mut(target).tiers;
        let tier = match tiers.last() {
            Some(last) => Tier::open(
                last.max_people.unwrap_or(last.min_people).saturating_add(1),
                last.price,
            ),
            None => Tier::open(1, Money::zero()),
        };
        tiers.push(tier);
        tiers.len() - 1
    }

    /// Applies a patch to the tier at `index`.
    pub fn update_tier(&mut self, target: PricingTarget, index: usize, patch: &TierPatch) -> CoreResult<()> {
        let tier = self
            .item_mut(target)
            .tiers
            .get_mut(index)
            .ok_or_else(|| CoreError::not_found("Tier", format!("{target}[{index}]")))?;

        if let Some(min) = patch.min_people {
            tier.min_people = min;
        }
        if let Some(max) = patch.max_people {
            tier.max_people = max;
        }
        if let Some(price) = patch.price {
            tier.price = price;
        }
        Ok(())
    }

    /// Removes the tier at `index`, returning it.
    pub fn remove_tier(&mut self, target: PricingTarget, index: usize) -> CoreResult<Tier> {
        let tiers = &mut self.item_mut(target).tiers;
        if index >= tiers.len() {
            return Err(CoreError::not_found("Tier", format!("{target}[{index}]")));
        }
        Ok(tiers.remove(index))
    }

    /// Appends a blank extra service with a fresh id and returns it.
    ///
    /// New services are per group, per trip, priced at 0.
    pub fn add_extra(&mut self) -> &ExtraService {
        let id = loop {
            let candidate = format!("extra-{}", &Uuid::new_v4().simple().to_string()[..8]);
            if self.extra(&candidate).is_none() {
                break candidate;
            }
        };

        self.extras.push(ExtraService {
            id,
            title_en: "New service".to_string(),
            title_de: "Neue Leistung".to_string(),
            price: Money::zero(),
            pricing_model: PricingModel::PerGroup,
            multiplier: Multiplier::PerTrip,
        });
        &self.extras[self.extras.len() - 1]
    }

    /// Applies a patch to the first extra with the given id.
    pub fn update_extra(&mut self, id: &str, patch: &ExtraPatch) -> CoreResult<()> {
        let extra = self
            .extras
            .iter_mut()
            .find(|extra| extra.id == id)
            .ok_or_else(|| CoreError::not_found("Extra service", id))?;

        if let Some(title) = &patch.title_en {
            extra.title_en = title.clone();
        }
        if let Some(title) = &patch.title_de {
            extra.title_de = title.clone();
        }
        if let Some(price) = patch.price {
            extra.price = price;
        }
        if let Some(model) = patch.pricing_model {
            extra.pricing_model = model;
        }
        if let Some(multiplier) = patch.multiplier {
            extra.multiplier = multiplier;
        }
        Ok(())
    }

    /// Removes every extra with the given id.
    pub fn remove_extra(&mut self, id: &str) -> CoreResult<()> {
        let before = self.extras.len();
        self.extras.retain(|extra| extra.id != id);
        if self.extras.len() == before {
            return Err(CoreError::not_found("Extra service", id));
        }
        Ok(())
    }

    /// Returns a copy of `self` with one ladder replaced by `source`'s.
    ///
    /// Used to save a single editor section on top of the last stored
    /// configuration without picking up unrelated unsaved edits.
    pub fn with_section_from(&self, source: &PricingConfig, target: PricingTarget) -> PricingConfig {
        let mut merged = self.clone();
        *merged.item_mut(target) = source.item(target).clone();
        merged
    }
}
