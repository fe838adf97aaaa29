//! # Quote Draft Operations
//!
//! Edits the quote form applies to the selected extras of a [`QuoteInput`].
//!
//! ## Invariants
//! - Selected extras are unique by id (adding an existing id is a no-op)
//! - Order is the display order and is preserved by every operation
//!   except [`QuoteInput::reorder_selected_extras`]

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{QuoteInput, SelectedExtra};

/// Partial update for a selected extra.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedExtraPatch {
    pub days: Option<u32>,
    pub quantity: Option<u32>,
}

impl QuoteInput {
    /// Selects an extra for `days` days with a quantity of one.
    ///
    /// Returns `false` when the extra was already selected.
    pub fn add_selected_extra(&mut self, id: &str, days: u32) -> bool {
        if self.selected_extras.iter().any(|extra| extra.id == id) {
            return false;
        }
        self.selected_extras.push(SelectedExtra {
            id: id.to_string(),
            days,
            quantity: 1,
        });
        true
    }

    /// Applies a patch to the selected extra with the given id.
    pub fn update_selected_extra(&mut self, id: &str, patch: &SelectedExtraPatch) -> CoreResult<()> {
        let extra = self
            .selected_extras
            .iter_mut()
            .find(|extra| extra.id == id)
            .ok_or_else(|| CoreError::not_found("Selected extra", id))?;

        if let Some(days) = patch.days {
            extra.days = days;
        }
        if let Some(quantity) = patch.quantity {
            extra.quantity = quantity;
        }
        Ok(())
    }

    /// Deselects an extra.
    pub fn remove_selected_extra(&mut self, id: &str) -> CoreResult<()> {
        let index = self
            .selected_extras
            .iter()
            .position(|extra| extra.id == id)
            .ok_or_else(|| CoreError::not_found("Selected extra", id))?;
        self.selected_extras.remove(index);
        Ok(())
    }

    /// Moves `source_id` to the position currently held by `target_id`.
    ///
    /// No-op when either id is not selected or both are the same.
    ///
    /// ```text
    /// [a, b, c, d]  reorder(a, c)  →  [b, c, a, d]
    /// [a, b, c, d]  reorder(d, b)  →  [a, d, b, c]
    /// ```
    pub fn reorder_selected_extras(&mut self, source_id: &str, target_id: &str) {
        let position = |id: &str| self.selected_extras.iter().position(|extra| extra.id == id);
        let (Some(from), Some(to)) = (position(source_id), position(target_id)) else {
            return;
        };
        if from == to {
            return;
        }
        let moved = self.selected_extras.remove(from);
        self.selected_extras.insert(to, moved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft_with(ids: &[&str]) -> QuoteInput {
        let mut quote = QuoteInput::draft("Q-2026-001", NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        for id in ids {
            quote.add_selected_extra(id, 0);
        }
        quote
    }

    fn ids(quote: &QuoteInput) -> Vec<&str> {
        quote.selected_extras.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_add_selected_extra_ignores_duplicates() {
        let mut quote = draft_with(&["a"]);
        assert!(!quote.add_selected_extra("a", 3));
        assert!(quote.add_selected_extra("b", 3));

        assert_eq!(ids(&quote), vec!["a", "b"]);
        assert_eq!(quote.selected_extras[0].days, 0);
        assert_eq!(quote.selected_extras[1].days, 3);
        assert_eq!(quote.selected_extras[1].quantity, 1);
    }

    #[test]
    fn test_update_and_remove() {
        let mut quote = draft_with(&["a", "b"]);
        quote
            .update_selected_extra(
                "b",
                &SelectedExtraPatch {
                    quantity: Some(4),
                    days: None,
                },
            )
            .unwrap();
        assert_eq!(quote.selected_extras[1].quantity, 4);

        quote.remove_selected_extra("a").unwrap();
        assert_eq!(ids(&quote), vec!["b"]);
        assert!(quote.remove_selected_extra("a").is_err());
        assert!(quote
            .update_selected_extra("zzz", &SelectedExtraPatch::default())
            .is_err());
    }

    #[test]
    fn test_reorder_moves_forward_and_back() {
        let mut quote = draft_with(&["a", "b", "c", "d"]);
        quote.reorder_selected_extras("a", "c");
        assert_eq!(ids(&quote), vec!["b", "c", "a", "d"]);

        let mut quote = draft_with(&["a", "b", "c", "d"]);
        quote.reorder_selected_extras("d", "b");
        assert_eq!(ids(&quote), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn test_reorder_noop_cases() {
        let mut quote = draft_with(&["a", "b"]);
        quote.reorder_selected_extras("a", "a");
        quote.reorder_selected_extras("a", "missing");
        quote.reorder_selected_extras("missing", "b");
        assert_eq!(ids(&quote), vec!["a", "b"]);
    }
}
