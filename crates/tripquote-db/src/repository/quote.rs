//! # Saved Quote Repository
//!
//! The registry of saved quotes. Each entry keeps the quote as entered, the
//! pricing configuration it was priced with, and the calculated result, so
//! a saved quote never changes when prices are edited later.
//!
//! ## Keys
//! ```text
//! quote number        file key
//! ────────────        ────────
//! Q-2026-018    ──►   Q-2026-018
//! Q 2026/18     ──►   Q_2026_18      (runs outside [A-Za-z0-9-] → "_")
//! ```
//!
//! Two numbers with the same key collide; the second save fails with
//! [`DbError::QuoteNumberExists`].

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};

use tripquote_core::{
    calculate_quote, next_quote_number, CalculatedQuote, Locale, Money, PricingConfig, QuoteInput, QuoteNumber,
};

use crate::error::{DbError, DbResult};

/// Storage key for a quote number.
pub fn quote_file_key(quote_number: &str) -> String {
    let mut key = String::with_capacity(quote_number.len());
    let mut in_run = false;
    for ch in quote_number.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            key.push(ch);
            in_run = false;
        } else if !in_run {
            key.push('_');
            in_run = true;
        }
    }
    key
}

/// One row of the saved-quote list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuoteSummary {
    pub file_key: String,
    pub quote_number: String,
    pub client_name: String,
    pub quote_date: NaiveDate,
    pub people_count: u32,
    pub days: u32,
    pub total_cents: i64,
    pub saved_at: DateTime<Utc>,
}

impl SavedQuoteSummary {
    /// Grand total at the time of saving.
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Case-insensitive substring match on number, client name or date.
    pub fn matches(&self, search: &str) -> bool {
        let needle = search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.quote_number.to_lowercase().contains(&needle)
            || self.client_name.to_lowercase().contains(&needle)
            || self.quote_date.to_string().contains(&needle)
    }
}

/// A saved quote with its pricing snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuote {
    pub summary: SavedQuoteSummary,
    pub quote: QuoteInput,
    pub pricing: PricingConfig,
    pub calculated: CalculatedQuote,
}

impl SavedQuote {
    /// Re-prices the saved quote from its own snapshot, e.g. to render it
    /// in another locale. Amounts are identical to [`SavedQuote::calculated`].
    pub fn calculate(&self, locale: Locale) -> DbResult<CalculatedQuote> {
        Ok(calculate_quote(&self.quote, &self.pricing, locale)?)
    }
}

#[derive(sqlx::FromRow)]
struct SavedQuoteRow {
    #[sqlx(flatten)]
    summary: SavedQuoteSummary,
    quote_json: String,
    pricing_json: String,
    calculated_json: String,
}

impl SavedQuoteRow {
    fn into_saved(self) -> DbResult<SavedQuote> {
        Ok(SavedQuote {
            summary: self.summary,
            quote: serde_json::from_str(&self.quote_json)?,
            pricing: serde_json::from_str(&self.pricing_json)?,
            calculated: serde_json::from_str(&self.calculated_json)?,
        })
    }
}

const SUMMARY_COLUMNS: &str =
    "file_key, quote_number, client_name, quote_date, people_count, days, total_cents, saved_at";

/// Repository for saved quotes.
#[derive(Debug, Clone)]
pub struct SavedQuoteRepository {
    pool: SqlitePool,
}

impl SavedQuoteRepository {
    /// Creates a new SavedQuoteRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SavedQuoteRepository { pool }
    }

    /// Prices and saves a quote.
    ///
    /// ## Errors
    /// * [`DbError::QuoteNumberExists`] - the number's key is taken
    /// * [`DbError::Core`] - the quote cannot be priced with `pricing`
    pub async fn save(&self, quote: &QuoteInput, pricing: &PricingConfig) -> DbResult<SavedQuote> {
        let file_key = quote_file_key(&quote.quote_number);
        if self.exists(&file_key).await? {
            return Err(DbError::QuoteNumberExists(quote.quote_number.clone()));
        }

        let calculated = calculate_quote(quote, pricing, Locale::En)?;
        let summary = SavedQuoteSummary {
            file_key,
            quote_number: quote.quote_number.clone(),
            client_name: quote.client_name.clone(),
            quote_date: quote.date,
            people_count: quote.people_count,
            days: quote.days,
            total_cents: calculated.total.cents(),
            saved_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO saved_quotes (
                file_key, quote_number, client_name, quote_date, people_count, days,
                total_cents, quote_json, pricing_json, calculated_json, saved_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&summary.file_key)
        .bind(&summary.quote_number)
        .bind(&summary.client_name)
        .bind(summary.quote_date)
        .bind(summary.people_count)
        .bind(summary.days)
        .bind(summary.total_cents)
        .bind(serde_json::to_string(quote)?)
        .bind(serde_json::to_string(pricing)?)
        .bind(serde_json::to_string(&calculated)?)
        .bind(summary.saved_at)
        .execute(&self.pool)
        .await
        .map_err(|err| match DbError::from(err) {
            DbError::UniqueViolation { .. } => DbError::QuoteNumberExists(quote.quote_number.clone()),
            other => other,
        })?;

        info!(
            quote_number = %summary.quote_number,
            total = %summary.total(),
            "Quote saved"
        );

        Ok(SavedQuote {
            summary,
            quote: quote.clone(),
            pricing: pricing.clone(),
            calculated,
        })
    }

    async fn exists(&self, file_key: &str) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM saved_quotes WHERE file_key = ?1")
            .bind(file_key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    /// Lists saved quotes, newest number first, optionally filtered.
    pub async fn list(&self, search: Option<&str>) -> DbResult<Vec<SavedQuoteSummary>> {
        let sql = format!("SELECT {SUMMARY_COLUMNS} FROM saved_quotes ORDER BY quote_number DESC");
        let mut rows: Vec<SavedQuoteSummary> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        if let Some(search) = search {
            rows.retain(|row| row.matches(search));
        }

        debug!(count = rows.len(), "Listed saved quotes");
        Ok(rows)
    }

    /// Loads a saved quote by its number.
    pub async fn get(&self, quote_number: &str) -> DbResult<SavedQuote> {
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS}, quote_json, pricing_json, calculated_json \
             FROM saved_quotes WHERE file_key = ?1"
        );
        let row: Option<SavedQuoteRow> = sqlx::query_as(&sql)
            .bind(quote_file_key(quote_number))
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or_else(|| DbError::not_found("Saved quote", quote_number))?
            .into_saved()
    }

    /// Deletes a saved quote. Returns whether anything was removed;
    /// deleting an unknown number is not an error.
    pub async fn delete(&self, quote_number: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM saved_quotes WHERE file_key = ?1")
            .bind(quote_file_key(quote_number))
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        info!(quote_number = %quote_number, removed, "Saved quote deleted");
        Ok(removed)
    }

    /// The highest `Q-YYYY-NNN` number saved so far.
    ///
    /// When no saved number follows that format, the most recently saved
    /// number is returned instead.
    pub async fn latest_quote_number(&self) -> DbResult<Option<String>> {
        let numbers: Vec<String> =
            sqlx::query_scalar("SELECT quote_number FROM saved_quotes ORDER BY saved_at DESC")
                .fetch_all(&self.pool)
                .await?;

        let highest = numbers
            .iter()
            .filter_map(|number| number.parse::<QuoteNumber>().ok())
            .max();

        Ok(match highest {
            Some(number) => Some(number.to_string()),
            None => numbers.into_iter().next(),
        })
    }

    /// The number to pre-fill for a new quote.
    ///
    /// The sequencer applied to [`Self::latest_quote_number`], or the first
    /// number of `today`'s year when nothing is saved yet.
    pub async fn next_quote_number(&self, today: NaiveDate) -> DbResult<String> {
        Ok(match self.latest_quote_number().await? {
            Some(latest) => next_quote_number(&latest),
            None => QuoteNumber::first_of_year(u32::try_from(today.year()).unwrap_or_default()).to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> SavedQuoteRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().quotes()
    }

    fn quote(number: &str, client: &str) -> QuoteInput {
        let mut quote = QuoteInput::draft(number, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
        quote.client_name = client.to_string();
        quote
    }

    #[test]
    fn test_quote_file_key() {
        assert_eq!(quote_file_key("Q-2026-018"), "Q-2026-018");
        assert_eq!(quote_file_key("Q 2026/18"), "Q_2026_18");
        assert_eq!(quote_file_key("Müller  #7"), "M_ller_7");
        assert_eq!(quote_file_key("a//b"), "a_b");
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = repo().await;
        let pricing = PricingConfig::default();

        let saved = repo.save(&quote("Q-2026-001", "Meyer"), &pricing).await.unwrap();
        assert_eq!(saved.summary.total(), saved.calculated.total);

        let loaded = repo.get("Q-2026-001").await.unwrap();
        assert_eq!(loaded.quote, saved.quote);
        assert_eq!(loaded.pricing, pricing);
        assert_eq!(loaded.calculated, saved.calculated);
        assert_eq!(loaded.summary.client_name, "Meyer");
    }

    #[tokio::test]
    async fn test_duplicate_number_rejected() {
        let repo = repo().await;
        let pricing = PricingConfig::default();
        repo.save(&quote("Q 2026/1", "A"), &pricing).await.unwrap();

        let err = repo.save(&quote("Q_2026_1", "B"), &pricing).await.unwrap_err();
        assert!(matches!(err, DbError::QuoteNumberExists(ref n) if n == "Q_2026_1"));
        assert_eq!(err.code(), "QUOTE_NUMBER_EXISTS");
    }

    #[tokio::test]
    async fn test_unpriceable_quote_is_not_saved() {
        let repo = repo().await;
        let mut q = quote("Q-2026-009", "Big group");
        q.people_count = 40;

        let err = repo.save(&q, &PricingConfig::default()).await.unwrap_err();
        assert_eq!(err.code(), "NO_TIER_MATCH");
        assert!(repo.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_sorted_and_filtered() {
        let repo = repo().await;
        let pricing = PricingConfig::default();
        for (number, client) in [("Q-2026-002", "Schulz"), ("Q-2026-010", "Meyer"), ("Q-2025-999", "Ahmed")] {
            repo.save(&quote(number, client), &pricing).await.unwrap();
        }

        let numbers: Vec<String> = repo
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.quote_number)
            .collect();
        assert_eq!(numbers, vec!["Q-2026-010", "Q-2026-002", "Q-2025-999"]);

        let hits = repo.list(Some("MEY")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].quote_number, "Q-2026-010");

        assert_eq!(repo.list(Some("2026-03-14")).await.unwrap().len(), 3);
        assert_eq!(repo.list(Some("2025")).await.unwrap().len(), 1);
        assert_eq!(repo.list(Some("   ")).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = repo().await;
        repo.save(&quote("Q-2026-003", "X"), &PricingConfig::default())
            .await
            .unwrap();

        assert!(repo.delete("Q-2026-003").await.unwrap());
        assert!(!repo.delete("Q-2026-003").await.unwrap());
        assert!(matches!(
            repo.get("Q-2026-003").await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_next_quote_number() {
        let repo = repo().await;
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(repo.next_quote_number(today).await.unwrap(), "Q-2026-001");

        let pricing = PricingConfig::default();
        repo.save(&quote("legacy-17", "L"), &pricing).await.unwrap();
        assert_eq!(repo.next_quote_number(today).await.unwrap(), "legacy-17");

        repo.save(&quote("Q-2026-041", "A"), &pricing).await.unwrap();
        repo.save(&quote("Q-2026-007", "B"), &pricing).await.unwrap();
        assert_eq!(repo.latest_quote_number().await.unwrap().as_deref(), Some("Q-2026-041"));
        assert_eq!(repo.next_quote_number(today).await.unwrap(), "Q-2026-042");
    }

    #[tokio::test]
    async fn test_saved_quote_renders_in_other_locale() {
        let repo = repo().await;
        let mut q = quote("Q-2026-020", "Brandt");
        q.dinner_included = true;
        let saved = repo.save(&q, &PricingConfig::default()).await.unwrap();

        let german = saved.calculate(Locale::De).unwrap();
        assert_eq!(german.total, saved.calculated.total);
        assert_eq!(german.items[1].title, "Abendessen");
    }
}
