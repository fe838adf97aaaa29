//! # Pricing Config Repository
//!
//! Stores the one current [`PricingConfig`] as a JSON document.
//!
//! ## Load / Save Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load()                                                                 │
//! │    no row ─────────────────────────────► PricingConfig::default()      │
//! │    row ──► parse_pricing_config ──┬─ ok ► stored config                │
//! │                                   └─ err ► warn! + default             │
//! │                                                                         │
//! │  save(&config)                                                          │
//! │    check_pricing_config ──┬─ blocking defects ► Err(InvalidConfig)     │
//! │                           └─ otherwise ► upsert, Ok(report)            │
//! │                              (ladder gaps/overlaps only warn)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use tripquote_core::{check_pricing_config, parse_pricing_config, ConfigReport, PricingConfig, PricingTarget};

use crate::error::{DbError, DbResult};

/// Repository for the pricing configuration.
#[derive(Debug, Clone)]
pub struct PricingConfigRepository {
    pool: SqlitePool,
}

impl PricingConfigRepository {
    /// Creates a new PricingConfigRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PricingConfigRepository { pool }
    }

    /// Returns the stored configuration, or the default one.
    ///
    /// A stored document that no longer passes the contract check is
    /// logged and replaced by the default; it is not deleted.
    pub async fn load(&self) -> DbResult<PricingConfig> {
        let Some(document) = self.stored_document().await? else {
            debug!("No stored pricing configuration, using defaults");
            return Ok(PricingConfig::default());
        };

        match parse_pricing_config(&document) {
            Ok((config, report)) => {
                if report.advisory_count() > 0 {
                    debug!(
                        advisories = report.advisory_count(),
                        "Stored pricing configuration has ladder defects"
                    );
                }
                Ok(config)
            }
            Err(report) => {
                warn!(
                    defects = %report,
                    "Stored pricing configuration is invalid, falling back to defaults"
                );
                Ok(PricingConfig::default())
            }
        }
    }

    /// Returns the raw stored document, if any.
    pub async fn stored_document(&self) -> DbResult<Option<String>> {
        let document: Option<String> =
            sqlx::query_scalar("SELECT document FROM pricing_config WHERE id = 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(document)
    }

    /// When the configuration was last saved.
    pub async fn updated_at(&self) -> DbResult<Option<DateTime<Utc>>> {
        let updated_at: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT updated_at FROM pricing_config WHERE id = 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(updated_at)
    }

    /// Validates and stores a configuration.
    ///
    /// ## Returns
    /// * `Ok(report)` - stored; the report may list advisory ladder defects
    /// * `Err(DbError::InvalidConfig)` - blocking defects, nothing stored
    pub async fn save(&self, config: &PricingConfig) -> DbResult<ConfigReport> {
        let report = check_pricing_config(config);
        if !report.is_valid() {
            warn!(defects = %report, "Rejected pricing configuration");
            return Err(DbError::InvalidConfig(report));
        }

        let document = serde_json::to_string(config)?;
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO pricing_config (id, document, updated_at)
            VALUES (1, ?1, ?2)
            ON CONFLICT (id) DO UPDATE SET
                document = excluded.document,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&document)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if report.advisory_count() > 0 {
            warn!(
                advisories = report.advisory_count(),
                "Saved pricing configuration with ladder defects"
            );
        }
        info!(extras = config.extras.len(), "Pricing configuration saved");
        Ok(report)
    }

    /// Saves one ladder of `edited` on top of the stored configuration.
    ///
    /// Other unsaved edits in `edited` are left out. Returns the
    /// configuration as stored.
    pub async fn save_section(&self, target: PricingTarget, edited: &PricingConfig) -> DbResult<PricingConfig> {
        let stored = self.load().await?;
        let merged = stored.with_section_from(edited, target);
        self.save(&merged).await?;
        info!(target = %target, "Pricing section saved");
        Ok(merged)
    }

    /// Replaces the stored configuration with the default one.
    pub async fn reset(&self) -> DbResult<PricingConfig> {
        let config = PricingConfig::default();
        self.save(&config).await?;
        info!("Pricing configuration reset to defaults");
        Ok(config)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
