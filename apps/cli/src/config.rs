//! # Application Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TRIPQUOTE_*`)
//! 2. Defaults (this file)
//!
//! | Variable                | Default                | Meaning                     |
//! |-------------------------|------------------------|-----------------------------|
//! | `TRIPQUOTE_DB_PATH`     | `./data/tripquote.db`  | SQLite file                 |
//! | `TRIPQUOTE_LOCALE`      | `en`                   | Notes, titles, formatting   |
//! | `TRIPQUOTE_AUTOSAVE_MS` | `1000`                 | Pricing auto-save debounce  |
//! | `TRIPQUOTE_CURRENCY`    | `€`                    | Currency symbol for display |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tripquote_core::{Locale, DEFAULT_CURRENCY_SYMBOL};
use tripquote_db::DEFAULT_AUTOSAVE_DELAY;

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite database file.
    pub db_path: PathBuf,

    /// Default locale for calculations and output.
    pub locale: Locale,

    /// Debounce delay for pricing edits.
    pub autosave_delay: Duration,

    /// Currency symbol used when formatting amounts.
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            db_path: PathBuf::from("./data/tripquote.db"),
            locale: Locale::En,
            autosave_delay: DEFAULT_AUTOSAVE_DELAY,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();

        if let Some(path) = lookup("TRIPQUOTE_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(locale) = lookup("TRIPQUOTE_LOCALE") {
            config.locale = locale
                .parse()
                .map_err(|_| ConfigError::invalid("TRIPQUOTE_LOCALE", &locale))?;
        }

        if let Some(ms) = lookup("TRIPQUOTE_AUTOSAVE_MS") {
            let ms: u64 = ms
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("TRIPQUOTE_AUTOSAVE_MS", &ms))?;
            config.autosave_delay = Duration::from_millis(ms);
        }

        if let Some(symbol) = lookup("TRIPQUOTE_CURRENCY") {
            if symbol.trim().is_empty() {
                return Err(ConfigError::invalid("TRIPQUOTE_CURRENCY", &symbol));
            }
            config.currency_symbol = symbol.trim().to_string();
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

impl ConfigError {
    fn invalid(key: &str, value: &str) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.autosave_delay, Duration::from_millis(1000));
        assert_eq!(config.currency_symbol, "€");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("TRIPQUOTE_DB_PATH", "/tmp/quotes.db"),
            ("TRIPQUOTE_LOCALE", "de"),
            ("TRIPQUOTE_AUTOSAVE_MS", "250"),
            ("TRIPQUOTE_CURRENCY", "CHF"),
        ])
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/quotes.db"));
        assert_eq!(config.locale, Locale::De);
        assert_eq!(config.autosave_delay, Duration::from_millis(250));
        assert_eq!(config.currency_symbol, "CHF");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("TRIPQUOTE_LOCALE", "fr")]),
            Err(ConfigError::InvalidValue { key, .. }) if key == "TRIPQUOTE_LOCALE"
        ));
        assert!(load(&[("TRIPQUOTE_AUTOSAVE_MS", "soon")]).is_err());
        assert!(load(&[("TRIPQUOTE_CURRENCY", "  ")]).is_err());
    }
}
