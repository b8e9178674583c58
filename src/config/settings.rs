//! User settings for fintrack
//!
//! Display preferences and the budget warning threshold, stored as JSON in
//! the home directory. Missing fields fall back to their defaults.

use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::FintrackPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::models::budget::validate_threshold;
use crate::models::DEFAULT_NEAR_THRESHOLD;
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for fintrack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Fraction of a budget at which spending counts as near the limit
    #[serde(default = "default_near_threshold")]
    pub near_budget_threshold: f64,

    /// Currency symbol shown before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for listings and CSV (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Where relative export paths land; defaults to `<home>/exports`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_near_threshold() -> f64 {
    DEFAULT_NEAR_THRESHOLD
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            near_budget_threshold: default_near_threshold(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            export_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// Never writes; call `save` to persist.
    pub fn load_or_create(paths: &FintrackPaths) -> LedgerResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let settings: Settings = read_json(&settings_path).map_err(|e| match e {
            LedgerError::Json(message) => LedgerError::Config(message),
            other => other,
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FintrackPaths) -> LedgerResult<()> {
        self.validate()?;
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> LedgerResult<()> {
        validate_threshold(self.near_budget_threshold)
            .map_err(|e| LedgerError::Config(format!("near_budget_threshold: {}", e)))?;

        if self.date_format.trim().is_empty() {
            return Err(LedgerError::Config("date_format must not be empty".into()));
        }

        // chrono panics when asked to render an invalid format
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(LedgerError::Config(format!(
                "date_format is not a valid strftime format: {}",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Directory that relative export paths resolve against
    pub fn export_dir(&self, paths: &FintrackPaths) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| paths.export_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.near_budget_threshold, 0.9);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert!(settings.export_dir.is_none());
    }

    #[test]
    fn test_load_missing_file_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path());

        let settings = Settings {
            near_budget_threshold: 0.75,
            currency_symbol: "€".to_string(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.near_budget_threshold, 0.75);
        assert_eq!(loaded.currency_symbol, "€");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "£"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "£");
        assert_eq!(loaded.near_budget_threshold, 0.9);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"near_budget_threshold": 1.5}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));

        let settings = Settings {
            near_budget_threshold: 0.0,
            ..Settings::default()
        };
        assert!(settings.save(&paths).is_err());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[test]
    fn test_invalid_date_format_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));

        let settings = Settings {
            date_format: "%d/%m/%Y".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_export_dir_default() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path());

        let settings = Settings::default();
        assert_eq!(settings.export_dir(&paths), temp_dir.path().join("exports"));

        let settings = Settings {
            export_dir: Some(PathBuf::from("/tmp/out")),
            ..Settings::default()
        };
        assert_eq!(settings.export_dir(&paths), PathBuf::from("/tmp/out"));
    }
}
