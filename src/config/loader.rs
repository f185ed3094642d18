//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading award
//! configurations from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculation::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::validate_level;

use super::types::{AwardConfig, AwardMetadata, Classification, ClassificationsConfig, PenaltyConfig, RateConfig};

/// Loads and provides access to award configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and resolves them into [`RateTable`]s for costing.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/cleaning_services/
/// ├── award.yaml           # Award metadata
/// ├── classifications.yaml # Levels 1 to 5
/// ├── penalties.yaml       # Penalty, night, overtime and broken-shift settings
/// └── rates/
///     └── 2025-07-01.yaml  # Hourly and allowance rates effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use quote_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/cleaning_services").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let rates = loader.rate_table(date).unwrap();
/// println!("Level 2 rate: ${}", rates.base_rate(2).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AwardConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The rates directory contains no rate files
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<AwardMetadata>(&path.join("award.yaml"))?;
        let classifications_config =
            Self::load_yaml::<ClassificationsConfig>(&path.join("classifications.yaml"))?;
        let penalties = Self::load_yaml::<PenaltyConfig>(&path.join("penalties.yaml"))?;
        let rates = Self::load_rates(&path.join("rates"))?;

        debug!(
            award = %metadata.code,
            rate_sets = rates.len(),
            "Loaded award configuration"
        );

        let config = AwardConfig::new(
            metadata,
            classifications_config.classifications,
            rates,
            penalties,
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateConfig>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rates.push(Self::load_yaml::<RateConfig>(&path)?);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the underlying award configuration.
    pub fn config(&self) -> &AwardConfig {
        &self.config
    }

    /// Returns the award metadata.
    pub fn award(&self) -> &AwardMetadata {
        self.config.award()
    }

    /// Gets a classification by level.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the level is out of range or not configured.
    pub fn get_classification(&self, level: u8) -> EngineResult<&Classification> {
        validate_level(level)?;
        self.config.classifications().get(&level).ok_or_else(|| {
            EngineError::validation("level", format!("no classification configured for level {}", level))
        })
    }

    /// Resolves the rate table effective on a date.
    ///
    /// # Errors
    ///
    /// Returns `RateNotFound` if no rate file is effective on or before `date`.
    pub fn rate_table(&self, date: NaiveDate) -> EngineResult<RateTable> {
        RateTable::from_config(&self.config, date)
    }

    /// Resolves the most recent rate table.
    pub fn latest_rate_table(&self) -> EngineResult<RateTable> {
        let latest = self
            .config
            .latest_rates()
            .ok_or_else(|| EngineError::ConfigNotFound {
                path: "rates (no rate files found)".to_string(),
            })?;
        RateTable::from_config(&self.config, latest.effective_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/cleaning_services"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.award().code, "MA000022");
        assert_eq!(loader.award().name, "Cleaning Services Award 2020");
    }

    #[test]
    fn test_get_classification() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let classification = loader.get_classification(2).unwrap();
        assert_eq!(classification.name, "Cleaning Services Employee Level 2");
    }

    #[test]
    fn test_get_classification_out_of_range_is_validation_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let result = loader.get_classification(7);
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_rate_table_for_current_rates() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let rates = loader.rate_table(date).unwrap();

        assert_eq!(rates.effective_date(), NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert_eq!(rates.base_rate(2).unwrap(), dec("25.98"));
    }

    #[test]
    fn test_rate_table_for_previous_year() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let rates = loader.rate_table(date).unwrap();

        assert_eq!(rates.effective_date(), NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(rates.base_rate(2).unwrap(), dec("25.22"));
    }

    #[test]
    fn test_latest_rate_table() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let rates = loader.latest_rate_table().unwrap();
        assert_eq!(rates.effective_date(), NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    }

    #[test]
    fn test_rate_not_found_for_date_before_effective() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        match loader.rate_table(date) {
            Err(EngineError::RateNotFound { date: d }) => assert_eq!(d, date),
            other => panic!("Expected RateNotFound error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("award.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_penalties_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let penalties = loader.config().penalties();

        assert_eq!(penalties.penalties.saturday.casual, dec("1.75"));
        assert_eq!(penalties.penalties.public_holiday.full_time, dec("2.5"));
        assert_eq!(penalties.overtime.daily_threshold_hours, 8);
        assert_eq!(penalties.overtime.weekly_threshold_hours, 38);
        assert_eq!(penalties.broken_shift.minimum_gap_minutes, 60);
    }

    #[test]
    fn test_allowances_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let rates = loader.latest_rate_table().unwrap();

        let laundry = rates.allowance("laundry").unwrap();
        assert_eq!(laundry.amount, dec("1.12"));
    }
}
