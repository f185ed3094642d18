//! Application state for the quote costing API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::calculation::RateTable;
use crate::config::ConfigLoader;
use crate::error::EngineResult;

/// Shared application state.
///
/// Holds the loaded award configuration behind an `Arc`; handlers only
/// ever read it.
#[derive(Clone)]
pub struct AppState {
    /// The loaded award configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Resolves the rate table for a request.
    ///
    /// With no date the most recent rates are used.
    ///
    /// # Errors
    ///
    /// Returns `RateNotFound` if no rates are effective on `date`.
    pub fn rates_for(&self, date: Option<NaiveDate>) -> EngineResult<RateTable> {
        match date {
            Some(date) => self.config.rate_table(date),
            None => self.config.latest_rate_table(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_state() -> AppState {
        AppState::new(ConfigLoader::load("./config/cleaning_services").unwrap())
    }

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_rates_for_defaults_to_latest() {
        let state = create_test_state();
        let rates = state.rates_for(None).unwrap();
        assert_eq!(rates.effective_date(), NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    }

    #[test]
    fn test_rates_for_date() {
        let state = create_test_state();
        let rates = state
            .rates_for(NaiveDate::from_ymd_opt(2024, 12, 25))
            .unwrap();
        assert_eq!(rates.effective_date(), NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    }
}
