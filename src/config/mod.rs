//! Configuration loading and management for the quote costing engine.
//!
//! This module provides functionality to load award configurations from YAML files,
//! including award metadata, classifications, rates, allowances and penalty information.
//!
//! # Example
//!
//! ```no_run
//! use quote_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/cleaning_services").unwrap();
//! println!("Loaded award: {}", config.award().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AllowanceRate, AllowanceUnit, AwardConfig, AwardMetadata, BrokenShiftConfig, Classification,
    ClassificationRate, ClassificationsConfig, NightPenalty, OvertimeRates, OvertimeSection,
    Penalties, PenaltyConfig, PenaltyRates, RateConfig,
};
