//! Configuration types for award-rate costing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::wall_clock;
use crate::models::EmploymentType;

/// Metadata about the award.
///
/// Contains identifying information about the award, including its
/// Fair Work code, name, version, and source URL.
#[derive(Debug, Clone, Deserialize)]
pub struct AwardMetadata {
    /// The Fair Work award code (e.g., "MA000022").
    pub code: String,
    /// The human-readable name of the award.
    pub name: String,
    /// The version or effective date of the award.
    pub version: String,
    /// URL to the official award documentation.
    pub source_url: String,
}

/// A classification level within the award.
#[derive(Debug, Clone, Deserialize)]
pub struct Classification {
    /// The human-readable name of the classification.
    pub name: String,
    /// A description of the classification.
    pub description: String,
    /// Reference to the award clause defining this classification.
    pub clause: String,
}

/// Classifications configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationsConfig {
    /// Map of level to classification details.
    pub classifications: BTreeMap<u8, Classification>,
}

/// Rate information for a classification level.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationRate {
    /// The weekly rate for this level.
    pub weekly: Decimal,
    /// The hourly rate for this level.
    pub hourly: Decimal,
}

/// How an allowance accrues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceUnit {
    /// Paid once per shift worked.
    PerShift,
    /// Paid per hour worked.
    PerHour,
}

/// An allowance rate.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowanceRate {
    /// The human-readable allowance name.
    pub name: String,
    /// How the allowance accrues.
    pub unit: AllowanceUnit,
    /// Amount per unit.
    pub amount: Decimal,
    /// Reference to the award clause for the allowance.
    pub clause: String,
}

/// Rate configuration for a specific effective date.
#[derive(Debug, Clone, Deserialize)]
pub struct RateConfig {
    /// The effective date for these rates.
    pub effective_date: NaiveDate,
    /// Map of level to rates.
    pub rates: BTreeMap<u8, ClassificationRate>,
    /// Map of allowance identifier to rate.
    #[serde(default)]
    pub allowances: BTreeMap<String, AllowanceRate>,
}

/// Multipliers by employment type, applied to the base rate.
///
/// Casual multipliers include the casual loading.
#[derive(Debug, Clone, Deserialize)]
pub struct PenaltyRates {
    /// Reference to the award clause for these multipliers.
    pub clause: String,
    /// Multiplier for full-time employees.
    pub full_time: Decimal,
    /// Multiplier for part-time employees.
    pub part_time: Decimal,
    /// Multiplier for casual employees.
    pub casual: Decimal,
}

impl PenaltyRates {
    /// Returns the multiplier for an employment type.
    pub fn multiplier(&self, employment_type: EmploymentType) -> Decimal {
        match employment_type {
            EmploymentType::FullTime => self.full_time,
            EmploymentType::PartTime => self.part_time,
            EmploymentType::Casual => self.casual,
        }
    }
}

/// Weekday night-work window and its multipliers.
///
/// The window runs from `starts` to `ends`, wrapping past midnight when
/// `ends` is earlier than `starts`.
#[derive(Debug, Clone, Deserialize)]
pub struct NightPenalty {
    /// When the night window opens.
    #[serde(with = "wall_clock")]
    pub starts: NaiveTime,
    /// When the night window closes.
    #[serde(with = "wall_clock")]
    pub ends: NaiveTime,
    /// Multipliers for hours inside the window.
    pub rates: PenaltyRates,
}

/// Penalties section.
#[derive(Debug, Clone, Deserialize)]
pub struct Penalties {
    /// Weekday daytime multipliers (casual loading only).
    pub ordinary: PenaltyRates,
    /// Weekday night multipliers.
    pub night: NightPenalty,
    /// Saturday penalty rates.
    pub saturday: PenaltyRates,
    /// Sunday penalty rates.
    pub sunday: PenaltyRates,
    /// Public holiday penalty rates.
    pub public_holiday: PenaltyRates,
}

/// Overtime rates by employment type.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeRates {
    /// Overtime multiplier for full-time employees.
    pub full_time: Decimal,
    /// Overtime multiplier for part-time employees.
    pub part_time: Decimal,
    /// Overtime multiplier for casual employees.
    pub casual: Decimal,
}

impl OvertimeRates {
    /// Returns the multiplier for an employment type.
    pub fn multiplier(&self, employment_type: EmploymentType) -> Decimal {
        match employment_type {
            EmploymentType::FullTime => self.full_time,
            EmploymentType::PartTime => self.part_time,
            EmploymentType::Casual => self.casual,
        }
    }
}

/// Overtime section in penalties config.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeSection {
    /// Reference to the award clause for overtime.
    pub clause: String,
    /// Ordinary hours per shift before overtime applies.
    pub daily_threshold_hours: u32,
    /// Ordinary hours per week before overtime applies.
    pub weekly_threshold_hours: u32,
    /// Rates for the first two hours of overtime.
    pub first_two_hours: OvertimeRates,
    /// Rates for overtime after two hours.
    pub after_two_hours: OvertimeRates,
}

/// Broken-shift detection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BrokenShiftConfig {
    /// Reference to the award clause for broken shifts.
    pub clause: String,
    /// A gap longer than this many minutes breaks the shift.
    pub minimum_gap_minutes: u32,
}

/// Penalty configuration from penalties.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PenaltyConfig {
    /// Penalty rates configuration.
    pub penalties: Penalties,
    /// Overtime configuration.
    pub overtime: OvertimeSection,
    /// Broken-shift configuration.
    pub broken_shift: BrokenShiftConfig,
}

/// The complete award configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various
/// YAML files in an award configuration directory.
#[derive(Debug, Clone)]
pub struct AwardConfig {
    /// Award metadata.
    metadata: AwardMetadata,
    /// Classifications available under this award.
    classifications: BTreeMap<u8, Classification>,
    /// Rate configurations by effective date (sorted oldest first).
    rates: Vec<RateConfig>,
    /// Penalty configuration.
    penalties: PenaltyConfig,
}

impl AwardConfig {
    /// Creates a new AwardConfig from its component parts.
    pub fn new(
        metadata: AwardMetadata,
        classifications: BTreeMap<u8, Classification>,
        rates: Vec<RateConfig>,
        penalties: PenaltyConfig,
    ) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            classifications,
            rates: sorted_rates,
            penalties,
        }
    }

    /// Returns the award metadata.
    pub fn award(&self) -> &AwardMetadata {
        &self.metadata
    }

    /// Returns all classifications.
    pub fn classifications(&self) -> &BTreeMap<u8, Classification> {
        &self.classifications
    }

    /// Returns the penalty configuration.
    pub fn penalties(&self) -> &PenaltyConfig {
        &self.penalties
    }

    /// Returns all rate configurations.
    pub fn rates(&self) -> &[RateConfig] {
        &self.rates
    }

    /// Returns the rate configuration effective on a date.
    ///
    /// This is the most recent configuration whose effective date is on or
    /// before `date`.
    pub fn rates_effective_on(&self, date: NaiveDate) -> Option<&RateConfig> {
        self.rates.iter().rfind(|r| r.effective_date <= date)
    }

    /// Returns the most recent rate configuration.
    pub fn latest_rates(&self) -> Option<&RateConfig> {
        self.rates.last()
    }
}
