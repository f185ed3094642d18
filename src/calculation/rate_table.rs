//! Rate table resolution and lookup.
//!
//! A [`RateTable`] is the award configuration resolved for one effective
//! date. It answers "what does an hour cost" for an employment type, level,
//! day and time of day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{AllowanceRate, AwardConfig, PenaltyConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{CostCategory, DayOfWeek, DayType, EmploymentType, validate_level};

use super::time_arithmetic::{MINUTES_PER_DAY, minute_of_day};

/// Length of the first overtime tier in minutes.
///
/// The first two overtime hours are paid at the tier 1 multiplier.
pub const OVERTIME_TIER_1_MINUTES: i64 = 120;

/// An overtime pay tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OvertimeTier {
    /// The first two overtime hours.
    Tier1,
    /// Overtime after the first two hours.
    Tier2,
}

impl OvertimeTier {
    /// Returns the cost category for hours in this tier.
    pub fn category(self) -> CostCategory {
        match self {
            OvertimeTier::Tier1 => CostCategory::OvertimeTier1,
            OvertimeTier::Tier2 => CostCategory::OvertimeTier2,
        }
    }
}

/// The rate that applies to one moment of a shift, before overtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLookup {
    /// The base hourly rate for the level.
    pub base_rate: Decimal,
    /// The multiplier for the day and time.
    pub multiplier: Decimal,
    /// The category of hours.
    pub category: CostCategory,
    /// The award clause that sets the multiplier.
    pub clause_ref: String,
}

/// Award rates resolved for a single effective date.
#[derive(Debug, Clone)]
pub struct RateTable {
    effective_date: NaiveDate,
    hourly_rates: BTreeMap<u8, Decimal>,
    allowances: BTreeMap<String, AllowanceRate>,
    penalties: PenaltyConfig,
}

impl RateTable {
    /// Creates a rate table from its parts.
    pub fn new(
        effective_date: NaiveDate,
        hourly_rates: BTreeMap<u8, Decimal>,
        allowances: BTreeMap<String, AllowanceRate>,
        penalties: PenaltyConfig,
    ) -> Self {
        Self {
            effective_date,
            hourly_rates,
            allowances,
            penalties,
        }
    }

    /// Resolves the rate table effective on `date`.
    ///
    /// # Errors
    ///
    /// Returns `RateNotFound` if no rate configuration is effective on or
    /// before `date`.
    pub fn from_config(config: &AwardConfig, date: NaiveDate) -> EngineResult<Self> {
        let rate_config = config
            .rates_effective_on(date)
            .ok_or(EngineError::RateNotFound { date })?;

        let hourly_rates = rate_config
            .rates
            .iter()
            .map(|(level, rate)| (*level, rate.hourly))
            .collect();

        Ok(Self::new(
            rate_config.effective_date,
            hourly_rates,
            rate_config.allowances.clone(),
            config.penalties().clone(),
        ))
    }

    /// Returns the effective date of the rates.
    pub fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    /// Returns the penalty configuration.
    pub fn penalties(&self) -> &PenaltyConfig {
        &self.penalties
    }

    /// Returns the base hourly rate for a level.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the level is outside 1 to 5 or has no
    /// configured rate.
    pub fn base_rate(&self, level: u8) -> EngineResult<Decimal> {
        validate_level(level)?;
        self.hourly_rates.get(&level).copied().ok_or_else(|| {
            EngineError::validation("level", format!("no rate configured for level {}", level))
        })
    }

    /// Returns true if a minute of the day falls in the weekday night window.
    pub fn is_night(&self, minute: i64) -> bool {
        let night = &self.penalties.penalties.night;
        let starts = minute_of_day(night.starts);
        let ends = minute_of_day(night.ends);
        let minute = minute.rem_euclid(MINUTES_PER_DAY);

        if starts < ends {
            minute >= starts && minute < ends
        } else if starts > ends {
            minute >= starts || minute < ends
        } else {
            false
        }
    }

    /// Returns the minutes of the day where the night window opens and closes.
    pub fn night_boundaries(&self) -> [i64; 2] {
        let night = &self.penalties.penalties.night;
        [minute_of_day(night.starts), minute_of_day(night.ends)]
    }

    /// Looks up the ordinary-time rate for a moment of a shift.
    ///
    /// Weekdays use the ordinary or night multiplier depending on the minute
    /// of the day. Saturdays, Sundays and public holidays use the day penalty
    /// for every hour.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown level.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use quote_engine::config::ConfigLoader;
    /// use quote_engine::models::{CostCategory, DayOfWeek, EmploymentType};
    ///
    /// let rates = ConfigLoader::load("./config/cleaning_services")?.latest_rate_table()?;
    /// let lookup = rates.lookup(EmploymentType::Casual, 2, DayOfWeek::Saturday, 9 * 60)?;
    /// assert_eq!(lookup.category, CostCategory::Saturday);
    /// # Ok::<(), quote_engine::error::EngineError>(())
    /// ```
    pub fn lookup(
        &self,
        employment_type: EmploymentType,
        level: u8,
        day: DayOfWeek,
        minute: i64,
    ) -> EngineResult<RateLookup> {
        let base_rate = self.base_rate(level)?;
        let penalties = &self.penalties.penalties;

        let (rates, category) = match day.day_type() {
            DayType::Weekday if self.is_night(minute) => {
                (&penalties.night.rates, CostCategory::Night)
            }
            DayType::Weekday => (&penalties.ordinary, CostCategory::Ordinary),
            DayType::Saturday => (&penalties.saturday, CostCategory::Saturday),
            DayType::Sunday => (&penalties.sunday, CostCategory::Sunday),
            DayType::PublicHoliday => (&penalties.public_holiday, CostCategory::PublicHoliday),
        };

        Ok(RateLookup {
            base_rate,
            multiplier: rates.multiplier(employment_type),
            category,
            clause_ref: rates.clause.clone(),
        })
    }

    /// Returns the overtime multiplier for an employment type and tier.
    pub fn overtime_multiplier(&self, employment_type: EmploymentType, tier: OvertimeTier) -> Decimal {
        let overtime = &self.penalties.overtime;
        match tier {
            OvertimeTier::Tier1 => overtime.first_two_hours.multiplier(employment_type),
            OvertimeTier::Tier2 => overtime.after_two_hours.multiplier(employment_type),
        }
    }

    /// Returns the award clause for overtime.
    pub fn overtime_clause(&self) -> &str {
        &self.penalties.overtime.clause
    }

    /// Returns the daily ordinary-hours threshold in hours.
    pub fn daily_threshold_hours(&self) -> Decimal {
        Decimal::from(self.penalties.overtime.daily_threshold_hours)
    }

    /// Returns the daily ordinary-hours threshold in minutes.
    pub fn daily_threshold_minutes(&self) -> i64 {
        i64::from(self.penalties.overtime.daily_threshold_hours) * 60
    }

    /// Returns the weekly ordinary-hours threshold in hours.
    pub fn weekly_threshold_hours(&self) -> Decimal {
        Decimal::from(self.penalties.overtime.weekly_threshold_hours)
    }

    /// Returns the gap, in minutes, a broken shift must exceed.
    pub fn broken_shift_gap_minutes(&self) -> i64 {
        i64::from(self.penalties.broken_shift.minimum_gap_minutes)
    }

    /// Returns the award clause for broken shifts.
    pub fn broken_shift_clause(&self) -> &str {
        &self.penalties.broken_shift.clause
    }

    /// Returns the rate for an allowance identifier.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the allowance is not configured.
    pub fn allowance(&self, id: &str) -> EngineResult<&AllowanceRate> {
        self.allowances.get(id).ok_or_else(|| {
            EngineError::validation("allowances", format!("unknown allowance '{}'", id))
        })
    }
}
