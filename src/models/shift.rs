//! Shift model and related types.
//!
//! This module defines the [`Shift`] struct for a rostered block of cleaning
//! labour, along with [`DayOfWeek`] and the [`DayType`] used to pick penalty
//! rates.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{minute_of_day, net_hours, net_minutes, span_minutes, wall_clock};
use crate::error::{EngineError, EngineResult};

use super::employment::{EmployeeGroup, EmploymentType, validate_level};

/// The rostered day of a shift.
///
/// Quotes price a repeating weekly roster, so shifts carry a day of the week
/// rather than a calendar date. `PublicHoliday` prices a shift rostered on a
/// public holiday.
///
/// # Example
///
/// ```
/// use quote_engine::models::{DayOfWeek, DayType};
///
/// let day: DayOfWeek = "Saturday".parse().unwrap();
/// assert_eq!(day.day_type(), DayType::Saturday);
/// assert_eq!("public holiday".parse::<DayOfWeek>().unwrap(), DayOfWeek::PublicHoliday);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
    /// A public holiday, whatever day of the week it falls on.
    #[serde(alias = "public-holiday")]
    PublicHoliday,
}

impl DayOfWeek {
    /// Every rosterable day, in roster order.
    pub const ALL: [DayOfWeek; 8] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
        DayOfWeek::PublicHoliday,
    ];

    /// Returns the penalty day type for this day.
    pub fn day_type(self) -> DayType {
        match self {
            DayOfWeek::Saturday => DayType::Saturday,
            DayOfWeek::Sunday => DayType::Sunday,
            DayOfWeek::PublicHoliday => DayType::PublicHoliday,
            _ => DayType::Weekday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::PublicHoliday => "Public holiday",
        };
        f.write_str(name)
    }
}

impl FromStr for DayOfWeek {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "monday" => Ok(DayOfWeek::Monday),
            "tuesday" => Ok(DayOfWeek::Tuesday),
            "wednesday" => Ok(DayOfWeek::Wednesday),
            "thursday" => Ok(DayOfWeek::Thursday),
            "friday" => Ok(DayOfWeek::Friday),
            "saturday" => Ok(DayOfWeek::Saturday),
            "sunday" => Ok(DayOfWeek::Sunday),
            "public_holiday" => Ok(DayOfWeek::PublicHoliday),
            _ => Err(EngineError::validation(
                "day",
                format!("unknown day '{}'", s),
            )),
        }
    }
}

/// Represents the type of day for penalty rate selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday - ordinary or night rates apply.
    Weekday,
    /// Saturday penalty rates.
    Saturday,
    /// Sunday penalty rates.
    Sunday,
    /// Public holiday penalty rates.
    PublicHoliday,
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
            DayType::PublicHoliday => write!(f, "Public holiday"),
        }
    }
}

fn default_cleaners() -> u32 {
    1
}

/// Represents one scheduled block of cleaning labour on a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Identifier for the shift within its quote.
    #[serde(default)]
    pub id: String,
    /// The rostered day.
    pub day: DayOfWeek,
    /// Wall-clock start time.
    #[serde(with = "wall_clock")]
    pub start_time: NaiveTime,
    /// Wall-clock end time. Earlier than the start means the shift runs overnight.
    #[serde(with = "wall_clock")]
    pub end_time: NaiveTime,
    /// Unpaid break in minutes.
    #[serde(default)]
    pub break_minutes: u32,
    /// Classification level (1 to 5).
    pub level: u8,
    /// The employment type of the rostered cleaners.
    pub employment_type: EmploymentType,
    /// How many cleaners work this shift.
    #[serde(default = "default_cleaners")]
    pub number_of_cleaners: u32,
    /// Where on site the shift is worked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Identifiers of allowances paid on this shift.
    #[serde(default)]
    pub allowances: BTreeSet<String>,
    /// Estimated cost, written by costing and never by callers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<Decimal>,
}

impl Shift {
    /// Returns the raw span of the shift in minutes, before the break.
    pub fn span_minutes(&self) -> i64 {
        span_minutes(self.start_time, self.end_time)
    }

    /// Returns worked minutes for one cleaner.
    pub fn net_minutes(&self) -> i64 {
        net_minutes(self.start_time, self.end_time, self.break_minutes)
    }

    /// Returns worked hours for one cleaner.
    ///
    /// # Examples
    ///
    /// ```
    /// use quote_engine::models::{DayOfWeek, EmploymentType, Shift};
    /// use chrono::NaiveTime;
    /// use rust_decimal::Decimal;
    ///
    /// let shift = Shift {
    ///     id: "shift_001".to_string(),
    ///     day: DayOfWeek::Monday,
    ///     start_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
    ///     break_minutes: 30,
    ///     level: 2,
    ///     employment_type: EmploymentType::Casual,
    ///     number_of_cleaners: 3,
    ///     location: None,
    ///     notes: None,
    ///     allowances: Default::default(),
    ///     estimated_cost: None,
    /// };
    /// assert_eq!(shift.net_hours(), Decimal::new(4, 0));
    /// assert_eq!(shift.total_hours(), Decimal::new(12, 0));
    /// ```
    pub fn net_hours(&self) -> Decimal {
        net_hours(self.start_time, self.end_time, self.break_minutes)
    }

    /// Returns worked hours across all cleaners on the shift.
    pub fn total_hours(&self) -> Decimal {
        self.net_hours() * Decimal::from(self.number_of_cleaners)
    }

    /// Returns the start as minutes since midnight.
    pub fn start_minute(&self) -> i64 {
        minute_of_day(self.start_time)
    }

    /// Returns the employee group the shift is rostered to.
    pub fn group(&self) -> EmployeeGroup {
        EmployeeGroup {
            employment_type: self.employment_type,
            level: self.level,
        }
    }

    /// Checks the shift's fields are in range.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the level is outside 1 to 5 or the
    /// number of cleaners is zero.
    pub fn validate(&self) -> EngineResult<()> {
        validate_level(self.level).map_err(|err| self.scoped(err))?;

        if self.number_of_cleaners == 0 {
            return Err(self.scoped(EngineError::validation(
                "number_of_cleaners",
                "must be at least 1",
            )));
        }

        Ok(())
    }

    /// Prefixes a validation error's field with this shift's id.
    pub(crate) fn scoped(&self, err: EngineError) -> EngineError {
        match err {
            EngineError::Validation { field, message } if !self.id.is_empty() => {
                EngineError::Validation {
                    field: format!("shifts[{}].{}", self.id, field),
                    message,
                }
            }
            other => other,
        }
    }
}
