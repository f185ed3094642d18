//! Shared fixtures for calculation unit tests.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::config::{
    AllowanceRate, AllowanceUnit, BrokenShiftConfig, NightPenalty, OvertimeRates,
    OvertimeSection, Penalties, PenaltyConfig, PenaltyRates,
};
use crate::models::{DayOfWeek, EmploymentType, Shift};

use super::RateTable;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn penalty(clause: &str, permanent: &str, casual: &str) -> PenaltyRates {
    PenaltyRates {
        clause: clause.to_string(),
        full_time: dec(permanent),
        part_time: dec(permanent),
        casual: dec(casual),
    }
}

fn overtime(permanent: &str, casual: &str) -> OvertimeRates {
    OvertimeRates {
        full_time: dec(permanent),
        part_time: dec(permanent),
        casual: dec(casual),
    }
}

pub fn sample_penalties() -> PenaltyConfig {
    PenaltyConfig {
        penalties: Penalties {
            ordinary: penalty("11.2", "1.0", "1.25"),
            night: NightPenalty {
                starts: t(18, 0),
                ends: t(6, 0),
                rates: penalty("27.2", "1.15", "1.40"),
            },
            saturday: penalty("29.1(a)", "1.5", "1.75"),
            sunday: penalty("29.1(b)", "2.0", "2.25"),
            public_holiday: penalty("29.1(c)", "2.5", "2.75"),
        },
        overtime: OvertimeSection {
            clause: "28.1".to_string(),
            daily_threshold_hours: 8,
            weekly_threshold_hours: 38,
            first_two_hours: overtime("1.5", "1.875"),
            after_two_hours: overtime("2.0", "2.5"),
        },
        broken_shift: BrokenShiftConfig {
            clause: "17.2(d)".to_string(),
            minimum_gap_minutes: 60,
        },
    }
}

/// Round-number rates: level 1 = $25, level 2 = $30, then +$2 per level.
pub fn sample_rate_table() -> RateTable {
    let hourly_rates: BTreeMap<u8, Decimal> = [
        (1, dec("25")),
        (2, dec("30")),
        (3, dec("32")),
        (4, dec("34")),
        (5, dec("36")),
    ]
    .into_iter()
    .collect();

    let mut allowances = BTreeMap::new();
    allowances.insert(
        "laundry".to_string(),
        AllowanceRate {
            name: "Laundry allowance".to_string(),
            unit: AllowanceUnit::PerShift,
            amount: dec("1.50"),
            clause: "17.2(c)".to_string(),
        },
    );
    allowances.insert(
        "leading_hand".to_string(),
        AllowanceRate {
            name: "Leading hand allowance".to_string(),
            unit: AllowanceUnit::PerHour,
            amount: dec("0.50"),
            clause: "17.2(a)".to_string(),
        },
    );

    RateTable::new(
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        hourly_rates,
        allowances,
        sample_penalties(),
    )
}

pub fn make_shift(
    id: &str,
    day: DayOfWeek,
    start: NaiveTime,
    end: NaiveTime,
    employment_type: EmploymentType,
    level: u8,
) -> Shift {
    Shift {
        id: id.to_string(),
        day,
        start_time: start,
        end_time: end,
        break_minutes: 0,
        level,
        employment_type,
        number_of_cleaners: 1,
        location: None,
        notes: None,
        allowances: BTreeSet::new(),
        estimated_cost: None,
    }
}
