//! Daily overtime detection functionality.
//!
//! This module detects when a shift exceeds the daily ordinary-hours
//! threshold and splits the excess into the two overtime tiers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

use super::rate_table::{OVERTIME_TIER_1_MINUTES, OvertimeTier};
use super::time_arithmetic::minutes_to_hours;

/// The result of detecting daily overtime for a shift.
///
/// Besides the hour totals it records where, counted in worked minutes from
/// the start of the shift, each overtime tier begins. Shift costing cuts its
/// rate segments at those offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyOvertimeDetection {
    /// The number of ordinary hours (up to the threshold).
    pub ordinary_hours: Decimal,
    /// The number of overtime hours (hours exceeding the threshold).
    pub overtime_hours: Decimal,
    /// Overtime hours paid at the first tier.
    pub tier_1_hours: Decimal,
    /// Overtime hours paid at the second tier.
    pub tier_2_hours: Decimal,
    /// Worked minute at which tier 1 overtime begins.
    pub tier_1_start_minute: i64,
    /// Worked minute at which tier 2 overtime begins.
    pub tier_2_start_minute: i64,
    /// The audit step recording this detection.
    pub audit_step: AuditStep,
}

impl DailyOvertimeDetection {
    /// Returns the overtime tier of the worked minute at `offset`, or `None`
    /// for an ordinary minute.
    pub fn tier_at(&self, offset: i64) -> Option<OvertimeTier> {
        if offset < self.tier_1_start_minute {
            None
        } else if offset < self.tier_2_start_minute {
            Some(OvertimeTier::Tier1)
        } else {
            Some(OvertimeTier::Tier2)
        }
    }
}

/// Detects whether minutes worked exceed the daily overtime threshold.
///
/// Splits the worked time into ordinary hours (up to the threshold) and
/// overtime hours, then splits the overtime into the first two hours
/// (tier 1) and the remainder (tier 2).
///
/// # Examples
///
/// ```
/// use quote_engine::calculation::detect_daily_overtime;
/// use rust_decimal::Decimal;
///
/// let result = detect_daily_overtime(660, 480, "28.1", 1);
///
/// assert_eq!(result.ordinary_hours, Decimal::new(8, 0));
/// assert_eq!(result.overtime_hours, Decimal::new(3, 0));
/// assert_eq!(result.tier_1_hours, Decimal::new(2, 0));
/// assert_eq!(result.tier_2_hours, Decimal::new(1, 0));
/// assert!(result.tier_at(479).is_none());
/// ```
pub fn detect_daily_overtime(
    worked_minutes: i64,
    threshold_minutes: i64,
    clause_ref: &str,
    step_number: u32,
) -> DailyOvertimeDetection {
    let overtime_minutes = (worked_minutes - threshold_minutes).max(0);
    let tier_1_minutes = overtime_minutes.min(OVERTIME_TIER_1_MINUTES);

    let worked_hours = minutes_to_hours(worked_minutes);
    let threshold = minutes_to_hours(threshold_minutes);
    let ordinary_hours = minutes_to_hours(worked_minutes.min(threshold_minutes));
    let overtime_hours = minutes_to_hours(overtime_minutes);
    let tier_1_hours = minutes_to_hours(tier_1_minutes);
    let tier_2_hours = minutes_to_hours(overtime_minutes - tier_1_minutes);

    let reasoning = if overtime_minutes > 0 {
        format!(
            "{} hours worked exceeds {} hour threshold by {} hours, triggering overtime",
            worked_hours.normalize(),
            threshold.normalize(),
            overtime_hours.normalize()
        )
    } else if worked_minutes == threshold_minutes {
        format!(
            "{} hours worked equals {} hour threshold, no overtime triggered",
            worked_hours.normalize(),
            threshold.normalize()
        )
    } else {
        format!(
            "{} hours worked is under {} hour threshold, no overtime triggered",
            worked_hours.normalize(),
            threshold.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "daily_overtime_detection".to_string(),
        rule_name: "Daily Overtime Detection".to_string(),
        clause_ref: clause_ref.to_string(),
        input: serde_json::json!({
            "worked_hours": worked_hours.normalize().to_string(),
            "threshold": threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "ordinary_hours": ordinary_hours.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string(),
            "tier_1_hours": tier_1_hours.normalize().to_string(),
            "tier_2_hours": tier_2_hours.normalize().to_string()
        }),
        reasoning,
    };

    DailyOvertimeDetection {
        ordinary_hours,
        overtime_hours,
        tier_1_hours,
        tier_2_hours,
        tier_1_start_minute: threshold_minutes,
        tier_2_start_minute: threshold_minutes + OVERTIME_TIER_1_MINUTES,
        audit_step,
    }
}
