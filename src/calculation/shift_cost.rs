//! Single shift costing.
//!
//! A shift's net worked minutes are laid out from its start time and cut at
//! every point where the rate can change: the overtime tier offsets found by
//! [`detect_daily_overtime`] and the edges of the night window. Each
//! piece is priced from the [`RateTable`] and adjacent pieces with the same
//! rate are merged into [`CostLine`]s.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AuditStep, CostCategory, CostLine, HoursBreakdown, Shift, ShiftCost};

use super::allowances::calculate_allowances;
use super::overtime::{DailyOvertimeDetection, detect_daily_overtime};
use super::rate_table::{OvertimeTier, RateTable};
use super::time_arithmetic::{MINUTES_PER_DAY, minutes_to_hours};

/// A run of worked minutes paid at one rate.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    minutes: i64,
    category: CostCategory,
    multiplier: Decimal,
    clause_ref: String,
}

/// Computes the cost of a single shift.
///
/// Hours past the daily threshold are overtime. An overtime hour is paid at
/// the higher of its overtime tier multiplier and the penalty multiplier the
/// hour would otherwise attract; the two never compound.
///
/// # Errors
///
/// Returns a validation error if the shift's level is unknown, the number of
/// cleaners is zero, or an allowance is not in the rate table.
///
/// # Example
///
/// ```no_run
/// use quote_engine::calculation::compute_shift_cost;
/// use quote_engine::config::ConfigLoader;
/// use quote_engine::models::Shift;
///
/// let rates = ConfigLoader::load("./config/cleaning_services")?.latest_rate_table()?;
/// let shift: Shift = serde_json::from_str(r#"{
///     "id": "mon-am",
///     "day": "monday",
///     "start_time": "06:00",
///     "end_time": "10:00",
///     "level": 2,
///     "employment_type": "casual"
/// }"#).unwrap();
///
/// let cost = compute_shift_cost(&shift, &rates)?;
/// println!("{} costs ${}", cost.shift_id, cost.estimated_cost);
/// # Ok::<(), quote_engine::error::EngineError>(())
/// ```
pub fn compute_shift_cost(shift: &Shift, rates: &RateTable) -> EngineResult<ShiftCost> {
    shift.validate()?;

    let mut audit_steps = Vec::new();
    let mut step_number: u32 = 1;

    let net_minutes = shift.net_minutes();
    let net_hours = minutes_to_hours(net_minutes);
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "time_arithmetic".to_string(),
        rule_name: "Net Worked Time".to_string(),
        clause_ref: String::new(),
        input: serde_json::json!({
            "start_time": shift.start_time.format("%H:%M").to_string(),
            "end_time": shift.end_time.format("%H:%M").to_string(),
            "break_minutes": shift.break_minutes
        }),
        output: serde_json::json!({
            "span_minutes": shift.span_minutes(),
            "net_minutes": net_minutes,
            "net_hours": net_hours.normalize().to_string()
        }),
        reasoning: if shift.end_time < shift.start_time {
            format!(
                "Overnight shift: {} minute span less {} minute break = {} hours",
                shift.span_minutes(),
                shift.break_minutes,
                net_hours.normalize()
            )
        } else {
            format!(
                "{} minute span less {} minute break = {} hours",
                shift.span_minutes(),
                shift.break_minutes,
                net_hours.normalize()
            )
        },
    });
    step_number += 1;

    let base_rate = rates.base_rate(shift.level).map_err(|err| shift.scoped(err))?;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "base_rate_lookup".to_string(),
        rule_name: "Base Rate Lookup".to_string(),
        clause_ref: String::new(),
        input: serde_json::json!({
            "level": shift.level,
            "effective_date": rates.effective_date().to_string()
        }),
        output: serde_json::json!({
            "base_rate": base_rate.normalize().to_string()
        }),
        reasoning: format!(
            "Level {} base rate effective {} is ${}/hr",
            shift.level,
            rates.effective_date(),
            base_rate.normalize()
        ),
    });
    step_number += 1;

    let overtime = detect_daily_overtime(
        net_minutes,
        rates.daily_threshold_minutes(),
        rates.overtime_clause(),
        step_number,
    );
    let segments = allocate(shift, rates, &overtime, net_minutes)?;
    audit_steps.push(overtime.audit_step);
    step_number += 1;

    let cleaners = Decimal::from(shift.number_of_cleaners);

    let mut lines = Vec::with_capacity(segments.len());
    let mut ordinary_minutes = 0;
    let mut penalty_minutes = 0;

    for segment in segments {
        if segment.category.is_penalty() {
            penalty_minutes += segment.minutes;
        } else if !segment.category.is_overtime() {
            ordinary_minutes += segment.minutes;
        }

        let hours = minutes_to_hours(segment.minutes);
        let rate = base_rate * segment.multiplier;
        let amount = Decimal::from(segment.minutes) * rate * cleaners / Decimal::from(60);

        audit_steps.push(AuditStep {
            step_number,
            rule_id: format!("{}_rate", segment.category),
            rule_name: "Rate Allocation".to_string(),
            clause_ref: segment.clause_ref.clone(),
            input: serde_json::json!({
                "hours": hours.normalize().to_string(),
                "base_rate": base_rate.normalize().to_string(),
                "multiplier": segment.multiplier.normalize().to_string(),
                "cleaners": shift.number_of_cleaners
            }),
            output: serde_json::json!({
                "category": segment.category.as_str(),
                "amount": amount.normalize().to_string()
            }),
            reasoning: format!(
                "{} {} hours × ${} × {} × {} cleaners = ${}",
                hours.normalize(),
                segment.category,
                base_rate.normalize(),
                segment.multiplier.normalize(),
                shift.number_of_cleaners,
                amount.normalize()
            ),
        });
        step_number += 1;

        lines.push(CostLine {
            category: segment.category,
            hours,
            base_rate,
            multiplier: segment.multiplier,
            rate,
            cleaners: shift.number_of_cleaners,
            amount,
            clause_ref: segment.clause_ref,
        });
    }

    let allowances = calculate_allowances(shift, rates, step_number)?;
    let allowance_total = allowances.total();
    audit_steps.extend(allowances.audit_steps);

    let estimated_cost = lines.iter().map(|line| line.amount).sum::<Decimal>() + allowance_total;

    debug!(
        shift_id = %shift.id,
        day = %shift.day,
        net_minutes,
        cleaners = shift.number_of_cleaners,
        estimated_cost = %estimated_cost,
        "Costed shift"
    );

    Ok(ShiftCost {
        shift_id: shift.id.clone(),
        estimated_cost,
        hours: HoursBreakdown {
            net_hours,
            ordinary_hours: minutes_to_hours(ordinary_minutes),
            penalty_hours: minutes_to_hours(penalty_minutes),
            overtime_hours: overtime.overtime_hours,
        },
        lines,
        allowances: allowances.charges,
        audit_steps,
    })
}

/// Splits the net worked minutes into merged rate segments.
fn allocate(
    shift: &Shift,
    rates: &RateTable,
    overtime: &DailyOvertimeDetection,
    net_minutes: i64,
) -> EngineResult<Vec<Segment>> {
    let start = shift.start_minute();

    let mut cuts = BTreeSet::from([
        0,
        net_minutes,
        overtime.tier_1_start_minute,
        overtime.tier_2_start_minute,
    ]);
    for boundary in rates.night_boundaries() {
        let mut offset = (boundary - start).rem_euclid(MINUTES_PER_DAY);
        while offset < net_minutes {
            cuts.insert(offset);
            offset += MINUTES_PER_DAY;
        }
    }

    let cuts: Vec<i64> = cuts
        .into_iter()
        .filter(|cut| (0..=net_minutes).contains(cut))
        .collect();

    let mut segments: Vec<Segment> = Vec::new();
    for window in cuts.windows(2) {
        let (lo, hi) = (window[0], window[1]);
        let segment = classify(shift, rates, start + lo, overtime.tier_at(lo), hi - lo)?;

        match segments.last_mut() {
            Some(last)
                if last.category == segment.category
                    && last.multiplier == segment.multiplier
                    && last.clause_ref == segment.clause_ref =>
            {
                last.minutes += segment.minutes;
            }
            _ => segments.push(segment),
        }
    }

    Ok(segments)
}

/// Prices a run of minutes starting at `minute_of_day`.
fn classify(
    shift: &Shift,
    rates: &RateTable,
    minute_of_day: i64,
    tier: Option<OvertimeTier>,
    minutes: i64,
) -> EngineResult<Segment> {
    let lookup = rates
        .lookup(shift.employment_type, shift.level, shift.day, minute_of_day)
        .map_err(|err| shift.scoped(err))?;

    let Some(tier) = tier else {
        return Ok(Segment {
            minutes,
            category: lookup.category,
            multiplier: lookup.multiplier,
            clause_ref: lookup.clause_ref,
        });
    };
    let overtime_multiplier = rates.overtime_multiplier(shift.employment_type, tier);

    // Higher of overtime and penalty; the hour stays overtime either way.
    let (multiplier, clause_ref) = if lookup.multiplier > overtime_multiplier {
        (lookup.multiplier, lookup.clause_ref)
    } else {
        (overtime_multiplier, rates.overtime_clause().to_string())
    };

    Ok(Segment {
        minutes,
        category: tier.category(),
        multiplier,
        clause_ref,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{dec, make_shift, sample_rate_table, t};
    use crate::error::EngineError;
    use crate::models::{DayOfWeek, EmploymentType};

    fn cost(
        day: DayOfWeek,
        start: (u32, u32),
        end: (u32, u32),
        employment_type: EmploymentType,
        level: u8,
    ) -> ShiftCost {
        let shift = make_shift(
            "shift_001",
            day,
            t(start.0, start.1),
            t(end.0, end.1),
            employment_type,
            level,
        );
        compute_shift_cost(&shift, &sample_rate_table()).unwrap()
    }

    fn categories(cost: &ShiftCost) -> Vec<CostCategory> {
        cost.lines.iter().map(|line| line.category).collect()
    }

    #[test]
    fn test_weekday_ordinary_full_time() {
        let cost = cost(DayOfWeek::Monday, (9, 0), (17, 0), EmploymentType::FullTime, 2);

        // 8h × $30 × 1.0
        assert_eq!(cost.estimated_cost, dec("240"));
        assert_eq!(categories(&cost), vec![CostCategory::Ordinary]);
        assert_eq!(cost.hours.net_hours, dec("8"));
        assert_eq!(cost.hours.ordinary_hours, dec("8"));
        assert_eq!(cost.hours.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_weekday_casual_includes_loading() {
        let cost = cost(DayOfWeek::Monday, (9, 0), (17, 0), EmploymentType::Casual, 2);

        // 8h × $30 × 1.25
        assert_eq!(cost.estimated_cost, dec("300"));
        assert_eq!(cost.lines[0].rate, dec("37.5"));
    }

    #[test]
    fn test_weekday_shift_crossing_into_night() {
        let cost = cost(DayOfWeek::Wednesday, (16, 0), (20, 0), EmploymentType::FullTime, 1);

        // 2h × $25 + 2h × $25 × 1.15
        assert_eq!(cost.estimated_cost, dec("107.5"));
        assert_eq!(categories(&cost), vec![CostCategory::Ordinary, CostCategory::Night]);
        assert_eq!(cost.hours.ordinary_hours, dec("2"));
        assert_eq!(cost.hours.penalty_hours, dec("2"));
    }

    #[test]
    fn test_early_morning_night_then_ordinary() {
        let cost = cost(DayOfWeek::Monday, (4, 0), (8, 0), EmploymentType::FullTime, 2);

        // 2h × $30 × 1.15 + 2h × $30
        assert_eq!(cost.estimated_cost, dec("129"));
        assert_eq!(categories(&cost), vec![CostCategory::Night, CostCategory::Ordinary]);
    }

    #[test]
    fn test_overnight_weekday_shift() {
        let cost = cost(DayOfWeek::Tuesday, (22, 0), (2, 0), EmploymentType::FullTime, 2);

        // 4h × $30 × 1.15, all inside the night window
        assert_eq!(cost.hours.net_hours, dec("4"));
        assert_eq!(cost.estimated_cost, dec("138"));
        assert_eq!(categories(&cost), vec![CostCategory::Night]);
    }

    #[test]
    fn test_overnight_saturday_keeps_rostered_day() {
        let cost = cost(DayOfWeek::Saturday, (22, 0), (2, 0), EmploymentType::FullTime, 2);

        // 4h × $30 × 1.5, past midnight is still Saturday
        assert_eq!(cost.estimated_cost, dec("180"));
        assert_eq!(categories(&cost), vec![CostCategory::Saturday]);
    }

    #[test]
    fn test_zero_length_shift_costs_nothing() {
        let cost = cost(DayOfWeek::Monday, (9, 0), (9, 0), EmploymentType::FullTime, 2);

        assert_eq!(cost.estimated_cost, Decimal::ZERO);
        assert!(cost.lines.is_empty());
        assert_eq!(cost.hours.net_hours, Decimal::ZERO);
    }

    #[test]
    fn test_break_longer_than_span_floors_at_zero() {
        let mut shift = make_shift(
            "shift_001",
            DayOfWeek::Monday,
            t(9, 0),
            t(9, 20),
            EmploymentType::Casual,
            2,
        );
        shift.break_minutes = 45;

        let cost = compute_shift_cost(&shift, &sample_rate_table()).unwrap();
        assert_eq!(cost.estimated_cost, Decimal::ZERO);
    }

    #[test]
    fn test_break_comes_off_the_tail() {
        let mut shift = make_shift(
            "shift_001",
            DayOfWeek::Monday,
            t(16, 0),
            t(20, 30),
            EmploymentType::FullTime,
            1,
        );
        shift.break_minutes = 30;

        let cost = compute_shift_cost(&shift, &sample_rate_table()).unwrap();

        // 16:00-18:00 ordinary, 18:00-20:00 night
        assert_eq!(cost.hours.ordinary_hours, dec("2"));
        assert_eq!(cost.hours.penalty_hours, dec("2"));
        assert_eq!(cost.estimated_cost, dec("107.5"));
    }

    #[test]
    fn test_casual_overtime_tier_1() {
        let cost = cost(DayOfWeek::Monday, (7, 0), (17, 0), EmploymentType::Casual, 2);

        // 8h × $30 × 1.25 + 2h × $30 × 1.875
        assert_eq!(cost.estimated_cost, dec("412.5"));
        assert_eq!(cost.hours.overtime_hours, dec("2"));
        assert_eq!(
            categories(&cost),
            vec![CostCategory::Ordinary, CostCategory::OvertimeTier1]
        );
        assert_eq!(cost.lines[1].clause_ref, "28.1");
    }

    #[test]
    fn test_full_time_overtime_both_tiers() {
        let cost = cost(DayOfWeek::Monday, (6, 0), (17, 0), EmploymentType::FullTime, 2);

        // 8h × $30 + 2h × $30 × 1.5 + 1h × $30 × 2.0
        assert_eq!(cost.estimated_cost, dec("390"));
        assert_eq!(
            categories(&cost),
            vec![
                CostCategory::Ordinary,
                CostCategory::OvertimeTier1,
                CostCategory::OvertimeTier2
            ]
        );
        assert_eq!(cost.hours.overtime_hours, dec("3"));
    }

    #[test]
    fn test_weekday_night_then_overtime() {
        let cost = cost(DayOfWeek::Monday, (12, 0), (23, 0), EmploymentType::FullTime, 2);

        // 6h ordinary $180, 2h night $69, 2h OT1 at 1.5 $90, 1h OT2 at 2.0 $60
        assert_eq!(cost.estimated_cost, dec("399"));
        assert_eq!(cost.hours.ordinary_hours, dec("6"));
        assert_eq!(cost.hours.penalty_hours, dec("2"));
        assert_eq!(cost.hours.overtime_hours, dec("3"));
    }

    #[test]
    fn test_stacking_saturday_overtime() {
        let cost = cost(DayOfWeek::Saturday, (8, 0), (19, 0), EmploymentType::FullTime, 2);

        // OT1 max(1.5, 1.5), OT2 max(2.0, 1.5)
        assert_eq!(cost.lines[1].multiplier, dec("1.5"));
        assert_eq!(cost.lines[2].multiplier, dec("2.0"));
        assert_eq!(cost.estimated_cost, dec("510"));
    }

    #[test]
    fn test_stacking_sunday_overtime_uses_penalty() {
        let cost = cost(DayOfWeek::Sunday, (8, 0), (19, 0), EmploymentType::FullTime, 2);

        // 8h × 2.0 $480, OT1 max(1.5, 2.0) $120, OT2 max(2.0, 2.0) $60
        assert_eq!(cost.lines[1].category, CostCategory::OvertimeTier1);
        assert_eq!(cost.lines[1].multiplier, dec("2.0"));
        assert_eq!(cost.lines[1].clause_ref, "29.1(b)");
        assert_eq!(cost.estimated_cost, dec("660"));
    }

    #[test]
    fn test_stacking_public_holiday_casual() {
        let cost = cost(DayOfWeek::PublicHoliday, (8, 0), (19, 0), EmploymentType::Casual, 2);

        // Every hour at 2.75: 11h × $30 × 2.75
        for line in &cost.lines {
            assert_eq!(line.multiplier, dec("2.75"));
        }
        assert_eq!(cost.estimated_cost, dec("907.5"));
        assert_eq!(cost.hours.overtime_hours, dec("3"));
        assert_eq!(cost.hours.penalty_hours, dec("8"));
    }

    #[test]
    fn test_cleaners_multiply_cost_not_hours() {
        let mut shift = make_shift(
            "shift_001",
            DayOfWeek::Monday,
            t(9, 0),
            t(13, 0),
            EmploymentType::FullTime,
            2,
        );
        shift.number_of_cleaners = 3;

        let cost = compute_shift_cost(&shift, &sample_rate_table()).unwrap();

        // 4h × $30 × 3 cleaners
        assert_eq!(cost.estimated_cost, dec("360"));
        assert_eq!(cost.hours.net_hours, dec("4"));
        assert_eq!(cost.lines[0].cleaners, 3);
    }

    #[test]
    fn test_allowances_added_to_estimated_cost() {
        let mut shift = make_shift(
            "shift_001",
            DayOfWeek::Monday,
            t(9, 0),
            t(13, 0),
            EmploymentType::FullTime,
            2,
        );
        shift.allowances.insert("laundry".to_string());

        let cost = compute_shift_cost(&shift, &sample_rate_table()).unwrap();

        assert_eq!(cost.allowances.len(), 1);
        assert_eq!(cost.estimated_cost, dec("121.50"));
    }

    #[test]
    fn test_zero_cleaners_is_validation_error() {
        let mut shift = make_shift(
            "shift_009",
            DayOfWeek::Monday,
            t(9, 0),
            t(13, 0),
            EmploymentType::FullTime,
            2,
        );
        shift.number_of_cleaners = 0;

        match compute_shift_cost(&shift, &sample_rate_table()).unwrap_err() {
            EngineError::Validation { field, .. } => {
                assert_eq!(field, "shifts[shift_009].number_of_cleaners")
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_level_is_validation_error() {
        let shift = make_shift(
            "shift_001",
            DayOfWeek::Monday,
            t(9, 0),
            t(13, 0),
            EmploymentType::FullTime,
            9,
        );

        let err = compute_shift_cost(&shift, &sample_rate_table()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_audit_trace_order() {
        let cost = cost(DayOfWeek::Monday, (7, 0), (17, 0), EmploymentType::Casual, 2);

        let rule_ids: Vec<&str> = cost.audit_steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rule_ids,
            vec![
                "time_arithmetic",
                "base_rate_lookup",
                "daily_overtime_detection",
                "ordinary_rate",
                "overtime_tier1_rate"
            ]
        );
        for (i, step) in cost.audit_steps.iter().enumerate() {
            assert_eq!(step.step_number as usize, i + 1);
        }
    }

    #[test]
    fn test_hours_breakdown_sums_to_net() {
        let cost = cost(DayOfWeek::Friday, (14, 0), (2, 0), EmploymentType::PartTime, 3);

        let hours = &cost.hours;
        assert_eq!(hours.net_hours, dec("12"));
        assert_eq!(
            hours.ordinary_hours + hours.penalty_hours + hours.overtime_hours,
            hours.net_hours
        );
    }

    #[test]
    fn test_overtime_lines_follow_detected_tiers() {
        let mut shift = make_shift(
            "long",
            DayOfWeek::Monday,
            t(6, 0),
            t(17, 30),
            EmploymentType::FullTime,
            2,
        );
        shift.break_minutes = 30;
        let cost = compute_shift_cost(&shift, &sample_rate_table()).unwrap();

        let detection = cost
            .audit_steps
            .iter()
            .find(|step| step.rule_id == "daily_overtime_detection")
            .unwrap();
        assert_eq!(detection.output["tier_1_hours"].as_str().unwrap(), "2");
        assert_eq!(detection.output["tier_2_hours"].as_str().unwrap(), "1");

        let tier_hours: Vec<(CostCategory, Decimal)> = cost
            .lines
            .iter()
            .filter(|line| line.category.is_overtime())
            .map(|line| (line.category, line.hours))
            .collect();
        assert_eq!(
            tier_hours,
            vec![
                (CostCategory::OvertimeTier1, dec("2")),
                (CostCategory::OvertimeTier2, dec("1"))
            ]
        );
        assert_eq!(cost.hours.overtime_hours, dec("3"));
        assert_eq!(cost.hours.ordinary_hours, dec("8"));
    }
}
