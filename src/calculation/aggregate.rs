//! Aggregate labour costing across a roster.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{
    AggregateLabor, BrokenShift, CostingWarning, EmployeeGroup, OvertimeGroup, Shift, group_key,
};

use super::broken_shift::{broken_shift_days, detect_broken_shifts};
use super::rate_table::RateTable;
use super::shift_cost::compute_shift_cost;

/// Costs every shift in a roster and summarises overtime and broken shifts.
///
/// The total cost is the exact sum of the shift costs. Overtime is grouped
/// by employment type, level and number of cleaners; every group that
/// appears in the roster is reported, with or without overtime.
///
/// # Errors
///
/// Returns the first shift's validation error, if any shift is invalid.
///
/// # Example
///
/// ```no_run
/// use quote_engine::calculation::compute_aggregate_labor;
/// use quote_engine::config::ConfigLoader;
///
/// let rates = ConfigLoader::load("./config/cleaning_services")?.latest_rate_table()?;
/// let labor = compute_aggregate_labor(&[], &rates)?;
/// assert!(labor.total_cost.is_zero());
/// # Ok::<(), quote_engine::error::EngineError>(())
/// ```
pub fn compute_aggregate_labor(shifts: &[Shift], rates: &RateTable) -> EngineResult<AggregateLabor> {
    let shift_costs = shifts
        .iter()
        .map(|shift| compute_shift_cost(shift, rates))
        .collect::<EngineResult<Vec<_>>>()?;

    let total_cost: Decimal = shift_costs.iter().map(|cost| cost.estimated_cost).sum();
    let total_hours: Decimal = shifts.iter().map(Shift::total_hours).sum();

    let weekly_threshold = rates.weekly_threshold_hours();
    let mut overtime_by_group: BTreeMap<String, OvertimeGroup> = BTreeMap::new();
    for (shift, cost) in shifts.iter().zip(&shift_costs) {
        let group = overtime_by_group
            .entry(group_key(shift.employment_type, shift.level, shift.number_of_cleaners))
            .or_insert_with(|| OvertimeGroup {
                employment_type: shift.employment_type,
                level: shift.level,
                number_of_cleaners: shift.number_of_cleaners,
                overtime_hours: Decimal::ZERO,
                weekly_hours: Decimal::ZERO,
                weekly_excess_hours: Decimal::ZERO,
            });
        group.overtime_hours += cost.hours.overtime_hours;
        group.weekly_hours += cost.hours.net_hours;
    }
    for group in overtime_by_group.values_mut() {
        group.weekly_excess_hours = (group.weekly_hours - weekly_threshold).max(Decimal::ZERO);
    }

    let broken_shifts = detect_broken_shifts(shifts, rates.broken_shift_gap_minutes());
    let broken_shift_days = broken_shift_days(&broken_shifts);

    let warnings = build_warnings(&overtime_by_group, &broken_shifts, rates);

    debug!(
        shifts = shifts.len(),
        total_cost = %total_cost,
        total_hours = %total_hours,
        overtime_groups = overtime_by_group.len(),
        broken_shifts = broken_shifts.len(),
        "Aggregated roster labour"
    );

    Ok(AggregateLabor {
        shift_costs,
        total_cost,
        total_hours,
        overtime_by_group,
        broken_shift_days,
        broken_shifts,
        warnings,
    })
}

fn build_warnings(
    overtime_by_group: &BTreeMap<String, OvertimeGroup>,
    broken_shifts: &[BrokenShift],
    rates: &RateTable,
) -> Vec<CostingWarning> {
    let mut warnings = Vec::new();

    for group in overtime_by_group.values() {
        let employees = EmployeeGroup {
            employment_type: group.employment_type,
            level: group.level,
        };

        if group.overtime_hours > Decimal::ZERO {
            warnings.push(CostingWarning {
                code: "DAILY_OVERTIME".to_string(),
                message: format!(
                    "{} × {} employees: {} hours overtime",
                    group.number_of_cleaners,
                    employees,
                    group.overtime_hours.normalize()
                ),
                severity: "medium".to_string(),
            });
        }

        if group.weekly_excess_hours > Decimal::ZERO {
            warnings.push(CostingWarning {
                code: "WEEKLY_HOURS_EXCEEDED".to_string(),
                message: format!(
                    "{} × {} employees: {} hours rostered, {} above the {} hour week",
                    group.number_of_cleaners,
                    employees,
                    group.weekly_hours.normalize(),
                    group.weekly_excess_hours.normalize(),
                    rates.weekly_threshold_hours().normalize()
                ),
                severity: "medium".to_string(),
            });
        }
    }

    for broken in broken_shifts {
        let employees = EmployeeGroup {
            employment_type: broken.employment_type,
            level: broken.level,
        };
        warnings.push(CostingWarning {
            code: "BROKEN_SHIFT".to_string(),
            message: format!(
                "{} {} employees: {} minute gap between shifts '{}' and '{}' (clause {})",
                broken.day,
                employees,
                broken.gap_minutes,
                broken.first_shift_id,
                broken.second_shift_id,
                rates.broken_shift_clause()
            ),
            severity: "low".to_string(),
        });
    }

    warnings
}
