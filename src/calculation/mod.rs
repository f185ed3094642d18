//! Costing logic for the quote costing engine.
//!
//! This module contains the pure costing functions: wall-clock time
//! arithmetic, rate table lookups, single shift costing with overtime and
//! penalty stacking, roster aggregation with broken-shift detection,
//! subcontractor monthly normalisation, and the quote rollup.

mod aggregate;
mod allowances;
mod broken_shift;
mod overtime;
mod quote_rollup;
mod rate_table;
mod shift_cost;
mod subcontractor;
mod time_arithmetic;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregate::compute_aggregate_labor;
pub use allowances::{AllowanceResult, calculate_allowances};
pub use broken_shift::{broken_shift_days, detect_broken_shifts};
pub use overtime::{DailyOvertimeDetection, detect_daily_overtime};
pub use quote_rollup::{compute_quote_totals, price_quote};
pub use rate_table::{OVERTIME_TIER_1_MINUTES, OvertimeTier, RateLookup, RateTable};
pub use shift_cost::compute_shift_cost;
pub use subcontractor::{
    compute_subcontractor_monthly_cost, monthly_cost, monthly_equivalent, weekly_factor,
};
pub use time_arithmetic::{
    MINUTES_PER_DAY, minute_of_day, minutes_to_hours, net_hours, net_minutes, parse_wall_clock,
    span_minutes, wall_clock,
};
