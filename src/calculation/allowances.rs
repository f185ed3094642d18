//! Shift allowance calculation functionality.
//!
//! Each allowance identifier on a shift is priced from the rate table,
//! either once per shift or per worked hour, for every cleaner on the shift.

use rust_decimal::Decimal;

use crate::config::AllowanceUnit;
use crate::error::EngineResult;
use crate::models::{AllowanceCharge, AuditStep, Shift};

use super::rate_table::RateTable;

/// The result of pricing a shift's allowances.
#[derive(Debug, Clone, Default)]
pub struct AllowanceResult {
    /// One charge per allowance identifier, in identifier order.
    pub charges: Vec<AllowanceCharge>,
    /// One audit step per charge.
    pub audit_steps: Vec<AuditStep>,
}

impl AllowanceResult {
    /// Returns the sum of all charges.
    pub fn total(&self) -> Decimal {
        self.charges.iter().map(|c| c.amount).sum()
    }
}

/// Prices every allowance on a shift.
///
/// # Errors
///
/// Returns a validation error if any allowance identifier is not in the
/// rate table.
pub fn calculate_allowances(
    shift: &Shift,
    rates: &RateTable,
    step_number_start: u32,
) -> EngineResult<AllowanceResult> {
    let mut result = AllowanceResult::default();
    let mut step_number = step_number_start;
    let cleaners = Decimal::from(shift.number_of_cleaners);

    for allowance_id in &shift.allowances {
        let allowance = rates
            .allowance(allowance_id)
            .map_err(|err| shift.scoped(err))?;

        let (units, unit_label) = match allowance.unit {
            AllowanceUnit::PerShift => (Decimal::ONE, "shift"),
            AllowanceUnit::PerHour => (shift.net_hours(), "hours"),
        };
        let amount = units * allowance.amount * cleaners;

        let audit_step = AuditStep {
            step_number,
            rule_id: format!("allowance_{}", allowance_id),
            rule_name: allowance.name.clone(),
            clause_ref: allowance.clause.clone(),
            input: serde_json::json!({
                "allowance_id": allowance_id,
                "units": units.normalize().to_string(),
                "rate": allowance.amount.normalize().to_string(),
                "cleaners": shift.number_of_cleaners
            }),
            output: serde_json::json!({
                "amount": amount.normalize().to_string()
            }),
            reasoning: format!(
                "{} {} × ${} × {} cleaners = ${}",
                units.normalize(),
                unit_label,
                allowance.amount.normalize(),
                shift.number_of_cleaners,
                amount.normalize()
            ),
        };

        result.charges.push(AllowanceCharge {
            allowance_id: allowance_id.clone(),
            name: allowance.name.clone(),
            units,
            rate: allowance.amount,
            cleaners: shift.number_of_cleaners,
            amount,
            clause_ref: allowance.clause.clone(),
        });
        result.audit_steps.push(audit_step);
        step_number += 1;
    }

    Ok(result)
}
