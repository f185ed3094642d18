//! Subcontractor cost normalisation.
//!
//! Every subcontracted service is brought to a monthly figure so it can be
//! added to monthly labour.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Frequency, SubcontractorLine};

/// Converts a cost at `frequency` to a monthly cost.
///
/// One-off costs are amortised over twelve months. Returns `None` if the
/// result does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use quote_engine::calculation::monthly_equivalent;
/// use quote_engine::models::Frequency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(monthly_equivalent(Decimal::new(1200, 0), Frequency::Yearly), Some(Decimal::new(100, 0)));
/// assert_eq!(monthly_equivalent(Decimal::new(100, 0), Frequency::Weekly), Some(Decimal::new(433, 0)));
/// assert_eq!(monthly_equivalent(Decimal::MAX, Frequency::Daily), None);
/// ```
pub fn monthly_equivalent(cost: Decimal, frequency: Frequency) -> Option<Decimal> {
    match frequency {
        Frequency::Daily => cost.checked_mul(Decimal::from(30)),
        Frequency::Weekly => cost.checked_mul(weekly_factor()),
        Frequency::Fortnightly => cost.checked_mul(Decimal::new(217, 2)),
        Frequency::Monthly => Some(cost),
        Frequency::Quarterly => cost.checked_div(Decimal::from(3)),
        Frequency::Yearly | Frequency::Once => cost.checked_div(Decimal::from(12)),
    }
}

/// Weeks per month used to convert weekly figures.
pub fn weekly_factor() -> Decimal {
    Decimal::new(433, 2)
}

/// Returns the monthly cost of one subcontractor line.
///
/// # Errors
///
/// Returns a validation error if the cost is negative or too large to
/// convert.
pub fn monthly_cost(line: &SubcontractorLine) -> EngineResult<Decimal> {
    line.validate()?;
    monthly_equivalent(line.cost, line.frequency).ok_or_else(|| {
        EngineError::validation(
            format!("subcontractors[{}].cost", line.name),
            format!("{} {} is too large to convert to a monthly cost", line.cost, line.frequency),
        )
    })
}

/// Returns the total monthly cost of a set of subcontractor lines.
///
/// # Errors
///
/// Returns a validation error for the first line with a negative or
/// oversized cost, or if the total overflows.
pub fn compute_subcontractor_monthly_cost(lines: &[SubcontractorLine]) -> EngineResult<Decimal> {
    lines.iter().try_fold(Decimal::ZERO, |total, line| {
        let monthly = monthly_cost(line)?;
        total.checked_add(monthly).ok_or_else(|| {
            EngineError::validation("subcontractors", "total monthly cost is too large")
        })
    })
}
