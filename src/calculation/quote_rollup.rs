//! Quote totals and pricing.
//!
//! Overhead is charged on labour; margin is charged on labour plus
//! overhead. Subcontractor costs pass through to the price without margin.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{PricedQuote, Quote, QuoteTotals};

use super::aggregate::compute_aggregate_labor;
use super::rate_table::RateTable;
use super::subcontractor::{compute_subcontractor_monthly_cost, weekly_factor};

/// Computes the derived totals of a quote.
///
/// Profit percentage is zero when the cost before margin is zero.
///
/// # Errors
///
/// Returns a validation error if any derived amount does not fit in a
/// `Decimal`.
///
/// # Examples
///
/// ```
/// use quote_engine::calculation::compute_quote_totals;
/// use rust_decimal::Decimal;
///
/// let totals = compute_quote_totals(
///     Decimal::new(1000, 0),
///     Decimal::ZERO,
///     Decimal::new(15, 0),
///     Decimal::new(20, 0),
/// )
/// .unwrap();
///
/// assert_eq!(totals.overhead_cost, Decimal::new(150, 0));
/// assert_eq!(totals.cost_before_margin, Decimal::new(1150, 0));
/// assert_eq!(totals.margin_amount, Decimal::new(230, 0));
/// assert_eq!(totals.total_price, Decimal::new(1380, 0));
/// assert_eq!(totals.profit_percentage, Decimal::new(20, 0));
/// ```
pub fn compute_quote_totals(
    labor_cost: Decimal,
    subcontractor_cost: Decimal,
    overhead_percentage: Decimal,
    margin_percentage: Decimal,
) -> EngineResult<QuoteTotals> {
    let hundred = Decimal::ONE_HUNDRED;

    let overhead_cost =
        percent_of(labor_cost, overhead_percentage).ok_or_else(|| overflow("overhead_cost"))?;
    let marked_up_base = labor_cost
        .checked_add(overhead_cost)
        .ok_or_else(|| overflow("overhead_cost"))?;
    let cost_before_margin = marked_up_base
        .checked_add(subcontractor_cost)
        .ok_or_else(|| overflow("cost_before_margin"))?;
    let margin_amount =
        percent_of(marked_up_base, margin_percentage).ok_or_else(|| overflow("margin_amount"))?;
    let total_price = (Decimal::ONE + margin_percentage / hundred)
        .checked_mul(marked_up_base)
        .and_then(|priced| priced.checked_add(subcontractor_cost))
        .ok_or_else(|| overflow("total_price"))?;

    let profit_percentage = if cost_before_margin.is_zero() {
        Decimal::ZERO
    } else {
        margin_amount
            .checked_div(cost_before_margin)
            .and_then(|ratio| ratio.checked_mul(hundred))
            .ok_or_else(|| overflow("profit_percentage"))?
    };

    Ok(QuoteTotals {
        labor_cost,
        overhead_cost,
        subcontractor_cost,
        cost_before_margin,
        margin_amount,
        total_price,
        profit_percentage,
    })
}

fn percent_of(amount: Decimal, percentage: Decimal) -> Option<Decimal> {
    amount.checked_mul(percentage)?.checked_div(Decimal::ONE_HUNDRED)
}

fn overflow(field: &str) -> EngineError {
    EngineError::validation(field, "amount is too large to calculate")
}

/// Prices a quote against a rate table.
///
/// The shifts are one roster week, so their labour cost is converted to a
/// monthly figure with the weekly factor before it is combined with the
/// monthly subcontractor cost.
///
/// # Errors
///
/// Returns a validation error for any invalid shift or subcontractor line,
/// or for an amount too large to represent.
pub fn price_quote(quote: &Quote, rates: &RateTable) -> EngineResult<PricedQuote> {
    let labor = compute_aggregate_labor(&quote.shifts, rates)?;
    let subcontractor_monthly_cost = compute_subcontractor_monthly_cost(&quote.subcontractors)?;

    let weekly_labor_cost = labor.total_cost;
    let monthly_labor_cost = weekly_labor_cost
        .checked_mul(weekly_factor())
        .ok_or_else(|| overflow("monthly_labor_cost"))?;

    let totals = compute_quote_totals(
        monthly_labor_cost,
        subcontractor_monthly_cost,
        quote.overhead_percentage,
        quote.margin_percentage,
    )?;

    debug!(
        quote_id = %quote.id,
        rates_effective_date = %rates.effective_date(),
        weekly_labor_cost = %weekly_labor_cost,
        subcontractor_monthly_cost = %subcontractor_monthly_cost,
        total_price = %totals.total_price,
        "Priced quote"
    );

    Ok(PricedQuote {
        quote_id: quote.id,
        rates_effective_date: rates.effective_date(),
        labor,
        weekly_labor_cost,
        monthly_labor_cost,
        subcontractor_monthly_cost,
        totals,
    })
}
