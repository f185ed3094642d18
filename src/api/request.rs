//! Request types for the quote costing API.
//!
//! `POST /shifts/cost` takes a bare [`Shift`] with an optional
//! [`ShiftCostQuery`]; the other endpoints wrap their inputs in the
//! structures below.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Quote, Shift, SubcontractorLine};

/// Query parameters for `POST /shifts/cost`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftCostQuery {
    /// Date to resolve rates for; the latest rates when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
}

/// Request body for `POST /labor/aggregate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateLaborRequest {
    /// The roster of shifts for one week.
    pub shifts: Vec<Shift>,
    /// Date to resolve rates for; the latest rates when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
}

/// Request body for `POST /subcontractors/monthly-cost`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcontractorCostRequest {
    /// The subcontractor lines to normalise.
    pub subcontractors: Vec<SubcontractorLine>,
}

/// Request body for `POST /quotes/totals`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteTotalsRequest {
    /// Labour cost.
    pub labor_cost: Decimal,
    /// Monthly subcontractor cost.
    pub subcontractor_monthly_cost: Decimal,
    /// Overhead as a percentage of labour.
    pub overhead_percentage: Decimal,
    /// Margin as a percentage of labour + overhead.
    pub margin_percentage: Decimal,
}

/// Request body for `POST /quotes/price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuoteRequest {
    /// The quote to price.
    pub quote: Quote,
    /// Date to resolve rates for; the latest rates when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
}
