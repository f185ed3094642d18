//! Core data models for the quote costing engine.
//!
//! This module contains all the domain models used throughout the engine.

mod costing_result;
mod employment;
mod quote;
mod shift;
mod subcontractor;

pub use costing_result::{
    AggregateLabor, AllowanceCharge, AuditStep, BrokenShift, CostCategory, CostLine,
    CostingWarning, HoursBreakdown, OvertimeGroup, PricedQuote, QuoteTotals, ShiftCost,
    group_key,
};
pub use employment::{EmployeeGroup, EmploymentType, MAX_LEVEL, MIN_LEVEL, validate_level};
pub use quote::{OverheadProfile, Quote, QuoteStatus};
pub use shift::{DayOfWeek, DayType, Shift};
pub use subcontractor::{Frequency, SubcontractorLine};
