//! Costing result models for the quote costing engine.
//!
//! This module contains the types returned by the costing functions: cost
//! lines and hour breakdowns for a single shift, aggregate labour results
//! with overtime and broken-shift signals, and priced quote totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::employment::EmploymentType;
use super::shift::DayOfWeek;

/// The category of labour cost for a cost line.
///
/// # Example
///
/// ```
/// use quote_engine::models::CostCategory;
///
/// assert!(CostCategory::Sunday.is_penalty());
/// assert!(CostCategory::OvertimeTier2.is_overtime());
/// assert!(!CostCategory::Ordinary.is_penalty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    /// Weekday daytime hours.
    Ordinary,
    /// Weekday hours inside the night window.
    Night,
    /// Saturday hours.
    Saturday,
    /// Sunday hours.
    Sunday,
    /// Public holiday hours.
    PublicHoliday,
    /// The first two overtime hours.
    OvertimeTier1,
    /// Overtime hours after the first two.
    OvertimeTier2,
}

impl CostCategory {
    /// Returns true for hours paid at a day or night penalty rate.
    pub fn is_penalty(self) -> bool {
        matches!(
            self,
            CostCategory::Night
                | CostCategory::Saturday
                | CostCategory::Sunday
                | CostCategory::PublicHoliday
        )
    }

    /// Returns true for overtime hours.
    pub fn is_overtime(self) -> bool {
        matches!(self, CostCategory::OvertimeTier1 | CostCategory::OvertimeTier2)
    }

    /// Returns the snake_case name used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            CostCategory::Ordinary => "ordinary",
            CostCategory::Night => "night",
            CostCategory::Saturday => "saturday",
            CostCategory::Sunday => "sunday",
            CostCategory::PublicHoliday => "public_holiday",
            CostCategory::OvertimeTier1 => "overtime_tier1",
            CostCategory::OvertimeTier2 => "overtime_tier2",
        }
    }
}

impl std::fmt::Display for CostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single priced bucket of hours within a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLine {
    /// The category of hours.
    pub category: CostCategory,
    /// Hours in this bucket for one cleaner.
    pub hours: Decimal,
    /// The base hourly rate for the level.
    pub base_rate: Decimal,
    /// The multiplier applied to the base rate.
    pub multiplier: Decimal,
    /// The effective hourly rate (base rate × multiplier).
    pub rate: Decimal,
    /// Number of cleaners the bucket is paid for.
    pub cleaners: u32,
    /// Total for the bucket (hours × rate × cleaners).
    pub amount: Decimal,
    /// Reference to the award clause that sets the multiplier.
    pub clause_ref: String,
}

/// An allowance charged on a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceCharge {
    /// The allowance identifier from the shift.
    pub allowance_id: String,
    /// Human-readable allowance name.
    pub name: String,
    /// Units per cleaner (shifts or hours).
    pub units: Decimal,
    /// Amount per unit.
    pub rate: Decimal,
    /// Number of cleaners the allowance is paid for.
    pub cleaners: u32,
    /// Total allowance amount.
    pub amount: Decimal,
    /// Reference to the award clause for the allowance.
    pub clause_ref: String,
}

/// Hours for one cleaner on a shift, split into buckets.
///
/// `ordinary_hours + penalty_hours + overtime_hours == net_hours`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursBreakdown {
    /// Worked hours after the break.
    pub net_hours: Decimal,
    /// Weekday daytime hours within the daily threshold.
    pub ordinary_hours: Decimal,
    /// Night, weekend or public holiday hours within the daily threshold.
    pub penalty_hours: Decimal,
    /// Hours beyond the daily threshold.
    pub overtime_hours: Decimal,
}

/// A single step in the audit trace recording a costing decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the award clause for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning the application should show alongside a costing.
///
/// Warnings never change a cost; they flag conditions that need a person
/// to look at the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostingWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium" or "high").
    pub severity: String,
}

/// The cost of a single shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCost {
    /// The id of the costed shift.
    pub shift_id: String,
    /// Total estimated cost of the shift, across all cleaners.
    pub estimated_cost: Decimal,
    /// Hours breakdown for one cleaner.
    pub hours: HoursBreakdown,
    /// Priced hour buckets, in the order they are worked.
    pub lines: Vec<CostLine>,
    /// Allowances charged on the shift.
    pub allowances: Vec<AllowanceCharge>,
    /// Audit trace of the costing decisions.
    pub audit_steps: Vec<AuditStep>,
}

/// Overtime accrued by one group of cleaners across a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeGroup {
    /// The employment type of the group.
    pub employment_type: EmploymentType,
    /// The classification level of the group.
    pub level: u8,
    /// Number of cleaners rostered together.
    pub number_of_cleaners: u32,
    /// Daily overtime hours per cleaner, summed over the group's shifts.
    pub overtime_hours: Decimal,
    /// Worked hours per cleaner across the week.
    pub weekly_hours: Decimal,
    /// Weekly hours above the weekly ordinary threshold. Reported, not costed.
    pub weekly_excess_hours: Decimal,
}

impl OvertimeGroup {
    /// Returns the group key, e.g. `"casual-2-1"`.
    ///
    /// # Example
    ///
    /// ```
    /// use quote_engine::models::{EmploymentType, OvertimeGroup};
    /// use rust_decimal::Decimal;
    ///
    /// let group = OvertimeGroup {
    ///     employment_type: EmploymentType::Casual,
    ///     level: 2,
    ///     number_of_cleaners: 1,
    ///     overtime_hours: Decimal::new(2, 0),
    ///     weekly_hours: Decimal::new(10, 0),
    ///     weekly_excess_hours: Decimal::ZERO,
    /// };
    /// assert_eq!(group.key(), "casual-2-1");
    /// ```
    pub fn key(&self) -> String {
        group_key(self.employment_type, self.level, self.number_of_cleaners)
    }
}

/// Builds the key used to index overtime groups.
pub fn group_key(employment_type: EmploymentType, level: u8, number_of_cleaners: u32) -> String {
    format!("{}-{}-{}", employment_type.key(), level, number_of_cleaners)
}

/// A gap between two shifts of the same group on the same day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenShift {
    /// The day with the broken shift.
    pub day: DayOfWeek,
    /// The employment type of the group.
    pub employment_type: EmploymentType,
    /// The classification level of the group.
    pub level: u8,
    /// Id of the shift before the gap.
    pub first_shift_id: String,
    /// Id of the shift after the gap.
    pub second_shift_id: String,
    /// Length of the unpaid gap in minutes.
    pub gap_minutes: i64,
}

/// Aggregate labour costing across a roster of shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateLabor {
    /// Per-shift costs, in input order.
    pub shift_costs: Vec<ShiftCost>,
    /// Sum of shift estimated costs.
    pub total_cost: Decimal,
    /// Sum of net hours × cleaners.
    pub total_hours: Decimal,
    /// Overtime summaries keyed by group key.
    pub overtime_by_group: BTreeMap<String, OvertimeGroup>,
    /// Days with at least one broken shift, in roster order.
    pub broken_shift_days: Vec<DayOfWeek>,
    /// Every detected broken shift.
    pub broken_shifts: Vec<BrokenShift>,
    /// Warnings for overtime and broken shifts.
    pub warnings: Vec<CostingWarning>,
}

/// Derived totals of a quote.
///
/// Every field is a pure function of labour cost, subcontractor cost,
/// overhead percentage and margin percentage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    /// Labour cost.
    pub labor_cost: Decimal,
    /// Overhead cost (labour × overhead%).
    pub overhead_cost: Decimal,
    /// Monthly subcontractor cost.
    pub subcontractor_cost: Decimal,
    /// Labour + overhead + subcontractors.
    pub cost_before_margin: Decimal,
    /// Margin on labour + overhead.
    pub margin_amount: Decimal,
    /// Client-facing price.
    pub total_price: Decimal,
    /// Margin as a percentage of cost before margin.
    pub profit_percentage: Decimal,
}

/// A fully priced quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedQuote {
    /// The id of the priced quote.
    pub quote_id: Uuid,
    /// Effective date of the rates used.
    pub rates_effective_date: NaiveDate,
    /// Aggregate labour costing of the weekly roster.
    pub labor: AggregateLabor,
    /// Labour cost of one roster week.
    pub weekly_labor_cost: Decimal,
    /// Labour cost normalised to a month.
    pub monthly_labor_cost: Decimal,
    /// Subcontractor cost normalised to a month.
    pub subcontractor_monthly_cost: Decimal,
    /// Monthly quote totals.
    pub totals: QuoteTotals,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_cost_category_serialization() {
        assert_eq!(
            serde_json::to_string(&CostCategory::PublicHoliday).unwrap(),
            "\"public_holiday\""
        );
        assert_eq!(
            serde_json::to_string(&CostCategory::OvertimeTier1).unwrap(),
            "\"overtime_tier1\""
        );
        let parsed: CostCategory = serde_json::from_str("\"night\"").unwrap();
        assert_eq!(parsed, CostCategory::Night);
    }

    #[test]
    fn test_penalty_and_overtime_are_disjoint() {
        for category in [
            CostCategory::Ordinary,
            CostCategory::Night,
            CostCategory::Saturday,
            CostCategory::Sunday,
            CostCategory::PublicHoliday,
            CostCategory::OvertimeTier1,
            CostCategory::OvertimeTier2,
        ] {
            assert!(!(category.is_penalty() && category.is_overtime()));
        }
    }

    #[test]
    fn test_group_key_uses_hyphenated_employment() {
        assert_eq!(group_key(EmploymentType::PartTime, 3, 2), "part-time-3-2");
        assert_eq!(group_key(EmploymentType::FullTime, 5, 10), "full-time-5-10");
    }

    #[test]
    fn test_quote_totals_default_is_zero() {
        let totals = QuoteTotals::default();
        assert_eq!(totals.total_price, Decimal::ZERO);
        assert_eq!(totals.profit_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_cost_line_serializes_decimals_as_strings() {
        let line = CostLine {
            category: CostCategory::Ordinary,
            hours: dec("8.0"),
            base_rate: dec("25.98"),
            multiplier: dec("1.0"),
            rate: dec("25.98"),
            cleaners: 2,
            amount: dec("415.68"),
            clause_ref: "16".to_string(),
        };

        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"category\":\"ordinary\""));
        assert!(json.contains("\"hours\":\"8.0\""));
        assert!(json.contains("\"amount\":\"415.68\""));

        let back: CostLine = serde_json::from_str(&json).unwrap();
        assert_eq!(back, line);
    }

    #[test]
    fn test_aggregate_overtime_map_serializes_by_key() {
        let mut overtime_by_group = BTreeMap::new();
        let group = OvertimeGroup {
            employment_type: EmploymentType::Casual,
            level: 2,
            number_of_cleaners: 1,
            overtime_hours: dec("2"),
            weekly_hours: dec("10"),
            weekly_excess_hours: dec("0"),
        };
        overtime_by_group.insert(group.key(), group);

        let aggregate = AggregateLabor {
            shift_costs: vec![],
            total_cost: Decimal::ZERO,
            total_hours: Decimal::ZERO,
            overtime_by_group,
            broken_shift_days: vec![DayOfWeek::Monday],
            broken_shifts: vec![],
            warnings: vec![],
        };

        let json = serde_json::to_value(&aggregate).unwrap();
        assert_eq!(json["overtime_by_group"]["casual-2-1"]["overtime_hours"], "2");
        assert_eq!(json["broken_shift_days"][0], "monday");
    }
}
