//! Quote and overhead profile models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{RateTable, price_quote};
use crate::error::EngineResult;

use super::costing_result::{PricedQuote, QuoteTotals};
use super::shift::Shift;
use super::subcontractor::SubcontractorLine;

/// The lifecycle status of a quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// Being edited; not yet sent to the client.
    #[default]
    Draft,
    /// Sent to the client.
    Sent,
    /// Accepted by the client.
    Accepted,
    /// Declined by the client.
    Declined,
}

/// A named overhead percentage preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverheadProfile {
    /// Unique identifier for the profile.
    pub id: Uuid,
    /// Display name, e.g. "Standard commercial".
    pub name: String,
    /// Overhead as a percentage of labour cost.
    pub labor_percentage: Decimal,
}

/// A priced proposal for cleaning a client site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier for the quote.
    pub id: Uuid,
    /// The client the quote is for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// The site the quote covers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    /// Short title shown in quote lists.
    #[serde(default)]
    pub title: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: QuoteStatus,
    /// The weekly roster of shifts, in display order.
    #[serde(default)]
    pub shifts: Vec<Shift>,
    /// Subcontracted services.
    #[serde(default)]
    pub subcontractors: Vec<SubcontractorLine>,
    /// The overhead profile the overhead percentage came from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overhead_profile_id: Option<Uuid>,
    /// Overhead as a percentage of labour cost.
    pub overhead_percentage: Decimal,
    /// Margin as a percentage of labour + overhead.
    pub margin_percentage: Decimal,
    /// Derived totals, written only by [`Quote::recalculate`].
    #[serde(default)]
    pub totals: QuoteTotals,
}

impl Quote {
    /// Creates an empty draft quote.
    ///
    /// # Example
    ///
    /// ```
    /// use quote_engine::models::{Quote, QuoteStatus};
    /// use rust_decimal::Decimal;
    ///
    /// let quote = Quote::new_draft("Level 3 offices", Decimal::new(15, 0), Decimal::new(20, 0));
    /// assert_eq!(quote.status, QuoteStatus::Draft);
    /// assert!(quote.shifts.is_empty());
    /// assert_eq!(quote.totals.total_price, Decimal::ZERO);
    /// ```
    pub fn new_draft(
        title: impl Into<String>,
        overhead_percentage: Decimal,
        margin_percentage: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: None,
            site_id: None,
            title: title.into(),
            status: QuoteStatus::Draft,
            shifts: Vec::new(),
            subcontractors: Vec::new(),
            overhead_profile_id: None,
            overhead_percentage,
            margin_percentage,
            totals: QuoteTotals::default(),
        }
    }

    /// Fills the overhead percentage from a profile and records the profile id.
    pub fn apply_overhead_profile(&mut self, profile: &OverheadProfile) {
        self.overhead_percentage = profile.labor_percentage;
        self.overhead_profile_id = Some(profile.id);
    }

    /// Reprices the quote, writing each shift's estimated cost and the quote totals.
    ///
    /// On error the quote is left unchanged.
    pub fn recalculate(&mut self, rates: &RateTable) -> EngineResult<PricedQuote> {
        let priced = price_quote(self, rates)?;

        for (shift, cost) in self.shifts.iter_mut().zip(&priced.labor.shift_costs) {
            shift.estimated_cost = Some(cost.estimated_cost);
        }
        self.totals = priced.totals.clone();

        Ok(priced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_apply_overhead_profile() {
        let mut quote = Quote::new_draft("Warehouse", dec("10"), dec("20"));
        let profile = OverheadProfile {
            id: Uuid::new_v4(),
            name: "Standard commercial".to_string(),
            labor_percentage: dec("17.5"),
        };

        quote.apply_overhead_profile(&profile);

        assert_eq!(quote.overhead_percentage, dec("17.5"));
        assert_eq!(quote.overhead_profile_id, Some(profile.id));
    }

    #[test]
    fn test_recalculate_writes_shift_costs_and_totals() {
        use crate::calculation::test_support::{make_shift, sample_rate_table, t};
        use crate::models::{DayOfWeek, EmploymentType};

        let mut quote = Quote::new_draft("Warehouse", dec("10"), dec("20"));
        quote.shifts.push(make_shift(
            "mon",
            DayOfWeek::Monday,
            t(9, 0),
            t(17, 0),
            EmploymentType::FullTime,
            2,
        ));

        let priced = quote.recalculate(&sample_rate_table()).unwrap();

        assert_eq!(quote.shifts[0].estimated_cost, Some(dec("240")));
        assert_eq!(quote.totals, priced.totals);
        // 240 × 4.33
        assert_eq!(quote.totals.labor_cost, dec("1039.2"));
    }

    #[test]
    fn test_recalculate_leaves_quote_unchanged_on_error() {
        use crate::calculation::test_support::{make_shift, sample_rate_table, t};
        use crate::models::{DayOfWeek, EmploymentType};

        let mut quote = Quote::new_draft("Warehouse", dec("10"), dec("20"));
        let mut shift = make_shift(
            "mon",
            DayOfWeek::Monday,
            t(9, 0),
            t(17, 0),
            EmploymentType::FullTime,
            2,
        );
        shift.number_of_cleaners = 0;
        quote.shifts.push(shift);

        assert!(quote.recalculate(&sample_rate_table()).is_err());
        assert_eq!(quote.shifts[0].estimated_cost, None);
        assert_eq!(quote.totals, QuoteTotals::default());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&QuoteStatus::Declined).unwrap(),
            "\"declined\""
        );
        let parsed: QuoteStatus = serde_json::from_str("\"sent\"").unwrap();
        assert_eq!(parsed, QuoteStatus::Sent);
    }

    #[test]
    fn test_deserialize_minimal_quote() {
        let json = r#"{
            "id": "7d444840-9dc0-11d1-b245-5ffdce74fad2",
            "overhead_percentage": "15",
            "margin_percentage": "20"
        }"#;

        let quote: Quote = serde_json::from_str(json).unwrap();
        assert_eq!(quote.status, QuoteStatus::Draft);
        assert!(quote.shifts.is_empty());
        assert!(quote.subcontractors.is_empty());
        assert_eq!(quote.totals, QuoteTotals::default());
    }
}
