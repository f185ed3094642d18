//! Subcontractor line model and billing frequencies.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How often a subcontractor charge is incurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Charged every day.
    Daily,
    /// Charged every week.
    Weekly,
    /// Charged every two weeks.
    Fortnightly,
    /// Charged every month.
    Monthly,
    /// Charged every three months.
    Quarterly,
    /// Charged every year.
    Yearly,
    /// Charged a single time.
    Once,
}

impl Frequency {
    /// Every frequency, shortest period first.
    pub const ALL: [Frequency; 7] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Fortnightly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Yearly,
        Frequency::Once,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Fortnightly => "fortnightly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Yearly => "yearly",
            Frequency::Once => "once",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let normalized = s.trim().to_lowercase();
        Frequency::ALL
            .into_iter()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| {
                EngineError::validation("frequency", format!("unknown frequency '{}'", s))
            })
    }
}

/// One external service contracted for a quote or site.
///
/// # Example
///
/// ```
/// use quote_engine::models::{Frequency, SubcontractorLine};
/// use rust_decimal::Decimal;
///
/// let line: SubcontractorLine = serde_json::from_str(r#"{
///     "name": "Acme Windows",
///     "service": "External window cleaning",
///     "cost": "1200.00",
///     "frequency": "yearly"
/// }"#).unwrap();
///
/// assert_eq!(line.frequency, Frequency::Yearly);
/// assert!(!line.is_flat_rate);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcontractorLine {
    /// The subcontractor's business name.
    pub name: String,
    /// The service being provided.
    #[serde(default)]
    pub service: String,
    /// The charge per billing period.
    pub cost: Decimal,
    /// The billing period of the charge.
    pub frequency: Frequency,
    /// Whether the charge is a flat rate rather than a per-visit charge.
    #[serde(default)]
    pub is_flat_rate: bool,
    /// Contact person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    /// Contact phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl SubcontractorLine {
    /// Checks the line's cost is not negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.cost < Decimal::ZERO {
            return Err(EngineError::validation(
                format!("subcontractors[{}].cost", self.name),
                format!("must not be negative, got {}", self.cost),
            ));
        }
        Ok(())
    }
}
