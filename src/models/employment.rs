//! Employment type and employee group types.
//!
//! Shifts are not rostered to named employees; they are rostered to a group
//! of interchangeable cleaners identified by employment type and level.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The lowest classification level.
pub const MIN_LEVEL: u8 = 1;

/// The highest classification level.
pub const MAX_LEVEL: u8 = 5;

/// Represents the type of employment arrangement.
///
/// Deserializes from snake_case (`"part_time"`) and also accepts the
/// hyphenated spelling used in group keys (`"part-time"`).
///
/// # Example
///
/// ```
/// use quote_engine::models::EmploymentType;
///
/// let parsed: EmploymentType = "Part-Time".parse().unwrap();
/// assert_eq!(parsed, EmploymentType::PartTime);
/// assert_eq!(parsed.key(), "part-time");
/// assert!("contractor".parse::<EmploymentType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Casual employment (no guaranteed hours, includes casual loading).
    Casual,
    /// Part-time employment.
    #[serde(alias = "part-time")]
    PartTime,
    /// Full-time employment.
    #[serde(alias = "full-time")]
    FullTime,
}

impl EmploymentType {
    /// Returns the hyphenated key used in overtime group keys.
    pub fn key(self) -> &'static str {
        match self {
            EmploymentType::Casual => "casual",
            EmploymentType::PartTime => "part-time",
            EmploymentType::FullTime => "full-time",
        }
    }

    /// Returns true for casual employment.
    pub fn is_casual(self) -> bool {
        self == EmploymentType::Casual
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EmploymentType {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "casual" => Ok(EmploymentType::Casual),
            "part-time" => Ok(EmploymentType::PartTime),
            "full-time" => Ok(EmploymentType::FullTime),
            _ => Err(EngineError::validation(
                "employment_type",
                format!("unknown employment type '{}'", s),
            )),
        }
    }
}

/// A group of interchangeable employees sharing employment type and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeGroup {
    /// The employment type of the group.
    pub employment_type: EmploymentType,
    /// The classification level of the group.
    pub level: u8,
}

impl fmt::Display for EmployeeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {} {}", self.level, self.employment_type)
    }
}

/// Checks that a level is within the classification range.
pub fn validate_level(level: u8) -> EngineResult<()> {
    if (MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(EngineError::validation(
            "level",
            format!(
                "must be between {} and {}, got {}",
                MIN_LEVEL, MAX_LEVEL, level
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_snake_case_and_hyphenated() {
        let snake: EmploymentType = serde_json::from_str("\"full_time\"").unwrap();
        let hyphen: EmploymentType = serde_json::from_str("\"full-time\"").unwrap();
        assert_eq!(snake, EmploymentType::FullTime);
        assert_eq!(hyphen, EmploymentType::FullTime);
    }

    #[test]
    fn test_serialize_is_snake_case() {
        let json = serde_json::to_string(&EmploymentType::PartTime).unwrap();
        assert_eq!(json, "\"part_time\"");
    }

    #[test]
    fn test_deserialize_unknown_type_fails() {
        let result: Result<EmploymentType, _> = serde_json::from_str("\"contractor\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_str_accepts_spacing_variants() {
        assert_eq!(
            "full time".parse::<EmploymentType>().unwrap(),
            EmploymentType::FullTime
        );
        assert_eq!(
            "PART_TIME".parse::<EmploymentType>().unwrap(),
            EmploymentType::PartTime
        );
        assert_eq!(
            " casual ".parse::<EmploymentType>().unwrap(),
            EmploymentType::Casual
        );
    }

    #[test]
    fn test_from_str_unknown_is_validation_error() {
        let err = "temp".parse::<EmploymentType>().unwrap_err();
        match err {
            EngineError::Validation { field, message } => {
                assert_eq!(field, "employment_type");
                assert!(message.contains("temp"));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_group_display() {
        let group = EmployeeGroup {
            employment_type: EmploymentType::Casual,
            level: 2,
        };
        assert_eq!(group.to_string(), "Level 2 casual");
    }

    #[test]
    fn test_validate_level_bounds() {
        assert!(validate_level(1).is_ok());
        assert!(validate_level(5).is_ok());
        assert!(validate_level(0).unwrap_err().is_validation());
        assert!(validate_level(6).unwrap_err().is_validation());
    }
}
