//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::money::MoneyError;

/// Domain-specific errors
///
/// Empty result sets and zero counts are valid outputs, never errors. Sales
/// whose user or product no longer resolves are handled by the query layer
/// (snapshot fields, or skipping the user) and never surface here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Start of a date range lies after its end
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Statistics requested over an empty window
    #[error("Degenerate statistics: {0}")]
    DegenerateStatistics(String),

    /// A caller-supplied parameter is outside its domain
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl DomainError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_invalid_range_error() {
        let err = DomainError::InvalidRange {
            start: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };

        assert!(err.to_string().contains("2024-02-01"));
    }

    #[test]
    fn test_degenerate_statistics_message() {
        let err = DomainError::DegenerateStatistics("empty history".to_string());
        assert!(err.to_string().contains("empty history"));
    }

    #[test]
    fn test_invalid_parameter_helper() {
        let err = DomainError::invalid_parameter("interval", "expected daily, weekly or monthly");
        assert!(matches!(err, DomainError::InvalidParameter { name: "interval", .. }));
        assert_eq!(
            err.to_string(),
            "Invalid parameter interval: expected daily, weekly or monthly"
        );
    }
}
