//! Validation error taxonomy.
//!
//! User-supplied data that violates a domain invariant is rejected
//! synchronously with one of these errors, never silently coerced.
//! Degenerate inputs (empty collections, missing optional numbers) are
//! not errors; the aggregators fall back to defined zero defaults.

use chrono::NaiveDate;
use thiserror::Error;

/// A domain invariant violation in user-supplied record data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Disposal date cannot be earlier than purchase date.
    #[error("disposal date {disposal} is earlier than purchase date {purchase}")]
    DisposalBeforePurchase {
        purchase: NaiveDate,
        disposal: NaiveDate,
    },

    /// Social impact score must be between 1 and 10 inclusive.
    #[error("social impact score {0} is outside the 1-10 range")]
    SocialImpactScoreOutOfRange(f64),

    /// Carbon footprint cannot be negative.
    #[error("carbon footprint cannot be negative (got {0})")]
    NegativeCarbonFootprint(f64),

    /// Certification expiry date cannot be earlier than its issue date.
    #[error("certification expiry date {expiry} is earlier than issue date {issue}")]
    ExpiryBeforeIssue {
        issue: NaiveDate,
        expiry: NaiveDate,
    },

    /// Deactivating an SLA policy requires a reason.
    #[error("a non-empty reason is required to deactivate an SLA policy")]
    EmptyDeactivationReason,

    /// Response and resolution times must be positive values.
    #[error("response and resolution times must be positive")]
    NonPositiveSlaTimeframe,

    /// Response time must come before the resolution deadline.
    #[error("response time must be less than resolution time")]
    ResponseNotBeforeResolution,

    /// Warning and critical breach thresholds must be positive values.
    #[error("warning and critical thresholds must be positive")]
    NonPositiveSlaThreshold,

    /// The warning threshold must trip before the critical one.
    #[error("warning threshold must be less than critical threshold")]
    WarningNotBeforeCritical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offending_values() {
        let err = ValidationError::SocialImpactScoreOutOfRange(12.0);
        assert!(err.to_string().contains("12"));

        let err = ValidationError::NegativeCarbonFootprint(-3.5);
        assert!(err.to_string().contains("-3.5"));
    }

    #[test]
    fn test_date_errors_include_both_dates() {
        let err = ValidationError::DisposalBeforePurchase {
            purchase: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            disposal: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-05-01"));
        assert!(msg.contains("2024-01-01"));
    }
}
