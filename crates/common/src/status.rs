//! Review status state machine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The status of a review in its lifecycle.
///
/// Transitions:
/// ```text
/// Check ──┬──► Accept
///         └──► Reject
/// ```
///
/// Every review starts in `Check` and moves at most once, to exactly one
/// of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewStatus {
    /// Awaiting classification.
    #[default]
    Check,

    /// Review passed classification (terminal state).
    Accept,

    /// Review failed classification (terminal state).
    Reject,
}

impl ReviewStatus {
    /// Returns true if a review in this status can be submitted.
    pub fn can_submit(&self) -> bool {
        matches!(self, ReviewStatus::Check)
    }

    /// Returns true if this is a terminal status (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReviewStatus::Accept | ReviewStatus::Reject)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Check => "CHECK",
            ReviewStatus::Accept => "ACCEPT",
            ReviewStatus::Reject => "REJECT",
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, Error)]
#[error("unknown review status: {0}")]
pub struct ParseReviewStatusError(pub String);

impl std::str::FromStr for ReviewStatus {
    type Err = ParseReviewStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CHECK" => Ok(ReviewStatus::Check),
            "ACCEPT" => Ok(ReviewStatus::Accept),
            "REJECT" => Ok(ReviewStatus::Reject),
            other => Err(ParseReviewStatusError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_check() {
        assert_eq!(ReviewStatus::default(), ReviewStatus::Check);
    }

    #[test]
    fn test_only_check_can_submit() {
        assert!(ReviewStatus::Check.can_submit());
        assert!(!ReviewStatus::Accept.can_submit());
        assert!(!ReviewStatus::Reject.can_submit());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!ReviewStatus::Check.is_terminal());
        assert!(ReviewStatus::Accept.is_terminal());
        assert!(ReviewStatus::Reject.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(ReviewStatus::Check.to_string(), "CHECK");
        assert_eq!(ReviewStatus::Accept.to_string(), "ACCEPT");
        assert_eq!(ReviewStatus::Reject.to_string(), "REJECT");
    }

    #[test]
    fn test_parse_roundtrip() {
        for status in [
            ReviewStatus::Check,
            ReviewStatus::Accept,
            ReviewStatus::Reject,
        ] {
            let parsed: ReviewStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_parse_unknown_fails() {
        let result = "PENDING".parse::<ReviewStatus>();
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization() {
        let status = ReviewStatus::Accept;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"ACCEPT\"");
        let deserialized: ReviewStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, deserialized);
    }
}
