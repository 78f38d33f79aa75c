use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage_layer::AttachmentRef;
use uuid::Uuid;

/// Insurance case status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsuranceStatus {
    #[default]
    Pending,
    Submitted,
    Approved,
    Rejected,
}

/// Insurance authorization case, keyed 1:1 by service request id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceCase {
    pub request_id: Uuid,
    pub status: InsuranceStatus,
    /// Reference to the insurer's authorization letter (URL or stored blob)
    pub authorization_letter: Option<AttachmentRef>,
    /// Refreshed only on entry to submitted
    pub last_submission_at: Option<DateTime<Utc>>,
}

impl InsuranceCase {
    /// Fresh pending case for a request
    pub fn new(request_id: Uuid) -> Self {
        Self {
            request_id,
            status: InsuranceStatus::Pending,
            authorization_letter: None,
            last_submission_at: None,
        }
    }
}

/// Whether a recorded outcome may replace the current status.
///
/// Submitted cases take their first outcome; approved/rejected may be
/// corrected to each other or reset to pending by hand.
pub fn outcome_allowed(current: InsuranceStatus, target: InsuranceStatus) -> bool {
    use InsuranceStatus::*;
    matches!(
        (current, target),
        (Submitted, Approved)
            | (Submitted, Rejected)
            | (Approved, Rejected)
            | (Approved, Pending)
            | (Rejected, Approved)
            | (Rejected, Pending)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use InsuranceStatus::*;

    #[test]
    fn test_outcomes_from_submitted() {
        assert!(outcome_allowed(Submitted, Approved));
        assert!(outcome_allowed(Submitted, Rejected));
        assert!(!outcome_allowed(Submitted, Pending));
        assert!(!outcome_allowed(Submitted, Submitted));
    }

    #[test]
    fn test_manual_corrections() {
        assert!(outcome_allowed(Approved, Rejected));
        assert!(outcome_allowed(Rejected, Approved));
        assert!(outcome_allowed(Approved, Pending));
        assert!(outcome_allowed(Rejected, Pending));
    }

    #[test]
    fn test_pending_cannot_skip_submission() {
        assert!(!outcome_allowed(Pending, Approved));
        assert!(!outcome_allowed(Pending, Rejected));
    }
}
