// ── Reviewable requests ──
//
// One domain shape for both review categories (rental and KYC). The two
// wire formats differ; `convert` normalizes them into this type so the
// workflow invariants are enforced in exactly one place.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::operator::{Capability, OperatorId};
use crate::error::CoreError;

/// Opaque request identifier (backend-assigned UUID string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// The two review categories. Tracked independently, identical lifecycle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReviewCategory {
    Rental,
    Kyc,
}

impl ReviewCategory {
    pub const ALL: [Self; 2] = [Self::Rental, Self::Kyc];

    /// The console section an operator needs to see this category.
    /// Rental requests live in the rentals section; KYC review is part of
    /// customer management.
    pub fn required_capability(self) -> Capability {
        match self {
            Self::Rental => Capability::Rentals,
            Self::Kyc => Capability::Users,
        }
    }
}

/// Request lifecycle status. Starts `Pending`, transitions at most once.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A review decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReviewOutcome {
    Approve,
    Reject,
}

impl ReviewOutcome {
    /// The terminal status this outcome produces.
    pub fn terminal_status(self) -> RequestStatus {
        match self {
            Self::Approve => RequestStatus::Approved,
            Self::Reject => RequestStatus::Rejected,
        }
    }

    /// The wire `action` string the backend expects.
    pub fn wire_action(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

/// A request awaiting (or past) operator review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewableRequest {
    pub id: RequestId,
    pub category: ReviewCategory,
    /// Primary display line: who or what is under review.
    pub subject: String,
    /// Secondary display line (console name, handle, document link).
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: RequestStatus,
    pub reviewer_id: Option<OperatorId>,
    pub note: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl ReviewableRequest {
    /// Apply a review decision to this record.
    ///
    /// Succeeds only from `Pending`. A request that already reached a
    /// terminal status returns [`CoreError::Conflict`] and is left
    /// completely untouched -- reviewer attribution, note, and timestamp
    /// from the first transition survive a double submission.
    pub fn apply_review(
        &mut self,
        outcome: ReviewOutcome,
        reviewer: OperatorId,
        note: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        if self.status.is_terminal() {
            return Err(CoreError::Conflict {
                message: format!("request {} is already {}", self.id, self.status),
            });
        }

        self.status = outcome.terminal_status();
        self.reviewer_id = Some(reviewer);
        self.note = note;
        self.processed_at = Some(at);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn pending(id: &str) -> ReviewableRequest {
        ReviewableRequest {
            id: RequestId::from(id),
            category: ReviewCategory::Rental,
            subject: "Dana Voss".into(),
            detail: Some("PS5 #3".into()),
            created_at: Utc.with_ymd_and_hms(2026, 2, 10, 9, 0, 0).unwrap(),
            status: RequestStatus::Pending,
            reviewer_id: None,
            note: None,
            processed_at: None,
        }
    }

    #[test]
    fn review_transitions_pending_to_terminal() {
        let mut req = pending("r1");
        let at = Utc.with_ymd_and_hms(2026, 2, 10, 10, 0, 0).unwrap();

        req.apply_review(ReviewOutcome::Approve, OperatorId::from("op-1"), None, at)
            .unwrap();

        assert_eq!(req.status, RequestStatus::Approved);
        assert_eq!(req.reviewer_id, Some(OperatorId::from("op-1")));
        assert_eq!(req.processed_at, Some(at));
    }

    #[test]
    fn second_review_conflicts_and_preserves_first_attribution() {
        let mut req = pending("r1");
        let first = Utc.with_ymd_and_hms(2026, 2, 10, 10, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2026, 2, 10, 10, 0, 1).unwrap();

        req.apply_review(
            ReviewOutcome::Approve,
            OperatorId::from("op-1"),
            Some("ok".into()),
            first,
        )
        .unwrap();

        let err = req
            .apply_review(
                ReviewOutcome::Reject,
                OperatorId::from("op-2"),
                Some("changed my mind".into()),
                second,
            )
            .unwrap_err();

        assert!(err.is_conflict());
        // First transition stays authoritative.
        assert_eq!(req.status, RequestStatus::Approved);
        assert_eq!(req.reviewer_id, Some(OperatorId::from("op-1")));
        assert_eq!(req.note.as_deref(), Some("ok"));
        assert_eq!(req.processed_at, Some(first));
    }

    #[test]
    fn category_capability_mapping() {
        assert_eq!(
            ReviewCategory::Rental.required_capability(),
            Capability::Rentals
        );
        assert_eq!(ReviewCategory::Kyc.required_capability(), Capability::Users);
    }

    #[test]
    fn outcome_wire_actions() {
        assert_eq!(ReviewOutcome::Approve.wire_action(), "approve");
        assert_eq!(ReviewOutcome::Reject.wire_action(), "reject");
        assert_eq!("reject".parse::<ReviewOutcome>().unwrap(), ReviewOutcome::Reject);
    }
}
