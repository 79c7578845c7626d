// ── Approval workflow ──
//
// One ledger type serves both review categories; the shared invariants
// (single terminal transition, conflict on double review) are enforced
// here and in `ReviewableRequest::apply_review` rather than drifting
// across per-category code paths.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::watch;

use crate::error::CoreError;
use crate::model::{RequestId, ReviewOutcome, ReviewableRequest};
use crate::model::OperatorId;
use crate::stream::EntityStream;

/// Display ordering for review screens: pending requests before any
/// terminal request, newest `created_at` first within each bucket.
///
/// This is a presentation contract, not a storage order -- it is
/// recomputed on every snapshot rebuild rather than assumed persisted.
pub fn display_order(requests: &mut [Arc<ReviewableRequest>]) {
    requests.sort_by(|a, b| {
        match (a.status.is_terminal(), b.status.is_terminal()) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => b.created_at.cmp(&a.created_at),
        }
    });
}

/// Client-side ledger of reviewable requests for one category.
///
/// Read-through copy of backend state: bulk-replaced on fetch, updated in
/// place when a review this session submitted succeeds. Snapshots are
/// broadcast through a `watch` channel in display order.
pub struct RequestLedger {
    entries: DashMap<RequestId, Arc<ReviewableRequest>>,
    snapshot: watch::Sender<Arc<Vec<Arc<ReviewableRequest>>>>,
}

impl RequestLedger {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            entries: DashMap::new(),
            snapshot,
        }
    }

    /// Replace the whole ledger with a fresh fetch result.
    pub fn replace_all(&self, requests: Vec<ReviewableRequest>) {
        self.entries.clear();
        for request in requests {
            self.entries.insert(request.id.clone(), Arc::new(request));
        }
        self.rebuild_snapshot();
    }

    /// Look up a single request by id.
    pub fn get(&self, id: &RequestId) -> Option<Arc<ReviewableRequest>> {
        self.entries.get(id).map(|r| Arc::clone(r.value()))
    }

    /// Number of requests currently pending.
    pub fn pending_count(&self) -> u64 {
        self.entries
            .iter()
            .filter(|r| !r.status.is_terminal())
            .count() as u64
    }

    /// Precondition check + local transition for a review decision.
    ///
    /// Fails fast with [`CoreError::Conflict`] when the cached copy is
    /// already terminal (the slow-UI double-click guard) and with
    /// [`CoreError::RequestNotFound`] for an unknown id. On success the
    /// stored record carries the new status and attribution.
    pub fn apply_review(
        &self,
        id: &RequestId,
        outcome: ReviewOutcome,
        reviewer: OperatorId,
        note: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<Arc<ReviewableRequest>, CoreError> {
        let mut entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| CoreError::RequestNotFound { id: id.to_string() })?;

        let mut updated = (**entry.value()).clone();
        updated.apply_review(outcome, reviewer, note, at)?;

        let updated = Arc::new(updated);
        *entry.value_mut() = Arc::clone(&updated);
        drop(entry);

        self.rebuild_snapshot();
        Ok(updated)
    }

    /// Current snapshot in display order (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<Arc<ReviewableRequest>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> EntityStream<ReviewableRequest> {
        EntityStream::new(self.snapshot.subscribe())
    }

    /// Collect all entries, sort for display, broadcast to subscribers.
    fn rebuild_snapshot(&self) {
        let mut values: Vec<Arc<ReviewableRequest>> =
            self.entries.iter().map(|r| Arc::clone(r.value())).collect();
        display_order(&mut values);
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }
}

impl Default for RequestLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{RequestStatus, ReviewCategory};

    fn request(id: &str, status: RequestStatus, hour: u32) -> ReviewableRequest {
        ReviewableRequest {
            id: RequestId::from(id),
            category: ReviewCategory::Rental,
            subject: format!("subject-{id}"),
            detail: None,
            created_at: Utc.with_ymd_and_hms(2026, 2, 10, hour, 0, 0).unwrap(),
            status,
            reviewer_id: None,
            note: None,
            processed_at: None,
        }
    }

    #[test]
    fn display_order_puts_pending_first_newest_first() {
        // statuses [approved@t1, pending@t2, pending@t3] with t1<t2<t3
        // must sort as [pending@t3, pending@t2, approved@t1].
        let ledger = RequestLedger::new();
        ledger.replace_all(vec![
            request("a", RequestStatus::Approved, 1),
            request("b", RequestStatus::Pending, 2),
            request("c", RequestStatus::Pending, 3),
        ]);

        let snap = ledger.snapshot();
        let ids: Vec<&str> = snap.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn display_order_sorts_terminal_bucket_newest_first() {
        let ledger = RequestLedger::new();
        ledger.replace_all(vec![
            request("old", RequestStatus::Rejected, 1),
            request("new", RequestStatus::Approved, 5),
            request("p", RequestStatus::Pending, 2),
        ]);

        let snap = ledger.snapshot();
        let ids: Vec<&str> = snap.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["p", "new", "old"]);
    }

    #[test]
    fn pending_count_ignores_terminal_requests() {
        let ledger = RequestLedger::new();
        ledger.replace_all(vec![
            request("a", RequestStatus::Approved, 1),
            request("b", RequestStatus::Pending, 2),
            request("c", RequestStatus::Pending, 3),
        ]);
        assert_eq!(ledger.pending_count(), 2);
    }

    #[test]
    fn apply_review_updates_ledger_and_snapshot() {
        let ledger = RequestLedger::new();
        ledger.replace_all(vec![request("a", RequestStatus::Pending, 1)]);

        let at = Utc.with_ymd_and_hms(2026, 2, 10, 4, 0, 0).unwrap();
        let updated = ledger
            .apply_review(
                &RequestId::from("a"),
                ReviewOutcome::Reject,
                OperatorId::from("op-1"),
                Some("no stock".into()),
                at,
            )
            .unwrap();

        assert_eq!(updated.status, RequestStatus::Rejected);
        assert_eq!(ledger.pending_count(), 0);
        assert_eq!(ledger.snapshot()[0].status, RequestStatus::Rejected);
    }

    #[test]
    fn apply_review_on_terminal_request_conflicts() {
        let ledger = RequestLedger::new();
        ledger.replace_all(vec![request("a", RequestStatus::Approved, 1)]);

        let at = Utc.with_ymd_and_hms(2026, 2, 10, 4, 0, 0).unwrap();
        let err = ledger
            .apply_review(
                &RequestId::from("a"),
                ReviewOutcome::Approve,
                OperatorId::from("op-2"),
                None,
                at,
            )
            .unwrap_err();

        assert!(err.is_conflict());
        assert!(ledger.snapshot()[0].reviewer_id.is_none());
    }

    #[tokio::test]
    async fn snapshot_stream_sees_replacement() {
        let ledger = RequestLedger::new();
        let mut stream = ledger.subscribe();

        ledger.replace_all(vec![request("a", RequestStatus::Pending, 1)]);

        let snap = stream.changed().await.unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].id.as_str(), "a");
    }

    #[test]
    fn apply_review_unknown_id_is_not_found() {
        let ledger = RequestLedger::new();
        let at = Utc.with_ymd_and_hms(2026, 2, 10, 4, 0, 0).unwrap();
        let err = ledger
            .apply_review(
                &RequestId::from("ghost"),
                ReviewOutcome::Approve,
                OperatorId::from("op-1"),
                None,
                at,
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::RequestNotFound { .. }));
    }
}
