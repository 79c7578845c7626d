// ── Edge-triggered pending-work alerting ──
//
// The tracker is a plain owned value, deliberately separated from the
// timer that drives it: the poll task holds it on its own stack and feeds
// it one snapshot per successful tick. Failed ticks never reach
// `observe`, so the baseline survives backend outages untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ReviewCategory;

/// Point-in-time pending counts across review categories. Replaced
/// wholesale on every successful poll; never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSnapshot {
    pub per_category: BTreeMap<ReviewCategory, u64>,
    pub total: u64,
}

impl PendingSnapshot {
    /// Build a snapshot from per-category counts; the total is derived.
    pub fn new(per_category: BTreeMap<ReviewCategory, u64>) -> Self {
        let total = per_category.values().sum();
        Self {
            per_category,
            total,
        }
    }

    pub fn count(&self, category: ReviewCategory) -> u64 {
        self.per_category.get(&category).copied().unwrap_or(0)
    }
}

/// Fired when the pending total strictly increases over the previous
/// observation. Carries the full breakdown so consumers can say *where*
/// the new work appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAlert {
    pub total: u64,
    pub previous_total: u64,
    pub per_category: BTreeMap<ReviewCategory, u64>,
}

/// Edge-trigger state for pending-count observations.
///
/// Alerts only on a strict increase over the immediately preceding
/// observed total -- not against zero, not against a first-ever-seen
/// baseline. The first successful observation establishes the baseline
/// silently. Equal and decreasing totals re-arm the trigger without
/// firing it.
#[derive(Debug, Default)]
pub struct PendingTracker {
    previous: Option<u64>,
}

impl PendingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful observation.
    ///
    /// Returns an alert iff the total strictly exceeds the previous one.
    /// The snapshot becomes the new baseline either way, including on the
    /// tick that alerts.
    pub fn observe(&mut self, snapshot: &PendingSnapshot) -> Option<PendingAlert> {
        let alert = match self.previous {
            Some(previous) if snapshot.total > previous => Some(PendingAlert {
                total: snapshot.total,
                previous_total: previous,
                per_category: snapshot.per_category.clone(),
            }),
            _ => None,
        };

        self.previous = Some(snapshot.total);
        alert
    }

    /// The last observed total, if any tick has succeeded yet.
    pub fn previous_total(&self) -> Option<u64> {
        self.previous
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snapshot(rental: u64, kyc: u64) -> PendingSnapshot {
        PendingSnapshot::new(BTreeMap::from([
            (ReviewCategory::Rental, rental),
            (ReviewCategory::Kyc, kyc),
        ]))
    }

    fn totals(values: &[u64]) -> Vec<PendingSnapshot> {
        values.iter().map(|&t| snapshot(t, 0)).collect()
    }

    #[test]
    fn snapshot_total_is_sum_of_categories() {
        let snap = snapshot(3, 2);
        assert_eq!(snap.total, 5);
        assert_eq!(snap.count(ReviewCategory::Kyc), 2);
    }

    #[test]
    fn alerts_exactly_on_strict_increases() {
        // The canonical sequence: alerts at 8 and 9 only -- never on the
        // first observation, never on equal totals, never on the drop.
        let mut tracker = PendingTracker::new();
        let fired: Vec<bool> = totals(&[5, 5, 8, 3, 3, 9])
            .iter()
            .map(|s| tracker.observe(s).is_some())
            .collect();

        assert_eq!(fired, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn first_observation_sets_baseline_without_alerting() {
        let mut tracker = PendingTracker::new();
        assert!(tracker.previous_total().is_none());
        assert!(tracker.observe(&snapshot(7, 0)).is_none());
        assert_eq!(tracker.previous_total(), Some(7));
    }

    #[test]
    fn alert_carries_breakdown_and_previous_total() {
        let mut tracker = PendingTracker::new();
        tracker.observe(&snapshot(2, 1));

        let alert = tracker.observe(&snapshot(2, 3)).unwrap();
        assert_eq!(alert.previous_total, 3);
        assert_eq!(alert.total, 5);
        assert_eq!(alert.per_category.get(&ReviewCategory::Kyc), Some(&3));
    }

    #[test]
    fn failed_tick_leaves_baseline_for_next_comparison() {
        // A failed fetch never reaches observe(); the next successful tick
        // compares against the pre-failure value.
        let mut tracker = PendingTracker::new();
        tracker.observe(&snapshot(5, 0));

        // (failed tick here -- no observe call)

        let alert = tracker.observe(&snapshot(6, 0)).unwrap();
        assert_eq!(alert.previous_total, 5);
    }

    #[test]
    fn decreases_lower_the_baseline() {
        let mut tracker = PendingTracker::new();
        tracker.observe(&snapshot(9, 0));
        assert!(tracker.observe(&snapshot(4, 0)).is_none());
        // 5 is below the old peak of 9, but above the current baseline of 4.
        assert!(tracker.observe(&snapshot(5, 0)).is_some());
    }
}
