// ── Calendar override store ──
//
// Client-side mirror of the backend's per-date scheduling rules. Exposes
// only per-date lookup; rendering a month grid is the caller's concern.

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::CalendarOverride;
use crate::stream::EntityStream;

/// Keyed store of calendar overrides, at most one per date.
///
/// `upsert` replaces wholesale and `remove` is idempotent, matching the
/// backend's write semantics exactly so the mirror can be updated
/// optimistically after a successful write.
pub struct OverrideStore {
    by_date: DashMap<NaiveDate, Arc<CalendarOverride>>,
    snapshot: watch::Sender<Arc<Vec<Arc<CalendarOverride>>>>,
}

impl OverrideStore {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            by_date: DashMap::new(),
            snapshot,
        }
    }

    /// Insert or replace the override for its date. Replacement is
    /// wholesale: switching a date from blackout to discount (or back)
    /// leaves nothing of the previous record behind.
    pub fn upsert(&self, record: CalendarOverride) {
        self.by_date.insert(record.date, Arc::new(record));
        self.rebuild_snapshot();
    }

    /// Remove the override for a date. Removing a date with no record is
    /// a no-op, not an error.
    pub fn remove(&self, date: NaiveDate) -> Option<Arc<CalendarOverride>> {
        let removed = self.by_date.remove(&date).map(|(_, v)| v);
        if removed.is_some() {
            self.rebuild_snapshot();
        }
        removed
    }

    /// Look up the override for a date, if any.
    pub fn get(&self, date: NaiveDate) -> Option<Arc<CalendarOverride>> {
        self.by_date.get(&date).map(|r| Arc::clone(r.value()))
    }

    /// Replace the whole mirror with a fresh fetch result.
    pub fn replace_all(&self, records: impl IntoIterator<Item = CalendarOverride>) {
        self.by_date.clear();
        for record in records {
            self.by_date.insert(record.date, Arc::new(record));
        }
        self.rebuild_snapshot();
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    /// Subscribe to snapshot changes (date-ascending order).
    pub fn subscribe(&self) -> EntityStream<CalendarOverride> {
        EntityStream::new(self.snapshot.subscribe())
    }

    fn rebuild_snapshot(&self) {
        let mut values: Vec<Arc<CalendarOverride>> =
            self.by_date.iter().map(|r| Arc::clone(r.value())).collect();
        values.sort_by_key(|o| o.date);
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }
}

impl Default for OverrideStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::OverrideRule;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn upsert_replaces_wholesale() {
        let store = OverrideStore::new();
        let day = date("2025-12-25");

        store.upsert(
            CalendarOverride::discount(day, 30, Some("Holiday".into())).unwrap(),
        );
        store.upsert(CalendarOverride::blackout(day, None));

        let current = store.get(day).unwrap();
        assert_eq!(current.rule, OverrideRule::Blackout);
        // Nothing from the discount record survives the switch.
        assert!(current.description.is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let store = OverrideStore::new();
        let day = date("2099-01-01");

        assert!(store.remove(day).is_none());
        store.upsert(CalendarOverride::blackout(day, None));
        assert!(store.remove(day).is_some());
        assert!(store.remove(day).is_none());
    }

    #[test]
    fn get_only_sees_its_own_date() {
        let store = OverrideStore::new();
        store.upsert(CalendarOverride::discount(date("2026-03-01"), 10, None).unwrap());

        assert!(store.get(date("2026-03-01")).is_some());
        assert!(store.get(date("2026-03-02")).is_none());
    }

    #[test]
    fn replace_all_drops_stale_dates() {
        let store = OverrideStore::new();
        store.upsert(CalendarOverride::blackout(date("2026-01-01"), None));

        store.replace_all(vec![
            CalendarOverride::discount(date("2026-02-01"), 15, None).unwrap(),
        ]);

        assert!(store.get(date("2026-01-01")).is_none());
        assert!(store.get(date("2026-02-01")).is_some());
    }

    #[test]
    fn snapshot_is_date_ordered() {
        let store = OverrideStore::new();
        store.upsert(CalendarOverride::blackout(date("2026-05-01"), None));
        store.upsert(CalendarOverride::blackout(date("2026-01-01"), None));

        let stream = store.subscribe();
        let snap = stream.latest();
        let dates: Vec<NaiveDate> = snap.iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![date("2026-01-01"), date("2026-05-01")]);
    }
}
