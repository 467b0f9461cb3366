//! Aggregation store: one consistent record per real-world entity
//!
//! Workers submit partial observations as they extract pages; the store
//! merges them by identity key under per-entity critical sections. The maps
//! are sharded (`DashMap`), so two workers upserting unrelated fighters
//! never serialize against each other; there is no global lock across
//! entities.
//!
//! The exporter only reads after the crawl has fully drained, so snapshot
//! accessors can iterate without racing mutations.

use crate::model::{Event, Fighter, FighterUpdate};
use dashmap::DashMap;

/// Thread-safe map from entity identity to its consolidated record
#[derive(Debug, Default)]
pub struct AggregationStore {
    events: DashMap<String, Event>,
    fighters: DashMap<String, Fighter>,
}

impl AggregationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a partial event observation into the stored record
    ///
    /// The entry lock covers the whole merge, so concurrent upserts of the
    /// same event apply their matchup-precedence rules sequentially.
    pub fn upsert_event(&self, incoming: Event) {
        if incoming.name.is_empty() && incoming.date.is_empty() {
            tracing::debug!("Dropping event observation without an identity");
            return;
        }

        match self.events.entry(incoming.key()) {
            dashmap::mapref::entry::Entry::Occupied(mut entry) => entry.get_mut().merge(incoming),
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(incoming);
            }
        }
    }

    /// Merges a partial fighter observation into the stored record
    pub fn upsert_fighter(&self, update: FighterUpdate) {
        if update.name.trim().is_empty() {
            tracing::debug!("Dropping fighter observation without a name");
            return;
        }

        let key = Fighter::identity_key(&update.name);
        self.fighters.entry(key).or_default().apply(update);
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn fighter_count(&self) -> usize {
        self.fighters.len()
    }

    /// Snapshot of all events, sorted by identity key
    ///
    /// Sorting makes export order independent of worker count and
    /// scheduling.
    pub fn events_sorted(&self) -> Vec<Event> {
        let mut events: Vec<Event> = self.events.iter().map(|e| e.value().clone()).collect();
        events.sort_by_key(|e| e.key());
        events
    }

    /// Snapshot of all fighters, sorted by identity key
    pub fn fighters_sorted(&self) -> Vec<Fighter> {
        let mut fighters: Vec<Fighter> =
            self.fighters.iter().map(|f| f.value().clone()).collect();
        fighters.sort_by_key(|f| Fighter::identity_key(&f.name));
        fighters
    }
}
