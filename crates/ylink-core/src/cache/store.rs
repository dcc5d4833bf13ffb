// Concurrent storage with push-based change notification.
//
// Each key owns a `watch` channel so live query handles wake up when
// their entry is refreshed or invalidated.

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::watch;
use tracing::debug;

use super::{CacheEntry, QueryKey};
use crate::state::RequestState;

/// Shared cache of settled reads.
///
/// Writes only ever come from successful network calls, so a slot is
/// either empty, fresh, or stale. Pending work and failures are never
/// stored here.
pub struct QueryCache {
    slots: DashMap<QueryKey, watch::Sender<Option<CacheEntry>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Current entry for `key` (cheap clone: payloads are `Arc`ed).
    pub fn get(&self, key: &QueryKey) -> Option<CacheEntry> {
        self.slots.get(key).and_then(|slot| slot.borrow().clone())
    }

    /// `true` when `key` is absent or has been invalidated.
    pub fn needs_fetch(&self, key: &QueryKey) -> bool {
        self.get(key).is_none_or(|entry| entry.stale)
    }

    /// Store a successful read as a fresh entry and notify subscribers.
    pub fn store(&self, key: &QueryKey, state: RequestState) {
        let entry = CacheEntry {
            state,
            stale: false,
            updated_at: Utc::now(),
        };
        self.slots
            .entry(key.clone())
            .or_insert_with(|| watch::channel(None).0)
            .send_replace(Some(entry));
    }

    /// Subscribe to changes of a single key, creating an empty slot if needed.
    pub fn subscribe(&self, key: &QueryKey) -> watch::Receiver<Option<CacheEntry>> {
        self.slots
            .entry(key.clone())
            .or_insert_with(|| watch::channel(None).0)
            .subscribe()
    }

    /// Mark every entry under `route_key` stale, whatever its query.
    ///
    /// Returns how many entries went from fresh to stale; calling it again
    /// before a refetch returns 0 and notifies nobody.
    pub fn invalidate(&self, route_key: &str) -> usize {
        let mut invalidated = 0;
        for slot in self.slots.iter().filter(|s| s.key().route_key() == route_key) {
            let changed = slot.value().send_if_modified(|entry| match entry {
                Some(entry) if !entry.stale => {
                    entry.stale = true;
                    true
                }
                _ => false,
            });
            if changed {
                invalidated += 1;
            }
        }
        debug!(route_key, invalidated, "invalidated cached reads");
        invalidated
    }

    /// Drop every entry. Live handles resubscribe and refetch.
    pub fn clear(&self) {
        self.slots.clear();
    }

    /// Number of populated entries.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.borrow().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}
