use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::OnceCell;

use crate::sqm::ProcessedSqmResult;

pub(crate) type Slot = Arc<OnceCell<Arc<ProcessedSqmResult>>>;

/// Populate-once cache of processed series keyed by source identifier.
///
/// Each key owns a once-cell. Concurrent requests for a key share the cell,
/// so only the first one runs the fetch and parse while the rest wait for
/// its value. A failed initialisation leaves the cell empty for the next
/// request. Entries are never evicted.
#[derive(Default)]
pub struct SqmCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl SqmCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn slot(&self, source: &str) -> Slot {
        self.slots().entry(source.to_string()).or_default().clone()
    }

    /// Drop the entry for `source` after a failed load, unless it got
    /// populated meanwhile or another request still waits on it. `held` is
    /// the caller's own handle to the slot.
    pub(crate) fn forget_if_empty(&self, source: &str, held: &Slot) {
        let mut slots = self.slots();
        let unused = slots.get(source).is_some_and(|slot| {
            Arc::ptr_eq(slot, held) && !slot.initialized() && Arc::strong_count(slot) <= 2
        });
        if unused {
            slots.remove(source);
        }
    }

    /// Number of keys with an entry, populated or not.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots().len()
    }

    pub fn get(&self, source: &str) -> Option<Arc<ProcessedSqmResult>> {
        self.slots()
            .get(source)
            .and_then(|slot| slot.get().cloned())
    }

    /// Number of populated entries.
    pub fn len(&self) -> usize {
        self.slots()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
