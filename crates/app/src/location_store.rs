//! Location store — the latest reported location of every known entity.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use presencehub_domain::id::EntityId;
use presencehub_domain::location::{Location, LocationSnapshot, Presence};
use presencehub_domain::time::{Timestamp, now};

use crate::ports::UserDirectory;

#[derive(Debug, Clone)]
struct Entry {
    location: Location,
    last_changed: Timestamp,
}

/// Latest location per entity behind a single mutex.
///
/// Entries are only ever created or overwritten, never removed. Updates for
/// entities unknown to the directory are ignored.
pub struct LocationStore<D> {
    directory: D,
    entries: Mutex<HashMap<EntityId, Entry>>,
}

impl<D: UserDirectory> LocationStore<D> {
    /// Create an empty store that accepts updates for entities known to `directory`.
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Record `entity` at `location`.
    ///
    /// Returns `true` only when the stored location changed: the entity is
    /// known and was either absent or somewhere else. Unknown entities and
    /// repeated reports of the same location return `false` without touching
    /// the store.
    pub fn set(&self, entity: &EntityId, location: &Location) -> bool {
        if !self.directory.is_known(entity) {
            return false;
        }

        let mut entries = self.lock();
        if entries
            .get(entity)
            .is_some_and(|entry| entry.location == *location)
        {
            return false;
        }
        entries.insert(
            entity.clone(),
            Entry {
                location: location.clone(),
                last_changed: now(),
            },
        );
        true
    }

    /// Current location of `entity`.
    #[must_use]
    pub fn get(&self, entity: &EntityId) -> Option<Location> {
        self.lock().get(entity).map(|entry| entry.location.clone())
    }

    /// Deep copy of every location, taken under the lock.
    #[must_use]
    pub fn snapshot(&self) -> LocationSnapshot {
        self.lock()
            .iter()
            .map(|(entity, entry)| (entity.clone(), entry.location.clone()))
            .collect()
    }

    /// Every entry with its change time, sorted by entity.
    #[must_use]
    pub fn list(&self) -> Vec<Presence> {
        let mut list: Vec<Presence> = self
            .lock()
            .iter()
            .map(|(entity, entry)| Presence {
                entity: entity.clone(),
                location: entry.location.clone(),
                last_changed: entry.last_changed,
            })
            .collect();
        list.sort_by(|a, b| a.entity.cmp(&b.entity));
        list
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<EntityId, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
