//! Location labels and point-in-time location snapshots.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::id::{EntityId, define_name};
use crate::time::Timestamp;

define_name!(
    /// Opaque label of a place an entity can be in (e.g. `"kitchen"`).
    Location,
    crate::error::ValidationError::EmptyLocation
);

/// Last reported location of a single entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presence {
    pub entity: EntityId,
    pub location: Location,
    /// When the location last changed to its current value.
    pub last_changed: Timestamp,
}

/// Consistent copy of every known entity's location at one instant.
///
/// All automations in one evaluation pass are judged against the same
/// snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSnapshot {
    locations: HashMap<EntityId, Location>,
}

impl LocationSnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Location of `entity`, if it has ever been reported.
    #[must_use]
    pub fn get(&self, entity: &str) -> Option<&Location> {
        self.locations.get(entity)
    }

    /// Whether `entity` is currently at `location`.
    #[must_use]
    pub fn is_at(&self, entity: &str, location: &Location) -> bool {
        self.get(entity) == Some(location)
    }

    /// Record `entity` at `location`, replacing any previous value.
    pub fn insert(&mut self, entity: EntityId, location: Location) {
        self.locations.insert(entity, location);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl FromIterator<(EntityId, Location)> for LocationSnapshot {
    fn from_iter<T: IntoIterator<Item = (EntityId, Location)>>(iter: T) -> Self {
        Self {
            locations: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn entry(entity: &str, location: &str) -> (EntityId, Location) {
        (
            EntityId::new(entity).unwrap(),
            Location::new(location).unwrap(),
        )
    }

    #[test]
    fn should_reject_empty_location() {
        assert_eq!(Location::new(""), Err(ValidationError::EmptyLocation));
    }

    #[test]
    fn should_report_entity_at_location_when_labels_match() {
        let snapshot: LocationSnapshot = [entry("alice", "kitchen")].into_iter().collect();
        assert!(snapshot.is_at("alice", &Location::new("kitchen").unwrap()));
        assert!(!snapshot.is_at("alice", &Location::new("garage").unwrap()));
    }

    #[test]
    fn should_not_report_unknown_entity_anywhere() {
        let snapshot = LocationSnapshot::new();
        assert!(!snapshot.is_at("bob", &Location::new("kitchen").unwrap()));
        assert!(snapshot.get("bob").is_none());
    }

    #[test]
    fn should_replace_previous_location_on_insert() {
        let mut snapshot = LocationSnapshot::new();
        let (alice, kitchen) = entry("alice", "kitchen");
        snapshot.insert(alice.clone(), kitchen);
        snapshot.insert(alice, Location::new("garage").unwrap());
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("alice").unwrap().as_str(), "garage");
    }
}
