//! In-memory registry of known users and their delivery addresses.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use presencehub_domain::id::EntityId;
use presencehub_domain::user::{DeliveryAddress, User};

use crate::ports::UserDirectory;

/// Registered users keyed by name.
///
/// Shared between the location store (which ignores updates for unknown
/// names) and the dispatcher (which resolves automation owners).
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: RwLock<HashMap<EntityId, DeliveryAddress>>,
}

impl UserRegistry {
    /// Create a registry pre-populated with `users`.
    #[must_use]
    pub fn new(users: HashMap<EntityId, DeliveryAddress>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Register `name`, replacing any previous address.
    ///
    /// Returns the previous address when the user already existed.
    pub fn insert(&self, name: EntityId, address: DeliveryAddress) -> Option<DeliveryAddress> {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, address)
    }

    /// Remove `name`, returning its address if it was registered.
    pub fn remove(&self, name: &EntityId) -> Option<DeliveryAddress> {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    /// All registered users, sorted by name.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        let mut list: Vec<User> = users
            .iter()
            .map(|(name, address)| User {
                name: name.clone(),
                address: address.clone(),
            })
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    /// Copy of the whole mapping, as persisted.
    #[must_use]
    pub fn to_map(&self) -> HashMap<EntityId, DeliveryAddress> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl UserDirectory for UserRegistry {
    fn is_known(&self, entity: &EntityId) -> bool {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(entity)
    }

    fn resolve_address(&self, owner: &EntityId) -> Option<DeliveryAddress> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(owner)
            .cloned()
    }
}
