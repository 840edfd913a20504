//! User service — use-cases for registering tracked users.

use std::sync::Arc;

use tokio::sync::Mutex;

use presencehub_domain::error::{NotFoundError, PresenceHubError};
use presencehub_domain::id::EntityId;
use presencehub_domain::user::{DeliveryAddress, User};

use crate::ports::DocumentStore;
use crate::ports::document_store::documents;
use crate::user_registry::UserRegistry;

/// Application service for the user registry. Every change is persisted.
pub struct UserService<S> {
    registry: Arc<UserRegistry>,
    store: S,
    /// Held from mutation until the save completes, so saves land in order.
    persist_guard: Mutex<()>,
}

impl<S: DocumentStore> UserService<S> {
    /// Create a new service over the shared registry.
    pub fn new(registry: Arc<UserRegistry>, store: S) -> Self {
        Self {
            registry,
            store,
            persist_guard: Mutex::new(()),
        }
    }

    /// Register `name`, replacing its address if it already exists.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting the registry fails.
    #[tracing::instrument(skip(self, address))]
    pub async fn register(
        &self,
        name: EntityId,
        address: DeliveryAddress,
    ) -> Result<User, PresenceHubError> {
        let _guard = self.persist_guard.lock().await;
        let replaced = self.registry.insert(name.clone(), address.clone()).is_some();
        self.persist().await?;
        tracing::info!(replaced, "user registered");
        Ok(User { name, address })
    }

    /// Remove `name` from the registry.
    ///
    /// Its last location stays in the location store but further reports
    /// for it are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceHubError::NotFound`] when the user is not
    /// registered, or a storage error if persisting fails.
    #[tracing::instrument(skip(self))]
    pub async fn unregister(&self, name: &EntityId) -> Result<(), PresenceHubError> {
        let _guard = self.persist_guard.lock().await;
        if self.registry.remove(name).is_none() {
            return Err(NotFoundError {
                entity: "User",
                id: name.to_string(),
            }
            .into());
        }
        self.persist().await?;
        tracing::info!("user unregistered");
        Ok(())
    }

    /// All registered users, sorted by name.
    pub fn list(&self) -> Vec<User> {
        self.registry.list()
    }

    async fn persist(&self) -> Result<(), PresenceHubError> {
        let (collection, key) = documents::USERS;
        let document = serde_json::to_value(self.registry.to_map())?;
        self.store.save(collection, key, document).await
    }
}
