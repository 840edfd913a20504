//! Automation service — use-cases for managing automations.

use std::sync::Arc;

use tokio::sync::Mutex;

use presencehub_domain::automation::Automation;
use presencehub_domain::error::{NotFoundError, PresenceHubError};
use presencehub_domain::id::{AutomationId, EntityId};

use crate::ports::DocumentStore;
use crate::ports::document_store::documents;
use crate::rule_set::RuleSet;

/// Application service for automation CRUD. Every change is persisted.
pub struct AutomationService<S> {
    rules: Arc<RuleSet>,
    store: S,
    /// Held from mutation until the save completes, so saves land in order.
    persist_guard: Mutex<()>,
}

impl<S: DocumentStore> AutomationService<S> {
    /// Create a new service over the shared rule set.
    pub fn new(rules: Arc<RuleSet>, store: S) -> Self {
        Self {
            rules,
            store,
            persist_guard: Mutex::new(()),
        }
    }

    /// Append a new automation to its owner's list after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceHubError::Validation`] if invariants fail or the id
    /// is already taken, or a storage error if persisting fails.
    #[tracing::instrument(
        skip(self, automation),
        fields(automation_id = %automation.id, owner = %automation.owner)
    )]
    pub async fn create(&self, automation: Automation) -> Result<Automation, PresenceHubError> {
        automation.validate()?;
        let _guard = self.persist_guard.lock().await;
        self.rules.insert(automation.clone())?;
        self.persist().await?;
        tracing::info!("automation created");
        Ok(automation)
    }

    /// Look up an automation by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceHubError::NotFound`] when no automation with `id` exists.
    pub fn get(&self, id: AutomationId) -> Result<Automation, PresenceHubError> {
        self.rules.get(id).ok_or_else(|| {
            NotFoundError {
                entity: "Automation",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all automations.
    pub fn list(&self) -> Vec<Automation> {
        self.rules.list()
    }

    /// List the automations of one owner, in order.
    pub fn list_for_owner(&self, owner: &EntityId) -> Vec<Automation> {
        self.rules.list_for_owner(owner)
    }

    /// Replace an existing automation, keeping its position.
    ///
    /// The automation stays armed only if its conditions did not change.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceHubError::Validation`] if invariants fail,
    /// [`PresenceHubError::NotFound`] if no automation has that id, or a
    /// storage error if persisting fails.
    #[tracing::instrument(skip(self, automation), fields(automation_id = %automation.id))]
    pub async fn update(&self, automation: Automation) -> Result<Automation, PresenceHubError> {
        automation.validate()?;
        let _guard = self.persist_guard.lock().await;
        self.rules.replace(automation.clone())?;
        self.persist().await?;
        tracing::info!("automation updated");
        Ok(automation)
    }

    /// Delete an automation by id.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceHubError::NotFound`] if no automation has that id, or
    /// a storage error if persisting fails.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: AutomationId) -> Result<(), PresenceHubError> {
        let _guard = self.persist_guard.lock().await;
        self.rules.remove(id).ok_or_else(|| NotFoundError {
            entity: "Automation",
            id: id.to_string(),
        })?;
        self.persist().await?;
        tracing::info!("automation deleted");
        Ok(())
    }

    async fn persist(&self) -> Result<(), PresenceHubError> {
        let (collection, key) = documents::AUTOMATIONS;
        let document = serde_json::to_value(self.rules.to_document())?;
        self.store.save(collection, key, document).await
    }
}
