//! Settings service — serves and replaces the client configuration document.

use std::sync::{PoisonError, RwLock};

use tokio::sync::Mutex;

use presencehub_domain::error::PresenceHubError;
use presencehub_domain::settings::Settings;

use crate::ports::DocumentStore;
use crate::ports::document_store::documents;

pub struct SettingsService<S> {
    current: RwLock<Settings>,
    store: S,
    /// Held from save until the new value is current, so both agree.
    persist_guard: Mutex<()>,
}

impl<S: DocumentStore> SettingsService<S> {
    /// Create a service holding the settings loaded at startup.
    pub fn new(initial: Settings, store: S) -> Self {
        Self {
            current: RwLock::new(initial),
            store,
            persist_guard: Mutex::new(()),
        }
    }

    pub fn get(&self) -> Settings {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Persist `settings`, then make them current.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails; the current settings are
    /// left untouched in that case.
    #[tracing::instrument(skip_all)]
    pub async fn replace(&self, settings: Settings) -> Result<Settings, PresenceHubError> {
        let (collection, key) = documents::SETTINGS;
        let _guard = self.persist_guard.lock().await;
        self.store
            .save(collection, key, serde_json::to_value(&settings)?)
            .await?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = settings.clone();
        tracing::info!("settings replaced");
        Ok(settings)
    }
}
