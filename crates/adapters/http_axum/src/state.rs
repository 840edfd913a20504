//! Shared application state for axum handlers.

use std::sync::Arc;

use presencehub_app::ports::DocumentStore;
use presencehub_app::presence_engine::PresenceEngine;
use presencehub_app::services::automation_service::AutomationService;
use presencehub_app::services::settings_service::SettingsService;
use presencehub_app::services::user_service::UserService;
use presencehub_app::user_registry::UserRegistry;

/// The engine as wired by the daemon: the shared user registry is its directory.
pub type Engine = PresenceEngine<Arc<UserRegistry>>;

/// Application state shared across all axum handlers.
///
/// Generic over the document store to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<S> {
    /// Location ingestion and evaluation pipeline.
    pub engine: Arc<Engine>,
    /// User registry administration.
    pub user_service: Arc<UserService<S>>,
    /// Automation CRUD service.
    pub automation_service: Arc<AutomationService<S>>,
    /// Client settings document.
    pub settings_service: Arc<SettingsService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            user_service: Arc::clone(&self.user_service),
            automation_service: Arc::clone(&self.automation_service),
            settings_service: Arc::clone(&self.settings_service),
        }
    }
}

impl<S> AppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    /// Create a new application state from the engine and service instances.
    pub fn new(
        engine: Engine,
        user_service: UserService<S>,
        automation_service: AutomationService<S>,
        settings_service: SettingsService<S>,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            user_service: Arc::new(user_service),
            automation_service: Arc::new(automation_service),
            settings_service: Arc::new(settings_service),
        }
    }
}
