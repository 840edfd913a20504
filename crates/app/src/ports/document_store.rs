//! Document store port — key-value persistence for whole JSON documents.

use std::future::Future;

use presencehub_domain::error::PresenceHubError;

/// Collection and key names of the documents the hub persists.
pub mod documents {
    pub const USERS: (&str, &str) = ("users", "users");
    pub const AUTOMATIONS: (&str, &str) = ("automations", "automations");
    pub const SETTINGS: (&str, &str) = ("config", "config");
}

/// Stores JSON documents addressed by `(collection, key)`.
pub trait DocumentStore {
    /// Load a document. `Ok(None)` means it has never been saved.
    fn load(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, PresenceHubError>> + Send;

    /// Create or replace a document.
    fn save(
        &self,
        collection: &str,
        key: &str,
        document: serde_json::Value,
    ) -> impl Future<Output = Result<(), PresenceHubError>> + Send;
}

impl<T: DocumentStore + Send + Sync> DocumentStore for std::sync::Arc<T> {
    fn load(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, PresenceHubError>> + Send {
        (**self).load(collection, key)
    }

    fn save(
        &self,
        collection: &str,
        key: &str,
        document: serde_json::Value,
    ) -> impl Future<Output = Result<(), PresenceHubError>> + Send {
        (**self).save(collection, key, document)
    }
}
