//! Storage-specific error type wrapping sqlx errors.

use presencehub_domain::error::PresenceHubError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// A stored document body is not valid JSON.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// A stored timestamp could not be parsed.
    #[error("invalid timestamp")]
    Timestamp(#[from] chrono::ParseError),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for PresenceHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
