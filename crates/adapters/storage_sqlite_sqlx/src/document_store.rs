//! `SQLite` implementation of [`DocumentStore`].

use sqlx::SqlitePool;

use presencehub_app::ports::DocumentStore;
use presencehub_domain::error::PresenceHubError;
use presencehub_domain::time::{Timestamp, now};

use crate::error::StorageError;

/// `SQLite`-backed document store. One row per `(collection, key)`.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    /// Create a new store backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// When the document was last written, if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the query fails or the stored timestamp
    /// is malformed.
    pub async fn updated_at(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Timestamp>, StorageError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT updated_at FROM documents WHERE collection = ? AND key = ?")
                .bind(collection)
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        row.map(|(raw,)| {
            chrono::DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.to_utc())
                .map_err(StorageError::from)
        })
        .transpose()
    }
}

impl DocumentStore for SqliteDocumentStore {
    async fn load(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, PresenceHubError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT body FROM documents WHERE collection = ? AND key = ?")
                .bind(collection)
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(StorageError::from)?;

        let Some((body,)) = row else {
            return Ok(None);
        };
        let value = serde_json::from_str(&body).map_err(StorageError::from)?;
        Ok(Some(value))
    }

    async fn save(
        &self,
        collection: &str,
        key: &str,
        document: serde_json::Value,
    ) -> Result<(), PresenceHubError> {
        let body = serde_json::to_string(&document).map_err(StorageError::from)?;
        let updated_at = now().to_rfc3339();

        sqlx::query(
            "INSERT INTO documents (collection, key, body, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT (collection, key) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
        )
        .bind(collection)
        .bind(key)
        .bind(&body)
        .bind(&updated_at)
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        tracing::debug!(collection, key, bytes = body.len(), "document saved");
        Ok(())
    }
}
