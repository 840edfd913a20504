//! Startup loading of persisted documents.

use presencehub_domain::error::PresenceHubError;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ports::DocumentStore;

/// Load the document at `(collection, key)`, creating it when missing.
///
/// A missing document is replaced by `T::default()`, which is persisted
/// before being returned.
///
/// # Errors
///
/// Returns a storage error when loading or persisting the default fails, and
/// [`PresenceHubError::Serialization`] when the stored document does not
/// decode into `T`.
#[tracing::instrument(skip(store))]
pub async fn load_or_init<S, T>(
    store: &S,
    collection: &str,
    key: &str,
) -> Result<T, PresenceHubError>
where
    S: DocumentStore,
    T: Default + Serialize + DeserializeOwned,
{
    if let Some(document) = store.load(collection, key).await? {
        tracing::debug!("document loaded");
        return Ok(serde_json::from_value(document)?);
    }

    tracing::info!("document missing, writing default");
    let value = T::default();
    store.save(collection, key, serde_json::to_value(&value)?).await?;
    Ok(value)
}
