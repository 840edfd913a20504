//! In-memory port fakes shared by the unit tests of this crate.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use presencehub_domain::error::PresenceHubError;

use crate::ports::DocumentStore;

/// Document store backed by a map. Saves fail when `fail_saves` is set.
#[derive(Default)]
pub(crate) struct InMemoryStore {
    pub documents: Mutex<HashMap<(String, String), serde_json::Value>>,
    pub fail_saves: bool,
}

impl InMemoryStore {
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn put(&self, (collection, key): (&str, &str), document: serde_json::Value) {
        self.documents
            .lock()
            .unwrap()
            .insert((collection.to_string(), key.to_string()), document);
    }

    pub fn get(&self, (collection, key): (&str, &str)) -> Option<serde_json::Value> {
        self.documents
            .lock()
            .unwrap()
            .get(&(collection.to_string(), key.to_string()))
            .cloned()
    }
}

impl DocumentStore for InMemoryStore {
    fn load(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, PresenceHubError>> + Send {
        let doc = self.get((collection, key));
        async move { Ok(doc) }
    }

    fn save(
        &self,
        collection: &str,
        key: &str,
        document: serde_json::Value,
    ) -> impl Future<Output = Result<(), PresenceHubError>> + Send {
        let result = if self.fail_saves {
            Err(PresenceHubError::Storage("disk full".into()))
        } else {
            self.put((collection, key), document);
            Ok(())
        };
        async move { result }
    }
}

/// Document store whose first save is held back by `delay` before it lands.
pub(crate) struct SlowFirstSaveStore {
    pub inner: InMemoryStore,
    saves: AtomicUsize,
    delay: Duration,
}

impl SlowFirstSaveStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: InMemoryStore::default(),
            saves: AtomicUsize::new(0),
            delay,
        }
    }
}

impl DocumentStore for SlowFirstSaveStore {
    fn load(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, PresenceHubError>> + Send {
        self.inner.load(collection, key)
    }

    fn save(
        &self,
        collection: &str,
        key: &str,
        document: serde_json::Value,
    ) -> impl Future<Output = Result<(), PresenceHubError>> + Send {
        let delay = if self.saves.fetch_add(1, Ordering::SeqCst) == 0 {
            self.delay
        } else {
            Duration::ZERO
        };
        let (collection, key) = (collection.to_string(), key.to_string());
        async move {
            tokio::time::sleep(delay).await;
            self.inner.put((&collection, &key), document);
            Ok(())
        }
    }
}
