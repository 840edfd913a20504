//! In-memory wiring shared by the handler tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use presencehub_app::dispatcher::{ActionDispatcher, DEFAULT_SEND_TIMEOUT};
use presencehub_app::location_store::LocationStore;
use presencehub_app::ports::{DocumentStore, NotificationSender};
use presencehub_app::presence_engine::PresenceEngine;
use presencehub_app::rule_set::RuleSet;
use presencehub_app::scheduler::SchedulerConfig;
use presencehub_app::services::automation_service::AutomationService;
use presencehub_app::services::settings_service::SettingsService;
use presencehub_app::services::user_service::UserService;
use presencehub_app::user_registry::UserRegistry;
use presencehub_domain::error::PresenceHubError;
use presencehub_domain::settings::Settings;
use presencehub_domain::user::DeliveryAddress;

use crate::state::AppState;

#[derive(Default)]
pub(crate) struct InMemoryStore {
    documents: Mutex<HashMap<(String, String), serde_json::Value>>,
}

impl InMemoryStore {
    pub fn get(&self, collection: &str, key: &str) -> Option<serde_json::Value> {
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
        let doc = self.get(collection, key);
        async move { Ok(doc) }
    }

    fn save(
        &self,
        collection: &str,
        key: &str,
        document: serde_json::Value,
    ) -> impl Future<Output = Result<(), PresenceHubError>> + Send {
        self.documents
            .lock()
            .unwrap()
            .insert((collection.to_string(), key.to_string()), document);
        async { Ok(()) }
    }
}

#[derive(Default)]
pub(crate) struct RecordingSender {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl NotificationSender for RecordingSender {
    fn send(
        &self,
        address: &DeliveryAddress,
        payload: &str,
    ) -> impl Future<Output = Result<(), PresenceHubError>> + Send {
        self.sent
            .lock()
            .unwrap()
            .push((address.to_string(), payload.to_string()));
        async { Ok(()) }
    }
}

pub(crate) struct TestApp {
    pub state: AppState<Arc<InMemoryStore>>,
    pub store: Arc<InMemoryStore>,
    pub sender: Arc<RecordingSender>,
}

impl TestApp {
    pub fn router(&self) -> Router {
        crate::router::build(self.state.clone())
    }
}

/// Wire real services over in-memory fakes. Must run inside a tokio runtime.
pub(crate) fn test_app() -> TestApp {
    let registry = Arc::new(UserRegistry::default());
    let rules = Arc::new(RuleSet::default());
    let store = Arc::new(InMemoryStore::default());
    let sender = Arc::new(RecordingSender::default());

    let dispatcher = Arc::new(ActionDispatcher::new(
        Arc::clone(&registry),
        Arc::clone(&sender),
        DEFAULT_SEND_TIMEOUT,
    ));
    let locations = Arc::new(LocationStore::new(Arc::clone(&registry)));
    let (engine, _worker) = PresenceEngine::start(
        locations,
        Arc::clone(&rules),
        dispatcher,
        SchedulerConfig::default(),
    );

    let state = AppState::new(
        engine,
        UserService::new(registry, Arc::clone(&store)),
        AutomationService::new(rules, Arc::clone(&store)),
        SettingsService::new(Settings::default(), Arc::clone(&store)),
    );
    TestApp {
        state,
        store,
        sender,
    }
}

/// Send one request and return the status with the decoded JSON body
/// (`Null` when the body is empty).
pub(crate) async fn call(
    router: Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}
