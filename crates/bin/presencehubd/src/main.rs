//! # presencehubd — presencehub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Load the persisted users, automations and settings documents
//! - Start the presence engine with the configured notification sender
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use presencehub_adapter_http_axum::state::{AppState, Engine};
use presencehub_adapter_push_http::{HttpPushSender, LogOnlySender};
use presencehub_adapter_storage_sqlite_sqlx::SqliteDocumentStore;
use presencehub_app::bootstrap::load_or_init;
use presencehub_app::dispatcher::ActionDispatcher;
use presencehub_app::location_store::LocationStore;
use presencehub_app::ports::NotificationSender;
use presencehub_app::ports::document_store::documents;
use presencehub_app::presence_engine::PresenceEngine;
use presencehub_app::rule_set::{AutomationsByOwner, RuleSet};
use presencehub_app::scheduler::SchedulerConfig;
use presencehub_app::services::automation_service::AutomationService;
use presencehub_app::services::settings_service::SettingsService;
use presencehub_app::services::user_service::UserService;
use presencehub_app::user_registry::UserRegistry;
use presencehub_domain::id::EntityId;
use presencehub_domain::settings::Settings;
use presencehub_domain::user::DeliveryAddress;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = presencehub_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .context("failed to open database")?;
    let store = SqliteDocumentStore::new(db.pool().clone());

    // Persisted documents
    let (collection, key) = documents::USERS;
    let users: HashMap<EntityId, DeliveryAddress> = load_or_init(&store, collection, key)
        .await
        .context("failed to load users")?;
    let (collection, key) = documents::AUTOMATIONS;
    let automations: AutomationsByOwner = load_or_init(&store, collection, key)
        .await
        .context("failed to load automations")?;
    let (collection, key) = documents::SETTINGS;
    let settings: Settings = load_or_init(&store, collection, key)
        .await
        .context("failed to load settings")?;

    for (collection, key) in [documents::USERS, documents::AUTOMATIONS, documents::SETTINGS] {
        match store.updated_at(collection, key).await {
            Ok(updated_at) => tracing::debug!(collection, ?updated_at, "document ready"),
            Err(err) => tracing::warn!(collection, error = %err, "document timestamp unreadable"),
        }
    }

    let registry = Arc::new(UserRegistry::new(users));
    let rules = Arc::new(RuleSet::new(automations));
    tracing::info!(users = registry.list().len(), automations = rules.len(), "documents loaded");

    // Engine
    let (engine, worker) = match config.push() {
        Some(push) => {
            tracing::info!(endpoint = %push.endpoint, "push delivery enabled");
            let sender = HttpPushSender::new(push).context("failed to build push client")?;
            start_engine(&registry, &rules, sender, config.send_timeout(), config.scheduler())
        }
        None => {
            tracing::warn!("push delivery disabled, notifications will only be logged");
            start_engine(
                &registry,
                &rules,
                LogOnlySender,
                config.send_timeout(),
                config.scheduler(),
            )
        }
    };

    // Services
    let state = AppState::new(
        engine,
        UserService::new(registry, store.clone()),
        AutomationService::new(rules, store.clone()),
        SettingsService::new(settings, store),
    );
    let app = presencehub_adapter_http_axum::router::build(state);

    // HTTP
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(%bind_addr, "presencehubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router held the last scheduler handle, so the worker drains and stops.
    if let Err(err) = worker.await {
        tracing::warn!(error = %err, "evaluation worker ended abnormally");
    }
    tracing::info!("presencehubd stopped");

    Ok(())
}

fn start_engine<N>(
    registry: &Arc<UserRegistry>,
    rules: &Arc<RuleSet>,
    sender: N,
    send_timeout: Duration,
    scheduler: SchedulerConfig,
) -> (Engine, JoinHandle<()>)
where
    N: NotificationSender + Send + Sync + 'static,
{
    let dispatcher = Arc::new(ActionDispatcher::new(
        Arc::clone(registry),
        sender,
        send_timeout,
    ));
    let locations = Arc::new(LocationStore::new(Arc::clone(registry)));
    PresenceEngine::start(locations, Arc::clone(rules), dispatcher, scheduler)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
