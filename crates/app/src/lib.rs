//! # presencehub-app
//!
//! Application layer — the presence pipeline and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `UserDirectory` — who is tracked and where their notifications go
//!   - `NotificationSender` — hand an action payload to the push transport
//!   - `DocumentStore` — load & save whole JSON documents
//! - Run the **presence pipeline**:
//!   - `LocationStore` — latest location per entity, change detection
//!   - `RuleSet` — automations per owner, mutated in place by passes
//!   - `RuleEvaluator` — one snapshot, one edge-detection pass
//!   - `TriggerScheduler` — bounded coalescing queue and a single worker
//!   - `ActionDispatcher` — fire-and-forget delivery per edge
//!   - `PresenceEngine` — wires the above together
//! - Provide **administrative services** for users, automations and settings
//! - Load or initialise persisted documents at startup
//!
//! ## Dependency rule
//! Depends on `presencehub-domain` only (plus `tokio` for the worker and
//! timeouts). Never imports adapter crates. Adapters depend on *this* crate,
//! not the reverse.

pub mod bootstrap;
pub mod dispatcher;
pub mod evaluator;
pub mod location_store;
pub mod ports;
pub mod presence_engine;
pub mod rule_set;
pub mod scheduler;
pub mod services;
pub mod user_registry;

#[cfg(test)]
pub(crate) mod test_support;
