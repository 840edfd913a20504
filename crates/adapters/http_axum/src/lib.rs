//! # presencehub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Accept **location reports** (`POST /api/locations`) and feed them to
//!   the presence engine
//! - Serve a **REST-ish JSON API** for administration
//!   (`/api/users`, `/api/automations`, `/api/settings`, …)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `presencehub-app` (for port traits and services) and
//! `presencehub-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
