//! # presencehub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `DocumentStore` port defined in `presencehub-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Store each document as one JSON text row keyed by `(collection, key)`
//!
//! ## Dependency rule
//! Depends on `presencehub-app` (for port traits) and `presencehub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod document_store;
pub mod error;
pub mod pool;

pub use document_store::SqliteDocumentStore;
pub use error::StorageError;
pub use pool::{Config, Database};
