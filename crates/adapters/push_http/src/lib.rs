//! # presencehub-adapter-push-http
//!
//! Push notification adapter using [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the `NotificationSender` port defined in `presencehub-app::ports`
//! - Wrap each action payload in a push message addressed to the recipient's
//!   registration token and POST it to the configured endpoint
//! - Provide a log-only sender for deployments without a push service
//!
//! ## Dependency rule
//! Depends on `presencehub-app` (for port traits) and `presencehub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod log_only;
pub mod sender;

pub use error::PushError;
pub use log_only::LogOnlySender;
pub use sender::{HttpPushSender, PushConfig};
