//! Administrative services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.
//! Every mutation is written through to the document store.

pub mod automation_service;
pub mod settings_service;
pub mod user_service;
