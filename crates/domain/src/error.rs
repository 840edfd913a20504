//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`PresenceHubError`] via `From`, so port boundaries only ever carry this
//! one type.

/// Boxed source error carried across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error for every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum PresenceHubError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("storage error")]
    Storage(#[source] BoxError),

    #[error("serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("delivery error")]
    Delivery(#[source] BoxError),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("entity identifier must not be empty")]
    EmptyEntityId,

    #[error("location label must not be empty")]
    EmptyLocation,

    #[error("delivery address must not be empty")]
    EmptyAddress,

    #[error("automation owner must not be empty")]
    EmptyOwner,

    #[error("action device must not be empty")]
    EmptyDevice,

    #[error("action method must not be empty")]
    EmptyMethod,

    #[error("action has {parameters} parameter types but {arguments} arguments")]
    ArgumentCountMismatch { parameters: usize, arguments: usize },

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("identifier {0} is already in use")]
    DuplicateId(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
