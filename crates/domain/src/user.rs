//! Users — the tracked entities that may also own automations.

use serde::{Deserialize, Serialize};

use crate::id::{EntityId, define_name};

define_name!(
    /// Where a user's notifications are delivered (a push registration token).
    DeliveryAddress,
    crate::error::ValidationError::EmptyAddress
);

/// A registered user together with the address their notifications go to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: EntityId,
    pub address: DeliveryAddress,
}
