//! User directory port — who is tracked and where their notifications go.

use presencehub_domain::id::EntityId;
use presencehub_domain::user::DeliveryAddress;

/// Read-only view of the registry of known users.
///
/// Lookups are in-memory and must never block on IO; the location store
/// consults [`is_known`](Self::is_known) on every update.
pub trait UserDirectory {
    /// Whether `entity` is a registered user whose location is tracked.
    fn is_known(&self, entity: &EntityId) -> bool;

    /// Address to deliver `owner`'s notifications to, if registered.
    fn resolve_address(&self, owner: &EntityId) -> Option<DeliveryAddress>;
}

impl<T: UserDirectory + ?Sized> UserDirectory for std::sync::Arc<T> {
    fn is_known(&self, entity: &EntityId) -> bool {
        (**self).is_known(entity)
    }

    fn resolve_address(&self, owner: &EntityId) -> Option<DeliveryAddress> {
        (**self).resolve_address(owner)
    }
}
