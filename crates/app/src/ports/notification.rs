//! Notification port — hands a payload to the push transport.

use std::future::Future;

use presencehub_domain::error::PresenceHubError;
use presencehub_domain::user::DeliveryAddress;

/// Delivers an opaque payload to one recipient.
pub trait NotificationSender {
    /// Submit `payload` (a JSON-encoded action list) to `address`.
    ///
    /// Implementations report rejection or transport failure as
    /// [`PresenceHubError::Delivery`]. Callers never retry.
    fn send(
        &self,
        address: &DeliveryAddress,
        payload: &str,
    ) -> impl Future<Output = Result<(), PresenceHubError>> + Send;
}

impl<T: NotificationSender + Send + Sync> NotificationSender for std::sync::Arc<T> {
    fn send(
        &self,
        address: &DeliveryAddress,
        payload: &str,
    ) -> impl Future<Output = Result<(), PresenceHubError>> + Send {
        (**self).send(address, payload)
    }
}
