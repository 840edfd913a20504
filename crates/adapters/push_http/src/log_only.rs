//! Sender that only logs, for deployments without a push service.

use std::future::Future;

use presencehub_app::ports::NotificationSender;
use presencehub_domain::error::PresenceHubError;
use presencehub_domain::user::DeliveryAddress;

/// Logs every payload at `info` and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnlySender;

impl NotificationSender for LogOnlySender {
    fn send(
        &self,
        address: &DeliveryAddress,
        payload: &str,
    ) -> impl Future<Output = Result<(), PresenceHubError>> + Send {
        tracing::info!(%address, payload, "push disabled, notification logged");
        std::future::ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_always_succeed() {
        let address = DeliveryAddress::new("token").unwrap();
        assert!(LogOnlySender.send(&address, "[]").await.is_ok());
    }
}
