//! HTTP push sender.
//!
//! Each payload is wrapped in a message addressed to the recipient's
//! registration token:
//!
//! ```json
//! { "message": { "token": "<address>", "data": { "actions": "<payload>" } } }
//! ```
//!
//! The payload stays a string because push data values must be strings;
//! the receiving client decodes the action list itself.

use std::time::Duration;

use serde::Serialize;

use presencehub_app::ports::NotificationSender;
use presencehub_domain::error::PresenceHubError;
use presencehub_domain::user::DeliveryAddress;

use crate::error::PushError;

/// Default client timeout for one push request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how to post push messages.
#[derive(Debug, Clone)]
pub struct PushConfig {
    /// Full URL of the push service's send endpoint.
    pub endpoint: String,
    /// Sent as a bearer token when present.
    pub access_token: Option<String>,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct Envelope<'a> {
    message: Message<'a>,
}

#[derive(Serialize)]
struct Message<'a> {
    token: &'a str,
    data: Data<'a>,
}

#[derive(Serialize)]
struct Data<'a> {
    actions: &'a str,
}

/// Delivers payloads to a push service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPushSender {
    endpoint: String,
    access_token: Option<String>,
    client: reqwest::Client,
}

impl HttpPushSender {
    /// Build a sender with its own connection-pooling client.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::Http`] if the HTTP client cannot be built.
    pub fn new(config: PushConfig) -> Result<Self, PushError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            endpoint: config.endpoint,
            access_token: config.access_token,
            client,
        })
    }

    async fn post(&self, address: &DeliveryAddress, payload: &str) -> Result<(), PushError> {
        let envelope = Envelope {
            message: Message {
                token: address.as_str(),
                data: Data { actions: payload },
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&envelope);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(
                endpoint = %self.endpoint,
                %status,
                body = %body,
                "push service rejected message"
            );
            return Err(PushError::Status { status, body });
        }

        tracing::debug!(endpoint = %self.endpoint, %status, "push message accepted");
        Ok(())
    }
}

impl NotificationSender for HttpPushSender {
    async fn send(
        &self,
        address: &DeliveryAddress,
        payload: &str,
    ) -> Result<(), PresenceHubError> {
        self.post(address, payload).await.map_err(Into::into)
    }
}
