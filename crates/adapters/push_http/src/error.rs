//! Push-specific error type wrapping reqwest errors.

use presencehub_domain::error::PresenceHubError;

/// Errors originating from the HTTP push transport.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// The request could not be built or sent, or timed out.
    #[error("push request failed")]
    Http(#[from] reqwest::Error),

    /// The push service answered with a non-success status.
    #[error("push service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl From<PushError> for PresenceHubError {
    fn from(err: PushError) -> Self {
        Self::Delivery(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_into_delivery_variant() {
        let err: PresenceHubError = PushError::Status {
            status: reqwest::StatusCode::BAD_REQUEST,
            body: "invalid token".to_string(),
        }
        .into();
        assert!(matches!(err, PresenceHubError::Delivery(_)));
    }

    #[test]
    fn should_display_status_and_body() {
        let err = PushError::Status {
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: "expired".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "push service returned 401 Unauthorized: expired"
        );
    }
}
