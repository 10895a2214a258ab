//! Error type shared by all upstream clients.

use thiserror::Error;

/// Errors that can occur while talking to an upstream travel API.
///
/// The adapters fold these into the error envelope; none of them escape
/// to the orchestrating agent as a fault.
///
/// # Example
///
/// ```
/// use travelkit::client::UpstreamError;
///
/// let error = UpstreamError::api(400, "Invalid departure date");
/// assert!(error.to_string().contains("Invalid departure date"));
/// ```
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The service answered with a non-success status.
    #[error("upstream API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// The service could not be reached at all.
    #[error("error contacting service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// Authentication with the service failed.
    #[error("authentication failed: {0}")]
    Auth(String),
}

impl UpstreamError {
    /// Create an Api error from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an Auth error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Whether this is a transport-level failure (service unreachable).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let error = UpstreamError::api(404, "resource not found");
        assert!(error.to_string().contains("404"));
        assert!(error.to_string().contains("resource not found"));
    }

    #[test]
    fn test_auth_error_display() {
        let error = UpstreamError::auth("invalid client credentials");
        assert!(error.to_string().contains("authentication failed"));
    }

    #[test]
    fn test_is_transport() {
        assert!(!UpstreamError::api(500, "boom").is_transport());
        assert!(!UpstreamError::auth("nope").is_transport());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UpstreamError>();
    }
}
