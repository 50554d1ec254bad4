//! Error types for the Kill Bill client
//!
//! Every public API returns `Result<T, Error>`. The three kinds a caller
//! must always be ready for are `Transport`, `Decode` and `Server`; none of
//! them is retried by this crate.

use serde::Deserialize;
use thiserror::Error;

/// The main error type for the Kill Bill client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("HTTP {status}: {message}")]
    Server {
        status: u16,
        message: String,
        payload: Option<ServerErrorPayload>,
    },

    #[error("Missing '{name}' header in response")]
    MissingHeader { name: String },

    #[error("{resource} '{key}' not found")]
    NotFound { resource: &'static str, key: String },

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Failed to encode request body: {message}")]
    Encode { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{resource} has no id; create or fetch it first")]
    MissingId { resource: &'static str },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error body returned by the server alongside a 4xx/5xx status
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerErrorPayload {
    pub class_name: Option<String>,
    pub code: Option<i64>,
    pub message: Option<String>,
    pub cause_class_name: Option<String>,
    pub cause_message: Option<String>,
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl Error {
    /// Create a transport error without an underlying reqwest error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an encode error
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing header error
    pub fn missing_header(name: impl Into<String>) -> Self {
        Self::MissingHeader { name: name.into() }
    }

    /// Create a not found error for a lookup done on the client side
    pub fn not_found(resource: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            key: key.into(),
        }
    }

    /// Build a server error from an HTTP status and the raw response body.
    ///
    /// The body is parsed as a [`ServerErrorPayload`] when possible; its
    /// `message` becomes the error message. Otherwise the trimmed body text
    /// is used, and an empty body falls back to a generic message.
    pub fn server(status: u16, body: &[u8]) -> Self {
        let payload = serde_json::from_slice::<ServerErrorPayload>(body).ok();
        let message = payload
            .as_ref()
            .and_then(|p| p.message.clone())
            .unwrap_or_else(|| {
                let text = String::from_utf8_lossy(body).trim().to_string();
                if text.is_empty() {
                    format!("request failed with status {status}")
                } else {
                    text
                }
            });

        Self::Server {
            status,
            message,
            payload,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Check if this is a 404 from the server or a failed client-side lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. }) || self.status() == Some(404)
    }

    /// HTTP status carried by a server error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for the Kill Bill client
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::decode("expected a JSON array");
        assert_eq!(
            err.to_string(),
            "Failed to decode response: expected a JSON array"
        );

        let err = Error::transport("connection refused");
        assert_eq!(err.to_string(), "Transport error: connection refused");

        let err = Error::config("missing base url");
        assert_eq!(err.to_string(), "Configuration error: missing base url");
    }

    #[test]
    fn test_server_error_with_payload() {
        let err = Error::server(500, br#"{"message":"boom"}"#);
        assert_eq!(err.to_string(), "HTTP 500: boom");
        assert_eq!(err.status(), Some(500));

        match err {
            Error::Server { payload, .. } => {
                let payload = payload.unwrap();
                assert_eq!(payload.message.as_deref(), Some("boom"));
                assert!(payload.class_name.is_none());
            }
            other => panic!("Expected Server, got {other:?}"),
        }
    }

    #[test]
    fn test_server_error_full_payload() {
        let body = br#"{
            "className": "org.killbill.billing.account.api.AccountApiException",
            "code": 3003,
            "message": "Account does not exist for id 42",
            "causeClassName": null,
            "causeMessage": null,
            "stackTrace": []
        }"#;
        let err = Error::server(404, body);

        assert!(err.is_not_found());
        match err {
            Error::Server {
                message, payload, ..
            } => {
                assert_eq!(message, "Account does not exist for id 42");
                assert_eq!(payload.unwrap().code, Some(3003));
            }
            other => panic!("Expected Server, got {other:?}"),
        }
    }

    #[test]
    fn test_server_error_plain_body() {
        let err = Error::server(502, b"  Bad Gateway\n");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");

        match err {
            Error::Server { payload, .. } => assert!(payload.is_none()),
            other => panic!("Expected Server, got {other:?}"),
        }
    }

    #[test]
    fn test_server_error_empty_body() {
        let err = Error::server(401, b"");
        assert_eq!(err.to_string(), "HTTP 401: request failed with status 401");
    }

    #[test]
    fn test_error_kinds() {
        assert!(Error::transport("x").is_transport());
        assert!(Error::decode("x").is_decode());
        assert!(Error::server(500, b"").is_server());

        assert!(!Error::decode("x").is_server());
        assert!(!Error::server(500, b"").is_not_found());
        assert_eq!(Error::config("x").status(), None);
    }

    #[test]
    fn test_not_found_lookup() {
        let err = Error::not_found("Tag definition", "VIP");
        assert_eq!(err.to_string(), "Tag definition 'VIP' not found");
        assert!(err.is_not_found());
        assert_eq!(err.status(), None);

        let err = Error::MissingId { resource: "Account" };
        assert_eq!(
            err.to_string(),
            "Account has no id; create or fetch it first"
        );
        assert!(!err.is_not_found());
    }
}
