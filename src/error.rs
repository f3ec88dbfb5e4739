//! Error types, one enum per layer.
//!
//! `TransportError` is what a [`Transport`](crate::http::Transport) reports,
//! `HttpError` is what the gateway and API client surface, and `FetchError` is
//! the narrowed set handed to consumers of the markets domain.

use thiserror::Error;

/// Failures reported by a transport adapter before any HTTP status exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Not connected to the network")]
    NoNetwork,

    #[error("Request cancelled")]
    Cancelled,

    #[error("Request timed out")]
    TimedOut,

    #[error("Request could not be built: {0}")]
    InvalidRequest(String),

    #[error("Transport failure: {0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Client error {status}{}", fmt_message(.message))]
    Client {
        status: u16,
        message: Option<String>,
    },

    #[error("Server error {status}{}", fmt_message(.message))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("Unexpected status {status}")]
    Other { status: u16 },

    #[error("Invalid request body: {0}")]
    InvalidRequestBody(#[source] serde_json::Error),

    #[error("Invalid request")]
    InvalidRequest,

    #[error("Invalid response body: {0}")]
    InvalidResponseBody(#[source] serde_json::Error),

    #[error("Missing response body")]
    MissingResponseBody,

    #[error("No network")]
    NoNetwork,

    #[error("Cancelled")]
    Cancelled,

    #[error("Timeout")]
    Timeout,

    #[error("Unknown error")]
    Unknown,
}

fn fmt_message(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {m}"),
        None => String::new(),
    }
}

impl HttpError {
    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Client { status, .. }
            | HttpError::Server { status, .. }
            | HttpError::Other { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for HttpError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NoNetwork => HttpError::NoNetwork,
            TransportError::Cancelled => HttpError::Cancelled,
            TransportError::TimedOut => HttpError::Timeout,
            TransportError::InvalidRequest(_) => HttpError::InvalidRequest,
            TransportError::Other(_) => HttpError::Unknown,
        }
    }
}

/// Errors surfaced by the markets domain client.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchError {
    #[error("No markets retrieved")]
    NoMarketsRetrieved,

    #[error("No network")]
    NoNetwork,

    #[error("Timeout")]
    Timeout,

    #[error("Unspecified error")]
    Unspecified,
}

impl From<&HttpError> for FetchError {
    fn from(err: &HttpError) -> Self {
        match err {
            HttpError::NoNetwork => FetchError::NoNetwork,
            HttpError::Timeout => FetchError::Timeout,
            _ => FetchError::Unspecified,
        }
    }
}

impl From<HttpError> for FetchError {
    fn from(err: HttpError) -> Self {
        FetchError::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<u32>("not json").unwrap_err()
    }

    #[test]
    fn test_fetch_error_keeps_connectivity_and_timeout() {
        assert_eq!(FetchError::from(HttpError::NoNetwork), FetchError::NoNetwork);
        assert_eq!(FetchError::from(HttpError::Timeout), FetchError::Timeout);
    }

    #[test]
    fn test_fetch_error_collapses_everything_else() {
        let others = vec![
            HttpError::Client { status: 404, message: None },
            HttpError::Server { status: 504, message: Some("gateway".into()) },
            HttpError::Other { status: 101 },
            HttpError::InvalidRequestBody(json_error()),
            HttpError::InvalidRequest,
            HttpError::InvalidResponseBody(json_error()),
            HttpError::MissingResponseBody,
            HttpError::Cancelled,
            HttpError::Unknown,
        ];
        for err in others {
            assert_eq!(FetchError::from(&err), FetchError::Unspecified, "{err}");
        }
    }

    #[test]
    fn test_transport_error_mapping() {
        assert!(matches!(HttpError::from(TransportError::NoNetwork), HttpError::NoNetwork));
        assert!(matches!(HttpError::from(TransportError::Cancelled), HttpError::Cancelled));
        assert!(matches!(HttpError::from(TransportError::TimedOut), HttpError::Timeout));
        assert!(matches!(
            HttpError::from(TransportError::InvalidRequest("bad header".into())),
            HttpError::InvalidRequest
        ));
        assert!(matches!(
            HttpError::from(TransportError::Other("tls".into())),
            HttpError::Unknown
        ));
    }

    #[test]
    fn test_http_error_display_includes_message() {
        let err = HttpError::Server {
            status: 503,
            message: Some("maintenance".into()),
        };
        assert_eq!(err.to_string(), "Server error 503: maintenance");
        assert_eq!(err.status(), Some(503));

        let err = HttpError::Client { status: 429, message: None };
        assert_eq!(err.to_string(), "Client error 429");
    }

    #[test]
    fn test_invalid_response_body_keeps_source() {
        use std::error::Error as _;
        let err = HttpError::InvalidResponseBody(json_error());
        assert!(err.source().is_some());
        assert_eq!(err.status(), None);
    }
}
