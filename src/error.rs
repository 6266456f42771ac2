//! Error types for fetching, dumping and configuring.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while talking to the appliance or writing its data out.
///
/// None of these are fatal to the process: the live loop reports them and
/// keeps polling, the dump action reports them and returns to the menu.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection or DNS failure.
    #[error("network error: {0}")]
    Network(String),

    /// No response within the fetch timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned HTTP {status}: {reason}")]
    Protocol { status: u16, reason: String },

    /// The body was not a JSON object.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Reading or writing a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Protocol,
    Decode,
    Io,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Network(_) | Error::Timeout(_) => ErrorKind::Network,
            Error::Protocol { .. } => ErrorKind::Protocol,
            Error::Decode(_) => ErrorKind::Decode,
            Error::Io(_) => ErrorKind::Io,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

/// Transport failures. The fetch timeout is enforced by the caller, which
/// knows the configured bound and reports it as [`Error::Timeout`].
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Network(error_chain(&err))
        }
    }
}

/// reqwest's top-level message ("error sending request") hides the cause;
/// append the source chain so "connection refused" reaches the user.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_a_network_error() {
        let err = Error::Timeout(Duration::from_secs(3));
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.to_string(), "request timed out after 3s");
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{nope")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_protocol_display() {
        let err = Error::Protocol {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "endpoint returned HTTP 503: Service Unavailable"
        );
    }

    #[tokio::test]
    async fn test_reqwest_error_maps_to_network() {
        let err: Error = reqwest::Client::new()
            .get("not a url")
            .send()
            .await
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.to_string().starts_with("network error: "));
    }
}
