use reqwest::StatusCode;
use std::error::Error as StdError;

/// What went wrong on the wire for a single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The transport gave up waiting.
    Timeout,
    /// The peer reset an established connection.
    ConnectionReset,
    /// Any other failure while the request was in flight.
    Network,
    /// No connection could be made at all (DNS failure, refused connection).
    NoResponse,
    /// The upstream answered with a non-success status.
    Status(StatusCode),
    /// The response arrived but its body could not be read.
    Body,
    /// The request could not be built.
    Request,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub url: String,
    pub message: String,
}

impl TransportError {
    pub fn from_status(url: &str, status: StatusCode) -> Self {
        Self {
            kind: TransportErrorKind::Status(status),
            url: url.to_string(),
            message: format!("Request failed with status code {} for {}", status.as_u16(), url),
        }
    }

    pub fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if is_connection_reset(err) {
            TransportErrorKind::ConnectionReset
        } else if err.is_connect() {
            TransportErrorKind::NoResponse
        } else if err.is_body() || err.is_decode() {
            TransportErrorKind::Body
        } else if err.is_builder() {
            TransportErrorKind::Request
        } else if let Some(status) = err.status() {
            TransportErrorKind::Status(status)
        } else {
            TransportErrorKind::Network
        };

        Self {
            kind,
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self.kind {
            TransportErrorKind::Status(status) => Some(status),
            _ => None,
        }
    }

    /// Failures that are likely to go away if the same request is repeated.
    pub fn is_transient(&self) -> bool {
        match self.kind {
            TransportErrorKind::Timeout
            | TransportErrorKind::ConnectionReset
            | TransportErrorKind::Network => true,
            TransportErrorKind::Status(status) => {
                status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            TransportErrorKind::NoResponse
            | TransportErrorKind::Body
            | TransportErrorKind::Request => false,
        }
    }

    /// Failures that look like the upstream refusing us rather than the resource being wrong.
    pub fn is_fallback_eligible(&self) -> bool {
        match self.kind {
            TransportErrorKind::NoResponse
            | TransportErrorKind::ConnectionReset
            | TransportErrorKind::Timeout
            | TransportErrorKind::Network => true,
            TransportErrorKind::Status(status) => {
                status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS
            }
            TransportErrorKind::Body | TransportErrorKind::Request => false,
        }
    }
}

fn is_connection_reset(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(inner) = source {
        if let Some(io) = inner.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionReset {
                return true;
            }
        }
        source = inner.source();
    }
    false
}

/// The single error type surfaced by every adapter operation.
#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Upstream is blocking requests (status code 403) for {url}")]
    Blocked { url: String },

    #[error("Parsing error in {context}: {reason}")]
    Parse { context: String, reason: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScraperError {
    pub fn parse(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// True when the upstream kept answering 403 through every access path.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}
