//! Error types for API calls.
//!
//! A 403 response is reported as [`Error::Forbidden`], separately from every
//! other failed status ([`Error::Status`]) and from failures below HTTP
//! ([`Error::Transport`]). Nothing is retried.

use level3_auth::AuthError;
use level3_xml::XmlError;

/// Errors returned by [`crate::ApiClient`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service rejected the request signature or credentials (HTTP 403).
    #[error("request was not authorized: {body}")]
    Forbidden {
        /// Response body sent by the service.
        body: String,
    },

    /// The service answered with a non-success status other than 403.
    #[error("request failed with HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body sent by the service.
        body: String,
    },

    /// The request could not be sent or its response could not be read.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request could not be signed.
    #[error("signing failed: {0}")]
    Signing(#[from] AuthError),

    /// The response body could not be parsed or navigated.
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),
}

/// Result type for API calls.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the request was rejected with HTTP 403.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }

    /// Whether this is a non-403 status or a failure below HTTP.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Transport(_))
    }

    /// HTTP status code, if the service answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Forbidden { .. } => Some(403),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
