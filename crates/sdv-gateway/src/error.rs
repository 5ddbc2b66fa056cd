//! Gateway error types.

use thiserror::Error;

/// Errors that can occur when talking to the portal or trial-site API.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP transport error (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// The `error` field of the body, or the raw body.
        message: String,
    },

    /// The response body was not the JSON shape we expected.
    #[error("parse error: {0}")]
    Parse(String),

    /// A record parsed as JSON but holds a value outside the domain
    /// (unknown status spelling, unreadable timestamp, ...).
    #[error("invalid {kind} record: {reason}")]
    InvalidRecord {
        kind: &'static str,
        reason: String,
    },
}

impl GatewayError {
    /// Whether trying again later could succeed: transport failures and 5xx.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Parse(_) | Self::InvalidRecord { .. } => false,
        }
    }

    /// 404 from the API.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
