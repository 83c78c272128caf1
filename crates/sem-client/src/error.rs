//! Error classes surfaced by the client.
//!
//! Connection failures, upstream status failures and local shape failures are
//! kept apart so callers can decide what to report and how to exit.

use sem_api_models::ModelError;
use sem_config::ConfigError;
use thiserror::Error;

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors returned by [`crate::BaseClient`] and [`crate::ResourceApi`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP exchange did not complete (DNS, TLS, refused, timeout, ...).
    #[error("connecting to Semaphore failed: {detail}")]
    Connection {
        /// HTTP method of the failed request.
        method: String,
        /// Target URL of the failed request.
        url: String,
        /// Transport error detail.
        detail: reqwest::Error,
    },
    /// The server answered with a status other than 200.
    #[error("http status {status} with message \"{body}\" received from upstream")]
    Upstream {
        /// Response status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// The resource failed validation or could not be (de)serialized.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// Connection settings were unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {detail}")]
    Build {
        /// Builder error detail.
        detail: reqwest::Error,
    },
    /// A request URL could not be formed from the base URL.
    #[error("cannot build request URL from '{base}'")]
    InvalidBaseUrl {
        /// Base URL that rejected path segments.
        base: String,
    },
    /// A configured value cannot be sent as an HTTP header.
    #[error("value for header '{header}' contains invalid characters")]
    InvalidHeader {
        /// Header name.
        header: &'static str,
    },
}

impl ClientError {
    /// Upstream status code, when the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error is a local shape failure raised before any request.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Model(_) | Self::Config(_))
    }
}
