//! Error types for the catalog client and the fetch layer.
//!
//! # Design
//! `ApiError` covers everything the deterministic core can observe: a
//! response with a non-success status, or a body that does not decode.
//! Transport-level failures happen in the host executor before a response
//! exists, so they appear one layer up as `FetchError::Network`.

use std::fmt;

/// Errors returned by `CatalogClient` parse methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-success status. The raw status and
    /// body are kept for logging.
    Request { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Request { status, body } => write!(f, "HTTP {status}: {body}"),
            ApiError::Decode(msg) => write!(f, "decoding failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Outcome of a fetch as seen by screen state: either the transport failed
/// before any response existed, or the response could not be turned into a
/// payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport-level failure; no HTTP response was received.
    Network(String),

    /// The response was received but rejected by the client.
    Api(ApiError),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Api(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Network(_) => None,
            FetchError::Api(err) => Some(err),
        }
    }
}

impl From<ApiError> for FetchError {
    fn from(err: ApiError) -> Self {
        FetchError::Api(err)
    }
}
