//! Error types for the Reqlytics API client
//!
//! Every request resolves to exactly one of four kinds. The split matters at
//! the workflow boundary: a `Protocol` failure (reverse proxy handing back an
//! HTML error page) must surface differently from a plain network failure or
//! a well-formed server error.

use thiserror::Error;

/// Errors raised by the remote stats/plan client
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Credentials are missing; no request was made
    #[error("not signed in")]
    Unauthenticated,

    /// Transport-level failure: DNS, connect, TLS, interrupted body
    #[error("network failure: {0}")]
    Network(String),

    /// The server answered with something other than the JSON we expect
    #[error("unexpected server response: {0}")]
    Protocol(String),

    /// The server returned an explicit error (non-2xx status or error payload)
    #[error("{0}")]
    Application(String),
}

impl ApiError {
    /// Map a reqwest error onto our kinds.
    ///
    /// Body-decode failures mean the server spoke, but not in the shape we
    /// expect; everything else is transport.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Protocol(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }

    /// Short machine-friendly label, used in logs and failure toasts
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => "unauthenticated",
            ApiError::Network(_) => "network",
            ApiError::Protocol(_) => "protocol",
            ApiError::Application(_) => "application",
        }
    }
}
