//! Error types for the scoring transport.

use thiserror::Error;

/// Failures while delivering one record to the scoring service.
///
/// Every variant is retryable up to the attempt cap; the queue
/// converts exhaustion into a terminal failure, never this type.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The scoring endpoint answered with a non-success HTTP status.
    #[error("HTTP {status}")]
    Http { status: u16 },

    /// Network-level failure: DNS, refused connection, request timeout.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not one of the known response shapes.
    #[error("Invalid JSON")]
    InvalidJson,

    /// The service answered `ok: false`.
    #[error("scoring rejected: {0}")]
    Rejected(String),

    /// The relay channel could not produce a response.
    #[error("relay error: {0}")]
    Relay(String),

    /// The transport was built with an empty channel list.
    #[error("no transport channels configured")]
    NoChannels,
}
