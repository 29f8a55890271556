//! Intermediary relay channel seam.
//!
//! Some deployments proxy scoring requests through a companion
//! process with its own network egress. The crate only defines the
//! request/response seam; embedders supply the transport behind it,
//! and the reply goes through the same normalization as a direct
//! HTTP body.

use std::future::Future;
use std::pin::Pin;

use super::error::TransportError;
use super::types::RelayRequest;

/// Boxed reply future, so the trait stays usable as a trait object.
pub type RelayFuture<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value, TransportError>> + Send + 'a>>;

/// Request/response relay keyed by a message `type` discriminator.
///
/// `request` receives the `"score"` message carrying the record and
/// answers with the raw JSON reply. Transport-level problems (relay
/// process gone, no response) surface as [`TransportError::Relay`].
pub trait MessageRelay: Send + Sync {
    fn request<'a>(&'a self, msg: RelayRequest<'a>) -> RelayFuture<'a>;
}
