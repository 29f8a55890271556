//! Transport layer: delivers one record to the scoring service.
//!
//! Channels form an ordered strategy list tried within one logical
//! attempt: the relay first when configured, the direct HTTP POST
//! last. A channel failure falls through to the next channel; only
//! the final channel's failure fails the attempt. Responses from
//! every channel pass through the same [`normalize`] step.

mod error;
mod http;
mod relay;
mod types;

pub use error::TransportError;
pub use http::{DEFAULT_TIMEOUT_MS, HttpChannel};
pub use relay::{MessageRelay, RelayFuture};
pub use types::{RelayRequest, ScoreResult, WireResponse};

use std::future::Future;
use std::sync::Arc;

use tracing::warn;

use crate::record::FlowRecord;

/// The seam the scoring queue dispatches through. Implemented by
/// [`Transport`] and by test doubles.
pub trait ScoreSend: Send + Sync + 'static {
    fn send(
        &self,
        record: &FlowRecord,
        attempt: u32,
    ) -> impl Future<Output = Result<ScoreResult, TransportError>> + Send;
}

/// One transport strategy. Adding a channel kind is adding a variant
/// plus one arm in [`Channel::send`].
pub enum Channel {
    /// Primary: an embedder-supplied relay process.
    Relay(Arc<dyn MessageRelay>),
    /// Secondary: direct POST to the scoring endpoint.
    Http(HttpChannel),
}

impl Channel {
    fn name(&self) -> &'static str {
        match self {
            Channel::Relay(_) => "relay",
            Channel::Http(_) => "http",
        }
    }

    async fn send(&self, record: &FlowRecord) -> Result<WireResponse, TransportError> {
        match self {
            Channel::Relay(relay) => {
                let value = relay.request(RelayRequest::score(record)).await?;
                serde_json::from_value(value).map_err(|_| TransportError::InvalidJson)
            }
            Channel::Http(http) => http.send(record).await,
        }
    }
}

/// Ordered list of channels plus the shared normalization step.
pub struct Transport {
    channels: Vec<Channel>,
}

impl Transport {
    pub fn new(channels: Vec<Channel>) -> Self {
        Self { channels }
    }

    /// Direct-HTTP-only transport for the given endpoint.
    pub fn direct(url: impl Into<String>) -> Self {
        Self::new(vec![Channel::Http(HttpChannel::new(url))])
    }

    /// Relay-first transport falling back to direct HTTP.
    pub fn with_relay(relay: Arc<dyn MessageRelay>, url: impl Into<String>) -> Self {
        Self::new(vec![
            Channel::Relay(relay),
            Channel::Http(HttpChannel::new(url)),
        ])
    }
}

/// Collapses the two wire shapes into one verdict. A bare
/// `{score, reason}` object counts as `{ok: true, data: ...}`; an
/// envelope must carry `data` when `ok` is true.
pub fn normalize(response: WireResponse) -> Result<ScoreResult, TransportError> {
    match response {
        WireResponse::Bare(result) => Ok(result),
        WireResponse::Envelope {
            ok: true,
            data: Some(result),
            ..
        } => Ok(result),
        WireResponse::Envelope {
            ok: true,
            data: None,
            ..
        } => Err(TransportError::InvalidJson),
        WireResponse::Envelope { ok: false, error, .. } => Err(TransportError::Rejected(
            error.unwrap_or_else(|| "unspecified error".into()),
        )),
    }
}

impl ScoreSend for Transport {
    async fn send(
        &self,
        record: &FlowRecord,
        attempt: u32,
    ) -> Result<ScoreResult, TransportError> {
        let mut last = TransportError::NoChannels;
        let total = self.channels.len();
        for (idx, channel) in self.channels.iter().enumerate() {
            match channel.send(record).await.and_then(normalize) {
                Ok(result) => return Ok(result),
                Err(err) => {
                    if idx + 1 < total {
                        warn!(
                            row = %record.id,
                            attempt,
                            channel = channel.name(),
                            %err,
                            "channel failed, falling through"
                        );
                    }
                    last = err;
                }
            }
        }
        Err(last)
    }
}
