//! Direct-fetch channel: POSTs the record straight to the scoring
//! endpoint.

use std::time::Duration;

use reqwest::Client;

use super::error::TransportError;
use super::types::WireResponse;
use crate::record::FlowRecord;

/// Default per-request timeout for the direct channel.
pub const DEFAULT_TIMEOUT_MS: u64 = 9_000;

/// The secondary (direct) scoring channel.
#[derive(Debug, Clone)]
pub struct HttpChannel {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpChannel {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_timeout(url, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }

    /// Channel with a custom request timeout (useful for testing and
    /// for deployments behind slow egress).
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }

    /// One POST of the record as a JSON body. Timeouts and non-2xx
    /// statuses are transport failures; the raw body shape is left to
    /// the caller's normalization step.
    pub async fn send(&self, record: &FlowRecord) -> Result<WireResponse, TransportError> {
        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
            });
        }

        response
            .json::<WireResponse>()
            .await
            .map_err(|_| TransportError::InvalidJson)
    }
}
