//! Wire types for the scoring service.
//!
//! All structs derive serde traits for JSON conversion in the formats
//! the scoring endpoint and the relay are known to speak.

use serde::{Deserialize, Serialize};

use crate::record::FlowRecord;

/// A successful scoring verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Numeric risk score; higher is safer.
    pub score: f64,
    /// Optional human-readable justification, surfaced as a tooltip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// The two response shapes the scoring service is known to produce.
///
/// Older deployments answer with a bare `{score, reason}` object,
/// newer ones wrap it in an `{ok, data, error}` envelope. Both decode
/// through this untagged enum and are collapsed by
/// [`normalize`](super::normalize), so nothing downstream branches on
/// the shape or on the channel that produced it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireResponse {
    Envelope {
        ok: bool,
        #[serde(default)]
        data: Option<ScoreResult>,
        #[serde(default)]
        error: Option<String>,
    },
    Bare(ScoreResult),
}

/// Request relayed over the intermediary channel: a message keyed by
/// a `type` discriminator carrying the record as payload.
#[derive(Debug, Clone, Serialize)]
pub struct RelayRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub payload: &'a FlowRecord,
}

impl<'a> RelayRequest<'a> {
    /// The `"score"` message for one record.
    pub fn score(payload: &'a FlowRecord) -> Self {
        Self {
            kind: "score",
            payload,
        }
    }
}
