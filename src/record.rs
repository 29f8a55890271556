//! Flow record model and the extraction seam.
//!
//! A [`FlowRecord`] is an immutable snapshot of one observed row,
//! taken at admission time and submitted verbatim to the scoring
//! service. Field names serialize in camelCase to match the wire
//! contract of the scoring endpoint.

use serde::{Deserialize, Serialize};

/// Structured snapshot of a single flow row.
///
/// Produced once per admission and never mutated afterwards; the
/// queue owns it for the lifetime of the work item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowRecord {
    /// Opaque row identifier assigned by the observed UI.
    pub id: String,

    /// Source endpoints: addresses, allowlist entries, cloud workloads.
    #[serde(rename = "sourceIPs")]
    pub source_ips: Vec<String>,
    pub source_labels: Vec<String>,
    pub source_process: String,
    pub source_user: String,

    /// Target endpoints, same taxonomy as sources plus unmanaged hosts.
    #[serde(rename = "targetIPs")]
    pub target_ips: Vec<String>,
    pub target_labels: Vec<String>,
    pub target_process: String,
    pub target_user: String,
    #[serde(rename = "targetFQDN")]
    pub target_fqdn: String,

    /// Service and port attribution.
    pub services: Vec<String>,
    pub port_protocol: String,

    /// Flow timing metadata, kept as display strings.
    pub flows: String,
    pub connections: String,
    pub first_detected: String,
    pub last_detected: String,
}

/// Builds a [`FlowRecord`] from a row handle.
///
/// Implementations must be synchronous and side-effect-free; `None`
/// means the row cannot be scored and must not be enqueued. The
/// discovery source may hand the same row in repeatedly, so
/// extraction must also be idempotent.
pub trait RecordExtractor {
    type Row;

    fn extract(&self, row: &Self::Row) -> Option<FlowRecord>;
}

/// Extractor over loosely-typed JSON rows, used by the CLI feed and
/// in tests. Rows that are not objects or carry no `id` are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRowExtractor;

impl RecordExtractor for JsonRowExtractor {
    type Row = serde_json::Value;

    fn extract(&self, row: &serde_json::Value) -> Option<FlowRecord> {
        let record: FlowRecord = serde_json::from_value(row.clone()).ok()?;
        if record.id.is_empty() {
            return None;
        }
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_serializes_in_camel_case() {
        let record = FlowRecord {
            id: "row-1".into(),
            source_ips: vec!["10.0.0.1".into()],
            target_fqdn: "db.internal".into(),
            port_protocol: "5432 TCP".into(),
            first_detected: "2026-08-01".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["sourceIPs"][0], "10.0.0.1");
        assert_eq!(json["targetFQDN"], "db.internal");
        assert_eq!(json["portProtocol"], "5432 TCP");
        assert_eq!(json["firstDetected"], "2026-08-01");
        assert!(json.get("source_ips").is_none());
    }

    #[test]
    fn record_roundtrip() {
        let record = FlowRecord {
            id: "row-2".into(),
            services: vec!["postgres".into(), "https".into()],
            source_user: "svc-batch".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: FlowRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn partial_row_fills_defaults() {
        let parsed: FlowRecord =
            serde_json::from_value(json!({"id": "row-3", "flows": "12"})).unwrap();
        assert_eq!(parsed.id, "row-3");
        assert_eq!(parsed.flows, "12");
        assert!(parsed.source_ips.is_empty());
        assert!(parsed.target_fqdn.is_empty());
    }

    #[test]
    fn extractor_rejects_row_without_id() {
        let extractor = JsonRowExtractor;
        assert!(extractor.extract(&json!({"flows": "3"})).is_none());
        assert!(extractor.extract(&json!({"id": ""})).is_none());
    }

    #[test]
    fn extractor_rejects_non_object_row() {
        let extractor = JsonRowExtractor;
        assert!(extractor.extract(&json!("just a string")).is_none());
        assert!(extractor.extract(&json!(42)).is_none());
    }

    #[test]
    fn extractor_accepts_minimal_row() {
        let extractor = JsonRowExtractor;
        let record = extractor.extract(&json!({"id": "r9"})).unwrap();
        assert_eq!(record.id, "r9");
    }
}
