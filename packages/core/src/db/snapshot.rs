//! Snapshot Codec
//!
//! A persisted chart is a small JSON envelope:
//!
//! ```json
//! { "version": 2, "tree": { "id": "root-1", "status": "empty" }, "savedAt": "..." }
//! ```
//!
//! Decoding never trusts the payload. The envelope is first inspected as a
//! generic JSON value (version and tree shape), then deserialized, then the
//! whole tree is validated. Any failure is reported as a [`SnapshotError`] and
//! the caller falls back to a fresh chart.

use crate::db::error::SnapshotError;
use crate::models::PositionNode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Envelope version written and accepted by this build
pub const SNAPSHOT_VERSION: u64 = 2;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a> {
    version: u64,
    tree: &'a PositionNode,
    saved_at: DateTime<Utc>,
}

/// A decoded snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSnapshot {
    pub tree: PositionNode,
    /// Absent in snapshots written without a timestamp
    pub saved_at: Option<DateTime<Utc>>,
}

/// Serialize a tree into a versioned, timestamped envelope
pub fn encode_snapshot(tree: &PositionNode) -> serde_json::Result<String> {
    serde_json::to_string(&EnvelopeRef {
        version: SNAPSHOT_VERSION,
        tree,
        saved_at: Utc::now(),
    })
}

/// Decode an envelope, keeping its timestamp
///
/// # Errors
///
/// - `InvalidJson` if the payload does not parse
/// - `UnsupportedVersion` if `version` is missing or not [`SNAPSHOT_VERSION`]
/// - `MalformedTree` if the envelope or tree has the wrong shape
/// - `InvalidTree` if the tree breaks a structural rule
pub fn decode_envelope(payload: &str) -> Result<SavedSnapshot, SnapshotError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| SnapshotError::invalid_json(e.to_string()))?;

    let envelope = value
        .as_object()
        .ok_or_else(|| SnapshotError::malformed("envelope is not an object"))?;

    let version = envelope.get("version").and_then(Value::as_u64);
    if version != Some(SNAPSHOT_VERSION) {
        return Err(SnapshotError::unsupported_version(version, SNAPSHOT_VERSION));
    }

    let tree = envelope
        .get("tree")
        .ok_or_else(|| SnapshotError::malformed("missing tree"))?;
    let looks_like_node = tree
        .as_object()
        .is_some_and(|node| node.contains_key("id") && node.contains_key("status"));
    if !looks_like_node {
        return Err(SnapshotError::malformed("tree root needs id and status"));
    }

    let tree: PositionNode = serde_json::from_value(tree.clone())
        .map_err(|e| SnapshotError::malformed(e.to_string()))?;
    tree.validate_tree()?;

    // Timestamps are informational; a bad one does not reject the snapshot
    let saved_at = envelope
        .get("savedAt")
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|ts| ts.with_timezone(&Utc));

    Ok(SavedSnapshot { tree, saved_at })
}

/// Decode an envelope into its tree
pub fn decode_snapshot(payload: &str) -> Result<PositionNode, SnapshotError> {
    decode_envelope(payload).map(|snapshot| snapshot.tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeptKey, Grade, NodeStatus, ValidationError, MAX_TREE_DEPTH};
    use serde_json::json;

    fn sample_tree() -> PositionNode {
        let mut lead = PositionNode::new_with_id("node-a".to_string(), NodeStatus::Active);
        lead.department = Some(DeptKey::from("eng"));
        lead.grade = Some(Grade::G7);
        lead.name = Some("Ann".to_string());
        lead.children.push(PositionNode::new_with_id(
            "node-b".to_string(),
            NodeStatus::Vacant,
        ));
        let mut root = PositionNode::new_root();
        root.children.push(lead);
        root
    }

    #[test]
    fn test_encode_then_decode_preserves_tree() {
        let tree = sample_tree();
        let payload = encode_snapshot(&tree).unwrap();
        let snapshot = decode_envelope(&payload).unwrap();
        assert_eq!(snapshot.tree, tree);
        assert!(snapshot.saved_at.is_some());
    }

    #[test]
    fn test_envelope_shape() {
        let payload = encode_snapshot(&PositionNode::new_root()).unwrap();
        let value: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["version"], 2);
        assert_eq!(value["tree"], json!({ "id": "root-1", "status": "empty" }));
        assert!(value["savedAt"].is_string());
    }

    #[test]
    fn test_saved_at_is_optional() {
        let payload = json!({ "version": 2, "tree": { "id": "root-1", "status": "empty" } });
        let snapshot = decode_envelope(&payload.to_string()).unwrap();
        assert_eq!(snapshot.tree, PositionNode::new_root());
        assert!(snapshot.saved_at.is_none());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            decode_snapshot("{not json"),
            Err(SnapshotError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_version_mismatch() {
        let old = json!({ "version": 1, "tree": {} }).to_string();
        assert_eq!(
            decode_snapshot(&old),
            Err(SnapshotError::unsupported_version(Some(1), 2))
        );

        let missing = json!({ "tree": { "id": "root-1", "status": "empty" } }).to_string();
        assert_eq!(
            decode_snapshot(&missing),
            Err(SnapshotError::unsupported_version(None, 2))
        );
    }

    #[test]
    fn test_malformed_tree_shapes() {
        for payload in [
            json!([1, 2, 3]),
            json!({ "version": 2 }),
            json!({ "version": 2, "tree": {} }),
            json!({ "version": 2, "tree": { "id": "x" } }),
            json!({ "version": 2, "tree": { "id": "x", "status": "retired" } }),
            json!({ "version": 2, "tree": { "id": "x", "status": "active", "children": [{}] } }),
        ] {
            assert!(
                matches!(
                    decode_snapshot(&payload.to_string()),
                    Err(SnapshotError::MalformedTree(_))
                ),
                "payload should be malformed: {}",
                payload
            );
        }
    }

    #[test]
    fn test_structurally_invalid_tree() {
        let duplicate = json!({
            "version": 2,
            "tree": {
                "id": "root-1",
                "status": "empty",
                "children": [
                    { "id": "a", "status": "active" },
                    { "id": "a", "status": "vacant" }
                ]
            }
        });
        assert_eq!(
            decode_snapshot(&duplicate.to_string()),
            Err(SnapshotError::InvalidTree(ValidationError::DuplicateId(
                "a".to_string()
            )))
        );

        let nested_empty = json!({
            "version": 2,
            "tree": {
                "id": "a",
                "status": "active",
                "children": [{ "id": "b", "status": "empty" }]
            }
        });
        assert!(matches!(
            decode_snapshot(&nested_empty.to_string()),
            Err(SnapshotError::InvalidTree(ValidationError::EmptyBelowRoot(_)))
        ));
    }

    /// Empty root with a single line of vacancies below it, `levels` deep in total
    fn chain(levels: usize) -> PositionNode {
        let mut node = PositionNode::new_with_id(format!("node-{}", levels - 1), NodeStatus::Vacant);
        for level in (1..levels - 1).rev() {
            let mut parent = PositionNode::new_with_id(format!("node-{}", level), NodeStatus::Vacant);
            parent.children.push(node);
            node = parent;
        }
        let mut root = PositionNode::new_root();
        root.children.push(node);
        root
    }

    #[test]
    fn test_deepest_chart_round_trips() {
        let tree = chain(MAX_TREE_DEPTH);
        assert_eq!(tree.height(), MAX_TREE_DEPTH);
        assert!(tree.validate_tree().is_ok());

        let payload = encode_snapshot(&tree).unwrap();
        assert_eq!(decode_snapshot(&payload), Ok(tree));
    }

    #[test]
    fn test_chart_past_max_depth_is_invalid() {
        let payload = json!({ "version": 2, "tree": chain(MAX_TREE_DEPTH + 1) });
        assert_eq!(
            decode_snapshot(&payload.to_string()),
            Err(SnapshotError::InvalidTree(ValidationError::TooDeep(format!(
                "node-{}",
                MAX_TREE_DEPTH
            ))))
        );
    }
}
