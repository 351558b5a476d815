//! Tests for report formats.

mod json_tests;

use crate::host::NodeId;
use crate::model::{AnchorPoint, AnnotationId, AnnotationRecord, NodeSnapshot};

/// Build a record without going through a host tree.
pub(super) fn record(id: AnnotationId, label: &str, comment: &str) -> AnnotationRecord {
    AnnotationRecord::new(
        id,
        NodeId::new(u64::from(id)),
        NodeSnapshot {
            structural_path: format!("body > main > {}", label),
            short_label: label.to_string(),
            tag_name: label.to_uppercase(),
            snippet: String::new(),
            class_tags: Vec::new(),
            anchor: AnchorPoint::new(100, 200),
        },
        comment.to_string(),
    )
}
