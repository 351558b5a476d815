//! Data models for annotation records.

mod record;

pub use record::{AnchorPoint, AnnotationId, AnnotationRecord, NodeSnapshot};
