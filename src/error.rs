//! Error types of the annotation engine.

use thiserror::Error;

use crate::host::NodeId;
use crate::model::AnnotationId;

/// Failures of session-opening operations and snapshot capture.
///
/// No-op conditions (empty comment, unknown id on delete, clearing an empty
/// store) are not errors and never produce one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Target node was removed from the host tree
    #[error("{0} is no longer attached to the host tree")]
    NodeDetached(NodeId),

    /// Target node is attached but reports no layout box
    #[error("{0} has no layout box")]
    NoGeometry(NodeId),

    /// No record with this id exists
    #[error("Unknown annotation: {0}")]
    UnknownAnnotation(AnnotationId),

    /// Operation requires annotation mode
    #[error("Annotation mode is not active")]
    Inactive,

    /// Operation requires an open edit session
    #[error("No edit session is open")]
    NoSession,
}

/// Failures reported by a clipboard backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard access on this host
    #[error("Clipboard is not available")]
    Unavailable,

    /// The host refused the write
    #[error("Clipboard write rejected: {0}")]
    Rejected(String),
}
