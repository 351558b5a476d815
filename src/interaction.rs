//! Interaction state machine types.
//!
//! The engine stores the hover target and the open session separately and
//! derives the observable [`InteractionState`] from them; an open session
//! always takes precedence over hover.

use crate::host::NodeId;
use crate::model::AnnotationId;

/// Top-level mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Inactive,
    Active(ActiveState),
}

impl InteractionState {
    pub fn is_active(&self) -> bool {
        matches!(self, InteractionState::Active(_))
    }
}

/// Sub-state while annotation mode is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveState {
    Idle,
    Hovering(NodeId),
    EditingNew(NodeId),
    EditingExisting(AnnotationId),
}

/// What an edit session will do on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Create a record for the target node
    New,
    /// Update the comment of an existing record
    Existing(AnnotationId),
}

/// The single transient edit session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub kind: SessionKind,
    /// Node the record is (or will be) bound to
    pub target: NodeId,
    /// Node the popup follows
    pub anchor: NodeId,
    /// Current popup text
    pub draft: String,
}

impl Session {
    pub fn new_annotation(target: NodeId) -> Self {
        Self {
            kind: SessionKind::New,
            target,
            anchor: target,
            draft: String::new(),
        }
    }

    pub fn edit(id: AnnotationId, target: NodeId, comment: &str) -> Self {
        Self {
            kind: SessionKind::Existing(id),
            target,
            anchor: target,
            draft: comment.to_string(),
        }
    }

    /// Id of the record being edited, if any.
    pub fn editing_id(&self) -> Option<AnnotationId> {
        match self.kind {
            SessionKind::Existing(id) => Some(id),
            SessionKind::New => None,
        }
    }
}

/// The tool's own visual controls. Pointer events over chrome never target nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromePart {
    Toolbar,
    Popup,
    Panel,
    Marker(AnnotationId),
}

/// What the pointer is over, as classified by the host adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Node(NodeId),
    Chrome(ChromePart),
}

/// Where keyboard focus is when a key goes down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Focus on the page (no text input)
    Page,
    /// Focus in the edit popup's text input
    PopupInput,
    /// Focus in one of the host's own text inputs
    OtherInput,
}

/// Whether the host must suppress its default handling of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Let the event reach the host surface
    PassThrough,
    /// Prevent default handling and stop propagation
    Consumed,
}

impl EventDisposition {
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventDisposition::Consumed)
    }
}

/// Result of committing the open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Created(AnnotationId),
    Updated(AnnotationId),
    /// Empty text: session discarded, nothing stored
    Cancelled,
    /// Target node left the tree: session discarded, nothing stored
    Discarded,
    /// No session was open
    NoSession,
}
