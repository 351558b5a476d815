//! Annotation records and the node snapshot they are created from.

use serde::Serialize;

use crate::error::EngineError;
use crate::host::{NodeId, Surface};
use crate::path::{PathOptions, resolve_label, resolve_path, style_tags};
use agentation_ui::projection::to_page_space;

/// Unique identifier for an annotation. Allocated from 1, never reused until a clear.
pub type AnnotationId = u32;

/// Page-space point rounded to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AnchorPoint {
    pub x: i32,
    pub y: i32,
}

impl AnchorPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Round half-up, matching how browsers round layout coordinates for display.
    pub fn from_page(x: f32, y: f32) -> Self {
        Self {
            x: (x + 0.5).floor() as i32,
            y: (y + 0.5).floor() as i32,
        }
    }
}

/// Everything a record freezes about its node at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot {
    pub structural_path: String,
    pub short_label: String,
    /// Element kind as reported by the host
    pub tag_name: String,
    /// Trimmed text content, at most `snippet_max_chars` characters
    pub snippet: String,
    /// Style tags without the tool's own
    pub class_tags: Vec<String>,
    /// Center of the node's page-space box
    pub anchor: AnchorPoint,
}

impl NodeSnapshot {
    /// Capture the current state of `node`.
    ///
    /// Fails if the node is detached or has no layout box.
    pub fn capture<S: Surface>(
        surface: &S,
        node: NodeId,
        options: &PathOptions,
        snippet_max_chars: usize,
    ) -> Result<Self, EngineError> {
        if !surface.is_attached(node) {
            return Err(EngineError::NodeDetached(node));
        }
        let rect = surface
            .bounding_rect(node)
            .ok_or(EngineError::NoGeometry(node))?;
        let center = to_page_space(rect, surface.viewport().scroll).center();

        let text = surface.text_content(node);
        let snippet: String = text.trim().chars().take(snippet_max_chars).collect();

        Ok(Self {
            structural_path: resolve_path(surface, node, options),
            short_label: resolve_label(surface, node, options),
            tag_name: surface.tag_name(node),
            snippet,
            class_tags: style_tags(surface, node, options),
            anchor: AnchorPoint::from_page(center.x, center.y),
        })
    }
}

/// A committed annotation bound to a host node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationRecord {
    pub id: AnnotationId,
    /// Annotated node; observed, not owned
    #[serde(skip)]
    pub target: NodeId,
    pub structural_path: String,
    pub short_label: String,
    pub tag_name: String,
    pub snippet: String,
    pub class_tags: Vec<String>,
    pub anchor: AnchorPoint,
    /// Trimmed, never empty
    pub comment: String,
}

impl AnnotationRecord {
    pub fn new(id: AnnotationId, target: NodeId, snapshot: NodeSnapshot, comment: String) -> Self {
        Self {
            id,
            target,
            structural_path: snapshot.structural_path,
            short_label: snapshot.short_label,
            tag_name: snapshot.tag_name,
            snippet: snapshot.snippet,
            class_tags: snapshot.class_tags,
            anchor: snapshot.anchor,
            comment,
        }
    }

    /// Tooltip and popup title: `[id] label`.
    pub fn title(&self) -> String {
        format!("[{}] {}", self.id, self.short_label)
    }
}
