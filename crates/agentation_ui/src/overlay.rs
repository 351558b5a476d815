//! Overlay scene: everything the engine asks the host to draw.
//!
//! The scene is plain data. Markers, the popup and the tooltip are positioned
//! in page space so they follow content while scrolling; the highlight box is
//! in viewport space.

use crate::constants::MARKER_SIZE;
use crate::geometry::{PagePoint, PageRect, Size, ViewportRect};
use crate::placement::{PopupPlacement, TooltipPlacement};

/// A numbered marker pinned to an annotated node.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOverlay {
    /// Annotation id shown on the badge
    pub key: u32,
    /// Marker center in page space; `None` while the node is detached
    pub position: Option<PagePoint>,
    /// True while this marker's annotation is being edited
    pub editing: bool,
}

impl MarkerOverlay {
    /// Badge bounds, centered on the marker position.
    pub fn bounds(&self) -> Option<PageRect> {
        self.position.map(|p| {
            PageRect::from_origin(
                p.offset(-MARKER_SIZE / 2.0, -MARKER_SIZE / 2.0),
                Size::new(MARKER_SIZE, MARKER_SIZE),
            )
        })
    }

    pub fn is_visible(&self) -> bool {
        self.position.is_some()
    }
}

/// The edit popup of the open session.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupOverlay {
    pub placement: PopupPlacement,
    /// Short label of the target node, shown as the popup title
    pub label: String,
    /// Current text of the popup input
    pub draft: String,
    /// True when editing an existing annotation (delete button visible)
    pub existing: bool,
}

/// Tooltip of a hovered marker.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipOverlay {
    /// Annotation id of the hovered marker
    pub key: u32,
    pub placement: TooltipPlacement,
    pub text: String,
}

/// Complete overlay state for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayScene {
    /// One marker per annotation, in list order
    pub markers: Vec<MarkerOverlay>,
    pub popup: Option<PopupOverlay>,
    pub highlight: Option<ViewportRect>,
    pub tooltip: Option<TooltipOverlay>,
}

impl OverlayScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(&self, key: u32) -> Option<&MarkerOverlay> {
        self.markers.iter().find(|m| m.key == key)
    }

    /// Marker under `point`, if any. Later markers are drawn on top and win.
    pub fn marker_at(&self, point: PagePoint) -> Option<&MarkerOverlay> {
        self.markers
            .iter()
            .rev()
            .find(|m| m.bounds().is_some_and(|b| b.contains(point)))
    }
}
