//! Placement of markers, the edit popup, tooltips and the highlight box.
//!
//! Every function here is pure: it takes rectangles, the current viewport and a
//! [`PlacementConfig`] and returns a position. Nothing iterates towards a
//! solution; each decision is a single fixed-priority pass.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::geometry::{PagePoint, PageRect, Size, Viewport, ViewportRect};
use crate::projection::to_page_space;
use crate::text_metrics::TextMetrics;

/// Sizes and margins used by the placement engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Edit popup width
    pub popup_width: f32,
    /// Edit popup height
    pub popup_height: f32,
    /// Horizontal gap between node and popup
    pub popup_gap: f32,
    /// Vertical gap between node and popup
    pub popup_vertical_gap: f32,
    /// Distance the popup keeps from the viewport edges
    pub edge_margin: f32,
    /// Distance the tooltip keeps from the left/right viewport edges
    pub tooltip_edge_margin: f32,
    /// Distance from marker center to tooltip top
    pub tooltip_offset_y: f32,
    /// Safe margin of the tooltip arrow from either tooltip edge
    pub tooltip_arrow_margin: f32,
    /// Text wrap width inside the tooltip
    pub tooltip_max_content_width: f32,
    pub tooltip_padding_x: f32,
    pub tooltip_padding_y: f32,
    pub tooltip_font_size: f32,
    /// Tooltip line height as a ratio of the font size
    pub tooltip_line_height: f32,
    /// Padding between a hovered node and its highlight box
    pub highlight_padding: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            popup_width: constants::POPUP_WIDTH,
            popup_height: constants::POPUP_HEIGHT,
            popup_gap: constants::POPUP_GAP,
            popup_vertical_gap: constants::POPUP_VERTICAL_GAP,
            edge_margin: constants::VIEWPORT_EDGE_MARGIN,
            tooltip_edge_margin: constants::TOOLTIP_EDGE_MARGIN,
            tooltip_offset_y: constants::TOOLTIP_OFFSET_Y,
            tooltip_arrow_margin: constants::TOOLTIP_ARROW_MARGIN,
            tooltip_max_content_width: constants::TOOLTIP_MAX_CONTENT_WIDTH,
            tooltip_padding_x: constants::TOOLTIP_PADDING_X,
            tooltip_padding_y: constants::TOOLTIP_PADDING_Y,
            tooltip_font_size: constants::TOOLTIP_FONT_SIZE,
            tooltip_line_height: constants::TOOLTIP_LINE_HEIGHT_FACTOR,
            highlight_padding: constants::HIGHLIGHT_PADDING,
        }
    }
}

impl PlacementConfig {
    /// Fixed size of the edit popup.
    pub fn popup_size(&self) -> Size {
        Size::new(self.popup_width, self.popup_height)
    }

    fn tooltip_metrics(&self) -> TextMetrics {
        TextMetrics::custom(
            self.tooltip_font_size,
            constants::CHAR_WIDTH_FACTOR,
            self.tooltip_line_height,
        )
    }
}

// ============================================================================
// Markers & Highlight
// ============================================================================

/// Markers are pinned at the node's current top-right corner.
pub fn marker_position(node: PageRect) -> PagePoint {
    node.top_right()
}

/// The highlight box surrounds the hovered node in viewport space.
pub fn highlight_rect(node: ViewportRect, config: &PlacementConfig) -> ViewportRect {
    node.expanded(config.highlight_padding)
}

// ============================================================================
// Edit Popup
// ============================================================================

/// Side of the target node the popup was placed on, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupSide {
    /// Immediately right of the node, top-aligned.
    Right,
    /// Immediately left of the node, top-aligned.
    Left,
    /// Directly below the node, left-aligned.
    Below,
    /// Directly above the node, left-aligned.
    Above,
}

/// Result of popup placement, in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupPlacement {
    pub side: PopupSide,
    pub origin: PagePoint,
    pub size: Size,
}

impl PopupPlacement {
    pub fn rect(&self) -> PageRect {
        PageRect::from_origin(self.origin, self.size)
    }
}

/// Place the edit popup next to `node` (viewport space).
///
/// Tries right, then left, then below, then above. Fit tests use viewport
/// coordinates; the returned origin is in page space. The last branch is taken
/// even if it still overflows.
pub fn place_popup(node: ViewportRect, viewport: &Viewport, config: &PlacementConfig) -> PopupPlacement {
    let page = to_page_space(node, viewport.scroll);
    let size = config.popup_size();
    let gap = config.popup_gap;
    let vgap = config.popup_vertical_gap;
    let margin = config.edge_margin;

    let (side, origin) = if node.right() + gap + size.width <= viewport.width - margin {
        (PopupSide::Right, PagePoint::new(page.right() + gap, page.top()))
    } else if node.left() - size.width - gap >= margin {
        (
            PopupSide::Left,
            PagePoint::new(page.left() - size.width - gap, page.top()),
        )
    } else if node.bottom() + vgap + size.height <= viewport.height - margin {
        (PopupSide::Below, PagePoint::new(page.left(), page.bottom() + vgap))
    } else {
        (
            PopupSide::Above,
            PagePoint::new(page.left(), page.top() - size.height - vgap),
        )
    };

    log::trace!("Popup placed {:?} at ({:.0}, {:.0})", side, origin.x, origin.y);
    PopupPlacement { side, origin, size }
}

// ============================================================================
// Marker Tooltip
// ============================================================================

/// Result of tooltip placement, in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPlacement {
    pub origin: PagePoint,
    pub size: Size,
    /// Horizontal arrow position in tooltip-local coordinates.
    pub arrow_left: f32,
}

impl TooltipPlacement {
    pub fn rect(&self) -> PageRect {
        PageRect::from_origin(self.origin, self.size)
    }
}

/// Estimate the tooltip box size for `text`, padding included.
///
/// The width never drops below twice the arrow margin so the arrow always has
/// a valid range.
pub fn tooltip_size(text: &str, config: &PlacementConfig) -> Size {
    let content = config
        .tooltip_metrics()
        .measure_wrapped(text, config.tooltip_max_content_width);
    Size::new(
        (content.width + config.tooltip_padding_x * 2.0).max(config.tooltip_arrow_margin * 2.0),
        content.height + config.tooltip_padding_y * 2.0,
    )
}

/// Place a tooltip of `size` under the marker centered at `marker`.
///
/// The box is centered on the marker, then clamped into
/// `[scroll.x + margin, scroll.x + width - margin - size.width]`; the left edge
/// wins when the tooltip is wider than the viewport. The arrow points at the
/// marker's true center, clamped to its safe margin inside the box.
pub fn place_tooltip(
    marker: PagePoint,
    size: Size,
    viewport: &Viewport,
    config: &PlacementConfig,
) -> TooltipPlacement {
    let width = size.width;
    let margin = config.tooltip_edge_margin;

    let mut left = marker.x - width / 2.0;

    let right_limit = viewport.scroll.x + viewport.width - margin;
    if left + width > right_limit {
        left = right_limit - width;
    }

    let left_limit = viewport.scroll.x + margin;
    if left < left_limit {
        left = left_limit;
    }

    let arrow_margin = config.tooltip_arrow_margin;
    let arrow_left = if width >= arrow_margin * 2.0 {
        (marker.x - left).max(arrow_margin).min(width - arrow_margin)
    } else {
        width / 2.0
    };

    TooltipPlacement {
        origin: PagePoint::new(left, marker.y + config.tooltip_offset_y),
        size,
        arrow_left,
    }
}
