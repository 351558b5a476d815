//! Centralized constants for agentation_ui
//!
//! Default sizes and margins of the overlay chrome. These are configuration,
//! not behavior: [`crate::PlacementConfig`] starts from them and may override any.

// =============================================================================
// Edit Popup
// =============================================================================

/// Fixed width of the edit popup
pub const POPUP_WIDTH: f32 = 244.0;

/// Fixed height of the edit popup
pub const POPUP_HEIGHT: f32 = 170.0;

/// Horizontal gap between the target node and the popup (right/left placement)
pub const POPUP_GAP: f32 = 12.0;

/// Vertical gap between the target node and the popup (below/above placement)
pub const POPUP_VERTICAL_GAP: f32 = 8.0;

/// Minimum distance the popup keeps from the viewport edges
pub const VIEWPORT_EDGE_MARGIN: f32 = 10.0;

// =============================================================================
// Marker Tooltip
// =============================================================================

/// Minimum distance the tooltip keeps from the left/right viewport edges
pub const TOOLTIP_EDGE_MARGIN: f32 = 8.0;

/// Vertical distance from the marker center to the tooltip top edge
pub const TOOLTIP_OFFSET_Y: f32 = 14.0;

/// Safe margin of the arrow glyph from either tooltip edge
pub const TOOLTIP_ARROW_MARGIN: f32 = 14.0;

/// Maximum width of the tooltip text before wrapping
pub const TOOLTIP_MAX_CONTENT_WIDTH: f32 = 220.0;

/// Horizontal tooltip padding
pub const TOOLTIP_PADDING_X: f32 = 10.0;

/// Vertical tooltip padding
pub const TOOLTIP_PADDING_Y: f32 = 7.0;

/// Tooltip font size
pub const TOOLTIP_FONT_SIZE: f32 = 12.0;

/// Tooltip line height as a ratio of font size
pub const TOOLTIP_LINE_HEIGHT_FACTOR: f32 = 1.5;

// =============================================================================
// Markers & Highlight
// =============================================================================

/// Diameter of a marker badge (centered on the node's top-right corner)
pub const MARKER_SIZE: f32 = 22.0;

/// Padding between the hovered node and its highlight box
pub const HIGHLIGHT_PADDING: f32 = 2.0;

// =============================================================================
// Typography
// =============================================================================

/// Approximate character width as a ratio of font size
/// Used for text measurement approximation
pub const CHAR_WIDTH_FACTOR: f32 = 0.6;
