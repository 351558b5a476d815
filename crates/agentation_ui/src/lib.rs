//! agentation_ui - geometry and overlay primitives for the Agentation overlay
//!
//! This crate knows nothing about annotations or host trees. It provides the
//! coordinate spaces, placement rules, frame coalescing and overlay scene types
//! that the annotation engine composes.

pub mod callback;
pub mod constants;
mod event;
mod geometry;
pub mod overlay;
pub mod placement;
pub mod projection;
mod scheduler;
mod text_metrics;

pub use callback::{Listeners, SubscriptionId};
pub use event::{Key, Modifiers};
pub use geometry::{
    PagePoint, PageRect, PageSpace, Point, Rect, ScrollOffset, Size, Viewport, ViewportPoint,
    ViewportRect, ViewportSpace,
};
pub use overlay::{MarkerOverlay, OverlayScene, PopupOverlay, TooltipOverlay};
pub use placement::{PlacementConfig, PopupPlacement, PopupSide, TooltipPlacement};
pub use scheduler::FrameScheduler;
pub use text_metrics::TextMetrics;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::geometry::{
        PagePoint, PageRect, Point, Rect, ScrollOffset, Size, Viewport, ViewportPoint,
        ViewportRect,
    };
    pub use crate::overlay::OverlayScene;
    pub use crate::placement::PlacementConfig;
    pub use crate::projection::{to_page_space, to_viewport_space};
    pub use crate::{FrameScheduler, Key, Modifiers};
}
