//! Conversion between viewport space and page space.
//!
//! Host geometry queries report viewport-relative rectangles. Markers and the
//! edit popup live in page space so they stay attached to content while the
//! surface scrolls; the highlight box stays in viewport space.

use crate::geometry::{PagePoint, PageRect, ScrollOffset, ViewportPoint, ViewportRect};

/// Project a viewport-relative rectangle into page space.
pub fn to_page_space(rect: ViewportRect, scroll: ScrollOffset) -> PageRect {
    PageRect::new(rect.x + scroll.x, rect.y + scroll.y, rect.width, rect.height)
}

/// Project a page-space rectangle back into viewport space.
pub fn to_viewport_space(rect: PageRect, scroll: ScrollOffset) -> ViewportRect {
    ViewportRect::new(rect.x - scroll.x, rect.y - scroll.y, rect.width, rect.height)
}

/// Project a viewport-relative point into page space.
pub fn point_to_page_space(point: ViewportPoint, scroll: ScrollOffset) -> PagePoint {
    PagePoint::new(point.x + scroll.x, point.y + scroll.y)
}

/// Project a page-space point back into viewport space.
pub fn point_to_viewport_space(point: PagePoint, scroll: ScrollOffset) -> ViewportPoint {
    ViewportPoint::new(point.x - scroll.x, point.y - scroll.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_page_space_adds_scroll() {
        let rect = ViewportRect::new(100.0, 50.0, 200.0, 40.0);
        let page = to_page_space(rect, ScrollOffset::new(0.0, 1200.0));
        assert_eq!(page, PageRect::new(100.0, 1250.0, 200.0, 40.0));
    }

    #[test]
    fn test_page_position_stable_under_scroll() {
        // The same content scrolled by 300px reports a viewport rect 300px higher
        let before = to_page_space(
            ViewportRect::new(10.0, 400.0, 50.0, 50.0),
            ScrollOffset::new(0.0, 0.0),
        );
        let after = to_page_space(
            ViewportRect::new(10.0, 100.0, 50.0, 50.0),
            ScrollOffset::new(0.0, 300.0),
        );
        assert_eq!(before, after);
    }

    #[test]
    fn test_viewport_space_inverts_page_space() {
        let scroll = ScrollOffset::new(35.0, 720.0);
        let rect = ViewportRect::new(12.0, 8.0, 100.0, 30.0);
        assert_eq!(to_viewport_space(to_page_space(rect, scroll), scroll), rect);

        let point = ViewportPoint::new(3.0, 4.0);
        assert_eq!(
            point_to_viewport_space(point_to_page_space(point, scroll), scroll),
            point
        );
    }
}
