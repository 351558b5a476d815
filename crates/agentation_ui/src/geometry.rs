use std::marker::PhantomData;

// ============================================================================
// Coordinate Space Markers
// ============================================================================

/// Marker type: coordinates relative to the currently visible window.
///
/// Used as a type parameter so viewport and page geometry cannot be mixed
/// without going through [`crate::projection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportSpace;

/// Marker type: coordinates relative to the full scrollable surface.
/// Stable under scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSpace;

// ============================================================================
// Points, Sizes, Rectangles
// ============================================================================

/// A 2D point in the coordinate space `S`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point<S = ViewportSpace> {
    pub x: f32,
    pub y: f32,
    space: PhantomData<S>,
}

/// A point in viewport space.
pub type ViewportPoint = Point<ViewportSpace>;
/// A point in page space.
pub type PagePoint = Point<PageSpace>;

impl<S> Point<S> {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            space: PhantomData,
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Move the point by a delta, staying in the same space.
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

/// A rectangle defined by position and size in the coordinate space `S`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect<S = ViewportSpace> {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    space: PhantomData<S>,
}

/// A rectangle in viewport space, as reported by a host geometry query.
pub type ViewportRect = Rect<ViewportSpace>;
/// A rectangle in page space.
pub type PageRect = Rect<PageSpace>;

impl<S> Rect<S> {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            space: PhantomData,
        }
    }

    /// Create a rectangle from an origin point and a size.
    pub fn from_origin(origin: Point<S>, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn position(&self) -> Point<S> {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get the center point of this rectangle.
    pub fn center(&self) -> Point<S> {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Get the top-right corner.
    pub fn top_right(&self) -> Point<S> {
        Point::new(self.right(), self.y)
    }

    pub fn contains(&self, point: Point<S>) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn expanded(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Move the rectangle by a delta, staying in the same space.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Compute the intersection of two rectangles.
    /// If there's no overlap, the result has zero width and/or height.
    pub fn intersect(&self, other: &Self) -> Self {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        Self::new(x1, y1, (x2 - x1).max(0.0), (y2 - y1).max(0.0))
    }
}

// ============================================================================
// Viewport
// ============================================================================

/// Current scroll offset of the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub x: f32,
    pub y: f32,
}

impl ScrollOffset {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The visible window onto the host surface: its scroll offset and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll: ScrollOffset,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(scroll: ScrollOffset, width: f32, height: f32) -> Self {
        Self {
            scroll,
            width,
            height,
        }
    }

    /// A viewport scrolled to the origin.
    pub fn unscrolled(width: f32, height: f32) -> Self {
        Self::new(ScrollOffset::default(), width, height)
    }

    /// The visible region expressed in page space.
    pub fn page_bounds(&self) -> PageRect {
        PageRect::new(self.scroll.x, self.scroll.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = ViewportRect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.top_right(), ViewportPoint::new(40.0, 20.0));
        assert_eq!(r.center(), ViewportPoint::new(25.0, 40.0));
    }

    #[test]
    fn test_rect_expanded() {
        let r = ViewportRect::new(10.0, 10.0, 20.0, 20.0).expanded(2.0);
        assert_eq!(r, ViewportRect::new(8.0, 8.0, 24.0, 24.0));
    }

    #[test]
    fn test_rect_intersect_disjoint() {
        let a = PageRect::new(0.0, 0.0, 10.0, 10.0);
        let b = PageRect::new(20.0, 20.0, 10.0, 10.0);
        let i = a.intersect(&b);
        assert_eq!(i.width, 0.0);
        assert_eq!(i.height, 0.0);
    }

    #[test]
    fn test_viewport_page_bounds() {
        let vp = Viewport::new(ScrollOffset::new(0.0, 300.0), 800.0, 600.0);
        assert_eq!(vp.page_bounds(), PageRect::new(0.0, 300.0, 800.0, 600.0));
    }
}
