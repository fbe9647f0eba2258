//! Axis-aligned rectangles and circle overlap tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in arena space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    /// Creates a rectangle from its corners.
    #[must_use]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Creates a rectangle from a top-left origin and a size.
    #[must_use]
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Width of the rectangle.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Whether the rectangle encloses no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    /// Bounding-circle test: the circle's extents must overlap the
    /// rectangle on both axes. Touching edges do not count.
    #[must_use]
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let within_x = center.x + radius > self.min.x && center.x - radius < self.max.x;
        let within_y = center.y + radius > self.min.y && center.y - radius < self.max.y;
        within_x && within_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit() -> Rect {
        Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0))
    }

    #[test]
    fn test_circle_inside() {
        assert!(unit().overlaps_circle(Vec2::new(5.0, 5.0), 1.0));
    }

    #[test]
    fn test_circle_touching_edge_misses() {
        assert!(!unit().overlaps_circle(Vec2::new(12.0, 5.0), 2.0));
        assert!(unit().overlaps_circle(Vec2::new(11.9, 5.0), 2.0));
    }

    #[test]
    fn test_circle_needs_both_axes() {
        assert!(!unit().overlaps_circle(Vec2::new(5.0, 20.0), 2.0));
    }

    #[test]
    fn test_empty_rect() {
        let rect = Rect::new(Vec2::new(5.0, 0.0), Vec2::new(4.0, 10.0));
        assert!(rect.is_empty());
        assert!(!rect.overlaps_circle(Vec2::new(4.5, 5.0), 0.1));
    }

    #[test]
    fn test_rect_center() {
        assert_eq!(unit().center(), Vec2::new(5.0, 5.0));
    }

    proptest! {
        #[test]
        fn prop_center_always_hits(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            w in 1.0f32..200.0,
            h in 1.0f32..200.0,
            r in 0.0f32..50.0,
        ) {
            let rect = Rect::from_origin_size(Vec2::new(x, y), Vec2::new(w, h));
            prop_assert!(rect.overlaps_circle(rect.center(), r));
        }
    }
}
