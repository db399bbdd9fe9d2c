//! Straight segments (lines and arrows).

use super::ShapeStyle;
use crate::geometry;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A straight segment between two endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Style properties (fill is ignored).
    pub style: ShapeStyle,
}

impl Segment {
    /// Create a new segment.
    pub fn new(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self { start, end, style }
    }

    /// Distance between the endpoints.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Angle of the segment in radians (start → end).
    pub fn angle(&self) -> f64 {
        let d = self.end - self.start;
        d.y.atan2(d.x)
    }

    /// Min/max box of the two endpoints.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    /// Rescale both endpoints from `old` bounds to `new` bounds.
    pub fn remap(&mut self, old: Rect, new: Rect) {
        self.start = geometry::remap_point(self.start, old, new);
        self.end = geometry::remap_point(self.end, old, new);
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        geometry::point_near_segment(point, self.start, self.end, tolerance)
    }
}
