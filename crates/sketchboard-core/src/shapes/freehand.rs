//! Freehand (pen) strokes.

use super::ShapeStyle;
use crate::geometry;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A freehand drawing (series of points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Freehand {
    /// Points in the freehand path.
    pub points: Vec<Point>,
    /// Style properties (fill is ignored).
    pub style: ShapeStyle,
}

impl Freehand {
    /// Start a stroke at a single point.
    pub fn start(point: Point, style: ShapeStyle) -> Self {
        Self {
            points: vec![point],
            style,
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, style: ShapeStyle) -> Self {
        Self { points, style }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Simplify the path with Ramer-Douglas-Peucker.
    pub fn simplify(&mut self, tolerance: f64) {
        if self.points.len() > 2 {
            self.points = geometry::simplify(&self.points, tolerance);
        }
    }

    pub fn bounds(&self) -> Rect {
        geometry::points_bounds(&self.points)
    }

    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    /// Rescale every point from `old` bounds to `new` bounds.
    pub fn remap(&mut self, old: Rect, new: Rect) {
        for point in &mut self.points {
            *point = geometry::remap_point(*point, old, new);
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        geometry::point_near_path(point, &self.points, tolerance)
    }
}
