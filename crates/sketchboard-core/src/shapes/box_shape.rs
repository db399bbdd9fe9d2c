//! Box-shaped geometry shared by rectangles, ellipses and diamonds.

use super::ShapeStyle;
use crate::geometry;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A shape described by its top-left corner and extent.
///
/// While a box is being drawn the extent may be negative (the anchor stays
/// fixed and the opposite corner follows the pointer); committed boxes are
/// always normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    /// Top-left corner position.
    pub position: Point,
    /// Width of the box.
    pub width: f64,
    /// Height of the box.
    pub height: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl BoxShape {
    /// Create a new box.
    pub fn new(position: Point, width: f64, height: f64, style: ShapeStyle) -> Self {
        Self {
            position,
            width,
            height,
            style,
        }
    }

    /// Get the box as a kurbo Rect (unnormalized while drawing).
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Center of the box.
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    /// Flip a negative extent so the box has a non-negative width and height.
    pub fn normalize(&mut self) {
        let (x, y, w, h) =
            geometry::normalize_box(self.position.x, self.position.y, self.width, self.height);
        self.position = Point::new(x, y);
        self.width = w;
        self.height = h;
    }

    /// Assign a new box directly.
    pub fn set_rect(&mut self, rect: Rect) {
        self.position = Point::new(rect.x0, rect.y0);
        self.width = rect.width();
        self.height = rect.height();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub fn hit_test_rect(&self, point: Point, tolerance: f64) -> bool {
        geometry::point_in_rect(point, self.as_rect(), tolerance)
    }

    pub fn hit_test_ellipse(&self, point: Point, tolerance: f64) -> bool {
        geometry::point_in_ellipse(
            point,
            self.center(),
            self.width / 2.0,
            self.height / 2.0,
            tolerance,
        )
    }

    pub fn hit_test_diamond(&self, point: Point, tolerance: f64) -> bool {
        geometry::point_in_diamond(point, self.as_rect(), tolerance)
    }
}
