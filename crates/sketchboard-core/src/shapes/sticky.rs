//! Sticky notes.

use super::ShapeStyle;
use crate::color::SerializableColor;
use crate::geometry;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A colored note with word-wrapped body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickyNote {
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Body text.
    pub text: String,
    /// Paper color.
    pub bg_color: SerializableColor,
    /// Stroke is transparent and zero-width for new notes; fill mirrors the
    /// paper color.
    pub style: ShapeStyle,
}

impl StickyNote {
    pub const DEFAULT_WIDTH: f64 = 150.0;
    pub const DEFAULT_HEIGHT: f64 = 100.0;
    pub const FONT_SIZE: f64 = 14.0;
    pub const LINE_HEIGHT: f64 = 18.0;
    pub const PADDING: f64 = 8.0;
    pub const CORNER_RADIUS: f64 = 4.0;
    pub const FOLD_SIZE: f64 = 20.0;
    pub const TEXT_COLOR: SerializableColor = SerializableColor::rgb(0x33, 0x33, 0x33);

    /// Create an empty note of the given size centered on `center`.
    pub fn centered_at(center: Point, width: f64, height: f64, bg_color: SerializableColor) -> Self {
        Self {
            position: Point::new(center.x - width / 2.0, center.y - height / 2.0),
            width,
            height,
            text: String::new(),
            bg_color,
            style: ShapeStyle {
                stroke_color: SerializableColor::transparent(),
                stroke_width: 0.0,
                fill_color: Some(bg_color),
            },
        }
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.position = Point::new(rect.x0, rect.y0);
        self.width = rect.width();
        self.height = rect.height();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        geometry::point_in_rect(point, self.as_rect(), tolerance)
    }

    /// Width available to body text.
    pub fn text_width(&self) -> f64 {
        self.width - 2.0 * Self::PADDING
    }
}
