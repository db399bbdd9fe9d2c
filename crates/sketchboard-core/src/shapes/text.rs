//! Free text labels.

use crate::color::SerializableColor;
use crate::geometry::{self, TextMetrics};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A free-floating multi-line text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// Top-left corner of the first line.
    pub position: Point,
    /// Text content; `\n` separates lines.
    pub content: String,
    /// Font size in canvas units.
    pub font_size: f64,
    /// Text color.
    pub color: SerializableColor,
}

impl Text {
    pub const DEFAULT_FONT_SIZE: f64 = 18.0;
    /// Line height as a multiple of the font size.
    pub const LINE_HEIGHT: f64 = 1.2;
    /// Measured widths never go below this.
    pub const MIN_WIDTH: f64 = 20.0;

    pub fn new(position: Point, content: String, font_size: f64, color: SerializableColor) -> Self {
        Self {
            position,
            content,
            font_size,
            color,
        }
    }

    pub fn line_height(&self) -> f64 {
        self.font_size * Self::LINE_HEIGHT
    }

    /// Lines of text with their top-left origins.
    pub fn lines(&self) -> impl Iterator<Item = (Point, &str)> {
        let step = self.line_height();
        let origin = self.position;
        self.content
            .split('\n')
            .enumerate()
            .map(move |(i, line)| (Point::new(origin.x, origin.y + i as f64 * step), line))
    }

    /// Box of measured width and one line height, anchored at `position`.
    pub fn bounds(&self, metrics: &dyn TextMetrics) -> Rect {
        let width = geometry::measure_text(metrics, &self.content, self.font_size, Self::MIN_WIDTH);
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + width,
            self.position.y + self.line_height(),
        )
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
