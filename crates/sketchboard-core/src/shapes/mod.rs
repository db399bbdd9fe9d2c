//! Shape definitions for the whiteboard.

mod box_shape;
mod freehand;
mod line;
mod sticky;
mod text;

pub use box_shape::BoxShape;
pub use freehand::Freehand;
pub use line::Segment;
pub use sticky::StickyNote;
pub use text::Text;

use crate::color::SerializableColor;
use crate::geometry::{self, TextMetrics};
use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = transparent).
    pub fill_color: Option<SerializableColor>,
}

impl ShapeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(Into::into)
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::white(),
            stroke_width: 2.0,
            fill_color: None,
        }
    }
}

/// Discriminant of [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Ellipse,
    Diamond,
    Line,
    Arrow,
    Pen,
    Text,
    Sticky,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rect => "rect",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Line => "line",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Pen => "pen",
            ShapeKind::Text => "text",
            ShapeKind::Sticky => "sticky",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One drawable document element.
///
/// `Clone` is the deep copy used for history snapshots; every variant owns
/// its data (including freehand point buffers), so a clone never aliases
/// the live document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(BoxShape),
    Ellipse(BoxShape),
    Diamond(BoxShape),
    Line(Segment),
    Arrow(Segment),
    Pen(Freehand),
    Text(Text),
    Sticky(StickyNote),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rect,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Diamond(_) => ShapeKind::Diamond,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Arrow(_) => ShapeKind::Arrow,
            Shape::Pen(_) => ShapeKind::Pen,
            Shape::Text(_) => ShapeKind::Text,
            Shape::Sticky(_) => ShapeKind::Sticky,
        }
    }

    /// Axis-aligned bounding box in canvas coordinates.
    pub fn bounds(&self, metrics: &dyn TextMetrics) -> Rect {
        match self {
            Shape::Rectangle(s) | Shape::Ellipse(s) | Shape::Diamond(s) => s.as_rect(),
            Shape::Line(s) | Shape::Arrow(s) => s.bounds(),
            Shape::Pen(s) => s.bounds(),
            Shape::Text(s) => s.bounds(metrics),
            Shape::Sticky(s) => s.as_rect(),
        }
    }

    /// Check if a point (in canvas coordinates) hits this shape.
    pub fn hit_test(&self, point: Point, tolerance: f64, metrics: &dyn TextMetrics) -> bool {
        match self {
            Shape::Rectangle(s) => s.hit_test_rect(point, tolerance),
            Shape::Ellipse(s) => s.hit_test_ellipse(point, tolerance),
            Shape::Diamond(s) => s.hit_test_diamond(point, tolerance),
            Shape::Line(s) | Shape::Arrow(s) => s.hit_test(point, tolerance),
            Shape::Pen(s) => s.hit_test(point, tolerance),
            Shape::Text(s) => geometry::point_in_rect(point, s.bounds(metrics), tolerance),
            Shape::Sticky(s) => s.hit_test(point, tolerance),
        }
    }

    /// Move the shape by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Rectangle(s) | Shape::Ellipse(s) | Shape::Diamond(s) => s.translate(delta),
            Shape::Line(s) | Shape::Arrow(s) => s.translate(delta),
            Shape::Pen(s) => s.translate(delta),
            Shape::Text(s) => s.translate(delta),
            Shape::Sticky(s) => s.translate(delta),
        }
    }

    /// Fit the shape to `new` given its current bounding box `old`.
    ///
    /// Box kinds take the new box directly, segments and strokes are
    /// rescaled per axis, and text only moves to the new origin.
    pub fn apply_bounds(&mut self, new: Rect, old: Rect) {
        match self {
            Shape::Rectangle(s) | Shape::Ellipse(s) | Shape::Diamond(s) => s.set_rect(new),
            Shape::Line(s) | Shape::Arrow(s) => s.remap(old, new),
            Shape::Pen(s) => s.remap(old, new),
            Shape::Text(s) => s.position = Point::new(new.x0, new.y0),
            Shape::Sticky(s) => s.set_rect(new),
        }
    }

    /// Style for stroked kinds; text carries only a color.
    pub fn style(&self) -> Option<&ShapeStyle> {
        match self {
            Shape::Rectangle(s) | Shape::Ellipse(s) | Shape::Diamond(s) => Some(&s.style),
            Shape::Line(s) | Shape::Arrow(s) => Some(&s.style),
            Shape::Pen(s) => Some(&s.style),
            Shape::Sticky(s) => Some(&s.style),
            Shape::Text(_) => None,
        }
    }

    pub fn style_mut(&mut self) -> Option<&mut ShapeStyle> {
        match self {
            Shape::Rectangle(s) | Shape::Ellipse(s) | Shape::Diamond(s) => Some(&mut s.style),
            Shape::Line(s) | Shape::Arrow(s) => Some(&mut s.style),
            Shape::Pen(s) => Some(&mut s.style),
            Shape::Sticky(s) => Some(&mut s.style),
            Shape::Text(_) => None,
        }
    }

    /// Whether the shape has a fill that style controls may change.
    pub fn is_fillable(&self) -> bool {
        matches!(
            self,
            Shape::Rectangle(_) | Shape::Ellipse(_) | Shape::Diamond(_) | Shape::Sticky(_)
        )
    }

    /// Set the stroke color (the text color for text labels).
    pub fn set_stroke_color(&mut self, color: SerializableColor) {
        match self {
            Shape::Text(t) => t.color = color,
            _ => {
                if let Some(style) = self.style_mut() {
                    style.stroke_color = color;
                }
            }
        }
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        if let Some(style) = self.style_mut() {
            style.stroke_width = width;
        }
    }

    /// Set the fill of a fillable shape; other kinds are left unchanged.
    pub fn set_fill(&mut self, fill: Option<SerializableColor>) {
        if !self.is_fillable() {
            return;
        }
        if let Some(style) = self.style_mut() {
            style.fill_color = fill;
        }
    }

    /// Editable text of text labels and sticky notes.
    pub fn text(&self) -> Option<&str> {
        match self {
            Shape::Text(t) => Some(&t.content),
            Shape::Sticky(s) => Some(&s.text),
            _ => None,
        }
    }

    /// Replace the text of a text label or sticky note. Returns false for
    /// kinds without text.
    pub fn set_text(&mut self, text: String) -> bool {
        match self {
            Shape::Text(t) => t.content = text,
            Shape::Sticky(s) => s.text = text,
            _ => return false,
        }
        true
    }

    /// Check whether this shape can be opened in the text editor.
    pub fn is_text_editable(&self) -> bool {
        matches!(self, Shape::Text(_) | Shape::Sticky(_))
    }
}
