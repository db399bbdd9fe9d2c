//! Recording painter.
//!
//! [`DisplayList`] stores every painter call as a [`DrawCommand`]. Hosts
//! without a GPU backend replay the list onto their own 2D context, and
//! tests assert on the recorded commands.

use crate::renderer::{Painter, Shadow};
use kurbo::{Affine, BezPath, Point, Rect, Size, Stroke};
use peniko::Color;

/// One recorded painter call.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Clear(Size),
    Save,
    Restore,
    Transform(Affine),
    Fill {
        path: BezPath,
        color: Color,
    },
    Stroke {
        path: BezPath,
        stroke: Stroke,
        color: Color,
    },
    Shadow {
        rect: Rect,
        radius: f64,
        shadow: Shadow,
    },
    Text {
        text: String,
        origin: Point,
        font_size: f64,
        font_family: String,
        color: Color,
    },
}

/// A painter that records commands instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Issue every recorded command to another painter, in order.
    pub fn replay(&self, painter: &mut impl Painter) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(size) => painter.clear(*size),
                DrawCommand::Save => painter.save(),
                DrawCommand::Restore => painter.restore(),
                DrawCommand::Transform(affine) => painter.transform(*affine),
                DrawCommand::Fill { path, color } => painter.fill(path, *color),
                DrawCommand::Stroke { path, stroke, color } => painter.stroke(path, stroke, *color),
                DrawCommand::Shadow { rect, radius, shadow } => painter.fill_shadow(*rect, *radius, shadow),
                DrawCommand::Text {
                    text,
                    origin,
                    font_size,
                    font_family,
                    color,
                } => painter.fill_text(text, *origin, *font_size, font_family, *color),
            }
        }
    }

    /// Recorded fills, in order.
    pub fn fills(&self) -> impl Iterator<Item = (&BezPath, Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Fill { path, color } => Some((path, *color)),
            _ => None,
        })
    }

    /// Recorded strokes, in order.
    pub fn strokes(&self) -> impl Iterator<Item = (&BezPath, &Stroke, Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke { path, stroke, color } => Some((path, stroke, *color)),
            _ => None,
        })
    }

    /// Recorded text runs with their origins.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, origin, .. } => Some((text.as_str(), *origin)),
            _ => None,
        })
    }

    /// Number of recorded shadows.
    pub fn shadow_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Shadow { .. }))
            .count()
    }
}

impl Painter for DisplayList {
    fn clear(&mut self, size: Size) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(size));
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn transform(&mut self, affine: Affine) {
        self.commands.push(DrawCommand::Transform(affine));
    }

    fn fill(&mut self, path: &BezPath, color: Color) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            color,
        });
    }

    fn stroke(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            stroke: stroke.clone(),
            color,
        });
    }

    fn fill_shadow(&mut self, rect: Rect, radius: f64, shadow: &Shadow) {
        self.commands.push(DrawCommand::Shadow {
            rect,
            radius,
            shadow: *shadow,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, font_family: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            font_size,
            font_family: font_family.to_string(),
            color,
        });
    }
}
