//! Renderer trait abstraction.

use kurbo::{Affine, BezPath, Point, Rect, Size, Stroke, Vec2};
use peniko::Color;
use sketchboard_core::{ColorParseError, Whiteboard};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Style input is empty")]
    EmptyStyle,
    #[error("Invalid style color: {0}")]
    Style(#[from] ColorParseError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// A blurred drop shadow behind a filled shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub offset: Vec2,
    pub blur: f64,
    pub color: Color,
}

impl Shadow {
    /// Shadow under sticky notes: offset (2, 4), blur 10, 25% black.
    pub fn sticky() -> Self {
        Self {
            offset: Vec2::new(2.0, 4.0),
            blur: 10.0,
            color: Color::from_rgba8(0, 0, 0, 64),
        }
    }
}

/// Drawing backend.
///
/// Coordinates passed to the drawing calls are mapped through the current
/// transform, which `transform` concatenates onto and `save`/`restore`
/// bracket. Text is laid out with a top baseline at `origin`.
pub trait Painter {
    /// Start a new frame covering `size` element pixels.
    fn clear(&mut self, size: Size);

    fn save(&mut self);

    fn restore(&mut self);

    /// Concatenate `affine` onto the current transform.
    fn transform(&mut self, affine: Affine);

    fn fill(&mut self, path: &BezPath, color: Color);

    fn stroke(&mut self, path: &BezPath, stroke: &Stroke, color: Color);

    /// Blurred rounded-rectangle shadow for a body occupying `rect`.
    fn fill_shadow(&mut self, rect: Rect, radius: f64, shadow: &Shadow);

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, font_family: &str, color: Color);
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The board to render.
    pub board: &'a Whiteboard,
    /// Grid dot color as supplied by the host page's style, if any.
    pub grid_color: Option<&'a str>,
    /// Selection box and handle outline color.
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(board: &'a Whiteboard) -> Self {
        Self {
            board,
            grid_color: None,
            selection_color: Color::from_rgba8(0x4a, 0x9e, 0xff, 255),
        }
    }

    /// Set the grid color style input (a CSS color string).
    pub fn with_grid_color(mut self, css: &'a str) -> Self {
        self.grid_color = Some(css);
        self
    }

    /// Set the selection highlight color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }
}

/// Trait for rendering pipelines.
pub trait Renderer {
    /// Build the drawing commands for one frame.
    fn build_scene(&mut self, ctx: &RenderContext);
}
