//! Viewport module for pan/zoom transforms.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Default lower zoom bound.
pub const MIN_SCALE: f64 = 0.1;
/// Default upper zoom bound.
pub const MAX_SCALE: f64 = 5.0;

/// Viewport manages the view transform for the canvas.
///
/// Screen coordinates are page coordinates as delivered by pointer events;
/// `origin` is the on-screen top-left of the canvas element, so the
/// element-local position of a screen point is `screen - origin`. Canvas
/// coordinates are document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Pan offset in element pixels.
    pub offset: Vec2,
    /// Zoom factor (1.0 = 100%).
    pub scale: f64,
    /// On-screen top-left of the canvas element.
    pub origin: Point,
    /// Size of the canvas element in pixels.
    pub size: Size,
    /// Minimum allowed zoom level
    pub min_scale: f64,
    /// Maximum allowed zoom level
    pub max_scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            origin: Point::ZERO,
            size: Size::ZERO,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
        }
    }
}

impl Viewport {
    /// Create a new viewport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport with custom zoom limits.
    pub fn with_limits(min_scale: f64, max_scale: f64) -> Self {
        Self {
            min_scale,
            max_scale,
            ..Self::default()
        }
    }

    /// Canvas to element-local transform, used for rendering.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Element-local to canvas transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        self.inverse_transform() * (screen - self.origin.to_vec2())
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        self.transform() * canvas + self.origin.to_vec2()
    }

    /// Convert a screen-pixel length to canvas units.
    pub fn screen_to_canvas_len(&self, pixels: f64) -> f64 {
        pixels / self.scale
    }

    /// Zoom by `factor`, keeping the canvas point under `anchor` fixed.
    ///
    /// `anchor` is in element-local pixels. The scale is clamped before the
    /// offset is adjusted, so the adjustment uses the clamped ratio.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        let ratio = new_scale / self.scale;
        let anchor = anchor.to_vec2();
        self.offset = anchor - (anchor - self.offset) * ratio;
        self.scale = new_scale;
    }

    /// Zoom anchored at a screen point (e.g. the pointer position).
    pub fn zoom_at_screen(&mut self, screen: Point, factor: f64) {
        self.zoom_at(screen - self.origin.to_vec2(), factor);
    }

    /// Zoom anchored at the center of the canvas element.
    pub fn zoom_at_center(&mut self, factor: f64) {
        let center = Point::new(self.size.width / 2.0, self.size.height / 2.0);
        self.zoom_at(center, factor);
    }

    /// Reset to 100% with no pan.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.scale = 1.0;
    }

    /// Canvas-space rectangle currently visible in the element.
    pub fn visible_rect(&self) -> Rect {
        let inv = self.inverse_transform();
        let top_left = inv * Point::ZERO;
        let bottom_right = inv * Point::new(self.size.width, self.size.height);
        Rect::from_points(top_left, bottom_right)
    }

    /// Zoom readout, e.g. `"150%"`.
    pub fn zoom_label(&self) -> String {
        format!("{}%", (self.scale * 100.0).round())
    }
}
