//! Vello-based painter implementation.

use crate::renderer::{Painter, RenderResult, RendererError, Shadow};
use kurbo::{Affine, BezPath, Point, Rect, Size, Stroke};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, Layout, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use sketchboard_core::TextMetrics;
use std::cell::RefCell;
use std::sync::Arc;
use vello::Scene;

/// Build a single-paragraph layout with a top baseline.
fn build_layout<B: parley::Brush>(
    font_cx: &mut FontContext,
    layout_cx: &mut LayoutContext<B>,
    text: &str,
    font_size: f64,
    font_family: &str,
    brush: B,
) -> Layout<B> {
    let mut builder = layout_cx.ranged_builder(font_cx, text, 1.0, false);
    builder.push_default(StyleProperty::FontSize(font_size as f32));
    builder.push_default(StyleProperty::Brush(brush));
    builder.push_default(StyleProperty::FontStack(parley::FontStack::Source(font_family.into())));
    let mut layout = builder.build(text);
    layout.break_all_lines(None);
    layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());
    layout
}

/// Painter that encodes into a Vello [`Scene`].
pub struct VelloPainter {
    scene: Scene,
    transform: Affine,
    saved: Vec<Affine>,
    font_cx: FontContext,
    layout_cx: LayoutContext<Brush>,
}

impl Default for VelloPainter {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloPainter {
    /// Create a painter using the system font collection.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            transform: Affine::IDENTITY,
            saved: Vec::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
        }
    }

    /// Register an additional font file (TTF/OTF bytes).
    pub fn register_font(&mut self, data: Vec<u8>) -> RenderResult<()> {
        let families = self
            .font_cx
            .collection
            .register_fonts(peniko::Blob::new(Arc::new(data)), None);
        if families.is_empty() {
            return Err(RendererError::InitFailed("font data contains no font families".into()));
        }
        log::debug!("Registered {} font families", families.len());
        Ok(())
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl Painter for VelloPainter {
    fn clear(&mut self, _size: Size) {
        self.scene.reset();
        self.transform = Affine::IDENTITY;
        self.saved.clear();
    }

    fn save(&mut self) {
        self.saved.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.saved.pop() {
            self.transform = transform;
        }
    }

    fn transform(&mut self, affine: Affine) {
        self.transform = self.transform * affine;
    }

    fn fill(&mut self, path: &BezPath, color: Color) {
        self.scene.fill(Fill::NonZero, self.transform, color, None, path);
    }

    fn stroke(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        self.scene.stroke(stroke, self.transform, color, None, path);
    }

    fn fill_shadow(&mut self, rect: Rect, radius: f64, shadow: &Shadow) {
        // Canvas shadow blur is twice the Gaussian standard deviation.
        self.scene.draw_blurred_rounded_rect(
            self.transform,
            rect + shadow.offset,
            shadow.color,
            radius,
            shadow.blur / 2.0,
        );
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, font_family: &str, color: Color) {
        let brush = Brush::Solid(color);
        let layout = build_layout(
            &mut self.font_cx,
            &mut self.layout_cx,
            text,
            font_size,
            font_family,
            brush.clone(),
        );
        let text_transform = self.transform * Affine::translate(origin.to_vec2());

        // Adapted from Parley's vello example
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));
                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        vello::Glyph { id: glyph.id, x: gx, y: gy }
                    })
                    .collect();
                if glyphs.is_empty() {
                    continue;
                }
                self.scene
                    .draw_glyphs(run.font())
                    .brush(&brush)
                    .hint(true)
                    .transform(text_transform)
                    .glyph_transform(glyph_xform)
                    .font_size(run.font_size())
                    .normalized_coords(run.normalized_coords())
                    .draw(Fill::NonZero, glyphs.into_iter());
            }
        }
    }
}

/// Text measurement backed by Parley layout, so hit testing and sticky
/// wrapping agree with what [`VelloPainter`] draws.
pub struct ParleyTextMetrics {
    font_family: String,
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<LayoutContext<()>>,
}

impl ParleyTextMetrics {
    pub fn new(font_family: impl Into<String>) -> Self {
        Self {
            font_family: font_family.into(),
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(LayoutContext::new()),
        }
    }
}

impl TextMetrics for ParleyTextMetrics {
    fn line_width(&self, text: &str, font_size: f64) -> f64 {
        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();
        let layout = build_layout(&mut font_cx, &mut layout_cx, text, font_size, &self.font_family, ());
        layout.width() as f64
    }
}
