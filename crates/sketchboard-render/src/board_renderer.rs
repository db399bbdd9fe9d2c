//! Turns a [`Whiteboard`] into painter calls.

use crate::renderer::{Painter, RenderContext, RenderResult, Renderer, RendererError, Shadow};
use kurbo::{BezPath, Cap, Circle, Ellipse, Join, Point, Rect, RoundedRect, Shape as KurboShape, Stroke, Vec2};
use peniko::Color;
use sketchboard_core::geometry::{self, TextMetrics};
use sketchboard_core::selection::get_handles;
use sketchboard_core::shapes::{BoxShape, Freehand, Segment, ShapeStyle, StickyNote, Text};
use sketchboard_core::{BoardConfig, SerializableColor, Shape, Viewport, Whiteboard};
use std::f64::consts::PI;

/// Minimum arrowhead length in canvas units.
pub const ARROW_HEAD_MIN_LENGTH: f64 = 12.0;
/// Half of the angle at the arrowhead tip.
pub const ARROW_HEAD_HALF_ANGLE: f64 = PI / 7.0;

/// Selection dash pattern in screen pixels.
const SELECTION_DASH: [f64; 2] = [6.0, 4.0];
const SELECTION_STROKE_WIDTH: f64 = 1.5;
const HANDLE_STROKE_WIDTH: f64 = 2.0;
/// Fold shading over the sticky's top-right corner.
const FOLD_SHADE: Color = Color::from_rgba8(0, 0, 0, 20);

const TOLERANCE: f64 = 0.1;

/// Frame pipeline drawing onto a [`Painter`].
///
/// Draw order: grid, every shape in document order, the in-progress shape,
/// then the selection box and handles.
#[derive(Debug, Default)]
pub struct BoardRenderer<P: Painter> {
    painter: P,
}

impl<P: Painter> BoardRenderer<P> {
    pub fn new(painter: P) -> Self {
        Self { painter }
    }

    pub fn painter(&self) -> &P {
        &self.painter
    }

    pub fn painter_mut(&mut self) -> &mut P {
        &mut self.painter
    }

    pub fn into_painter(self) -> P {
        self.painter
    }

    fn render_grid(&mut self, viewport: &Viewport, config: &BoardConfig, color: Color) {
        let spacing = config.grid_spacing;
        let visible = viewport.visible_rect();
        let start_x = (visible.x0 / spacing).floor() * spacing;
        let start_y = (visible.y0 / spacing).floor() * spacing;

        let mut path = BezPath::new();
        let mut x = start_x;
        while x <= visible.x1 {
            let mut y = start_y;
            while y <= visible.y1 {
                path.extend(Circle::new(Point::new(x, y), config.grid_dot_radius).path_elements(TOLERANCE));
                y += spacing;
            }
            x += spacing;
        }

        if !path.is_empty() {
            self.painter.fill(&path, color);
        }
    }

    fn render_shape(&mut self, shape: &Shape, config: &BoardConfig, metrics: &dyn TextMetrics) {
        match shape {
            Shape::Rectangle(b) => {
                let path = b.as_rect().to_path(TOLERANCE);
                self.fill_and_stroke(&path, &b.style);
            }
            Shape::Ellipse(b) => {
                let path = ellipse_path(b);
                self.fill_and_stroke(&path, &b.style);
            }
            Shape::Diamond(b) => {
                let path = diamond_path(b);
                self.fill_and_stroke(&path, &b.style);
            }
            Shape::Line(seg) => self.render_segment(seg, false),
            Shape::Arrow(seg) => self.render_segment(seg, true),
            Shape::Pen(stroke) => {
                if let Some(path) = pen_path(stroke) {
                    self.painter.stroke(&path, &shape_stroke(&stroke.style), stroke.style.stroke());
                }
            }
            Shape::Text(text) => self.render_text(text, config),
            Shape::Sticky(note) => self.render_sticky(note, config, metrics),
        }
    }

    fn fill_and_stroke(&mut self, path: &BezPath, style: &ShapeStyle) {
        if let Some(fill) = style.fill_color.filter(|c| !c.is_transparent()) {
            self.painter.fill(path, fill.into());
        }
        self.painter.stroke(path, &shape_stroke(style), style.stroke());
    }

    fn render_segment(&mut self, seg: &Segment, arrow: bool) {
        let mut path = BezPath::new();
        path.move_to(seg.start);
        path.line_to(seg.end);
        self.painter.stroke(&path, &shape_stroke(&seg.style), seg.style.stroke());
        if arrow {
            self.painter.fill(&arrow_head(seg), seg.style.stroke());
        }
    }

    fn render_text(&mut self, text: &Text, config: &BoardConfig) {
        let color: Color = text.color.into();
        for (origin, line) in text.lines() {
            if !line.is_empty() {
                self.painter
                    .fill_text(line, origin, text.font_size, &config.font_family, color);
            }
        }
    }

    fn render_sticky(&mut self, note: &StickyNote, config: &BoardConfig, metrics: &dyn TextMetrics) {
        let rect = note.as_rect();
        let radius = StickyNote::CORNER_RADIUS;
        self.painter.fill_shadow(rect, radius, &Shadow::sticky());
        let body = RoundedRect::from_rect(rect, radius).to_path(TOLERANCE);
        self.painter.fill(&body, note.bg_color.into());

        let (fold_shade, fold_flap) = fold_paths(rect);
        self.painter.fill(&fold_shade, FOLD_SHADE);
        self.painter.fill(&fold_flap, note.bg_color.darken(0.1).into());

        if note.text.is_empty() {
            return;
        }
        let lines = geometry::wrap_text(metrics, &note.text, StickyNote::FONT_SIZE, note.text_width());
        let color: Color = StickyNote::TEXT_COLOR.into();
        let origin = rect.origin() + Vec2::new(StickyNote::PADDING, StickyNote::PADDING);
        for (i, line) in lines.iter().enumerate() {
            let at = origin + Vec2::new(0.0, i as f64 * StickyNote::LINE_HEIGHT);
            self.painter
                .fill_text(line, at, StickyNote::FONT_SIZE, &config.font_family, color);
        }
    }

    fn render_selection(&mut self, bounds: Rect, viewport: &Viewport, config: &BoardConfig, color: Color) {
        let scale = viewport.scale;
        let dashes = SELECTION_DASH.map(|d| d / scale);
        let outline = Stroke::new(SELECTION_STROKE_WIDTH / scale).with_dashes(0.0, dashes);
        self.painter.stroke(&bounds.to_path(TOLERANCE), &outline, color);

        let half = config.handle_draw_size / scale;
        let handle_stroke = Stroke::new(HANDLE_STROKE_WIDTH / scale);
        for handle in get_handles(bounds) {
            let square = Rect::from_center_size(handle.position, (half * 2.0, half * 2.0)).to_path(TOLERANCE);
            self.painter.fill(&square, Color::WHITE);
            self.painter.stroke(&square, &handle_stroke, color);
        }
    }
}

impl<P: Painter> Renderer for BoardRenderer<P> {
    fn build_scene(&mut self, ctx: &RenderContext) {
        let board = ctx.board;
        let viewport = board.viewport();
        if viewport.size.width <= 0.0 || viewport.size.height <= 0.0 {
            log::trace!("Skipping frame for zero-sized canvas");
            return;
        }
        let config = board.config();
        let metrics = board.metrics();

        self.painter.clear(viewport.size);
        self.painter.save();
        self.painter.transform(viewport.transform());

        let grid_color = resolve_grid_color(ctx.grid_color, config.grid_color);
        self.render_grid(viewport, config, grid_color);

        for shape in board.shapes() {
            self.render_shape(shape, config, metrics);
        }
        if let Some(preview) = board.draft_preview() {
            self.render_shape(&preview, config, metrics);
        }
        if let Some(shape) = board.selected_shape() {
            self.render_selection(shape.bounds(metrics), viewport, config, ctx.selection_color);
        }

        self.painter.restore();
        log::trace!("Built frame with {} shapes", board.shapes().len());
    }
}

/// Parse the host's grid color style input.
pub fn parse_style_color(input: &str) -> RenderResult<SerializableColor> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(RendererError::EmptyStyle);
    }
    Ok(SerializableColor::parse(trimmed)?)
}

/// Grid color from the style input, or `fallback` when the input is
/// missing, empty or malformed.
pub fn resolve_grid_color(input: Option<&str>, fallback: SerializableColor) -> Color {
    match input.map(parse_style_color) {
        Some(Ok(color)) => color.into(),
        Some(Err(RendererError::EmptyStyle)) | None => fallback.into(),
        Some(Err(e)) => {
            log::warn!("Ignoring grid color style: {e}");
            fallback.into()
        }
    }
}

fn shape_stroke(style: &ShapeStyle) -> Stroke {
    let width = if style.stroke_width > 0.0 { style.stroke_width } else { 2.0 };
    Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round)
}

/// Ellipse inscribed in the box; zero radii fall back to 1.
pub fn ellipse_path(b: &BoxShape) -> BezPath {
    let radius = |extent: f64| {
        let r = extent.abs() / 2.0;
        if r > 0.0 { r } else { 1.0 }
    };
    Ellipse::new(b.center(), (radius(b.width), radius(b.height)), 0.0).to_path(TOLERANCE)
}

/// Diamond through the midpoints of the box's edges.
pub fn diamond_path(b: &BoxShape) -> BezPath {
    let rect = b.as_rect();
    let center = rect.center();
    let mut path = BezPath::new();
    path.move_to(Point::new(center.x, rect.y0));
    path.line_to(Point::new(rect.x1, center.y));
    path.line_to(Point::new(center.x, rect.y1));
    path.line_to(Point::new(rect.x0, center.y));
    path.close_path();
    path
}

/// Filled triangle at the segment's end, oriented along the segment.
pub fn arrow_head(seg: &Segment) -> BezPath {
    let angle = seg.angle();
    let length = ARROW_HEAD_MIN_LENGTH.max(seg.style.stroke_width * 4.0);
    let barb = |a: f64| seg.end - Vec2::from_angle(a) * length;

    let mut path = BezPath::new();
    path.move_to(seg.end);
    path.line_to(barb(angle - ARROW_HEAD_HALF_ANGLE));
    path.line_to(barb(angle + ARROW_HEAD_HALF_ANGLE));
    path.close_path();
    path
}

/// Smoothed freehand path.
///
/// Two points give a straight segment. Longer strokes run quadratic curves
/// through each interior point to the midpoint of the next pair, then a
/// straight segment to the last point. Returns None below two points.
pub fn pen_path(stroke: &Freehand) -> Option<BezPath> {
    let points = &stroke.points;
    let (&first, rest) = points.split_first()?;
    let &last = rest.last()?;

    let mut path = BezPath::new();
    path.move_to(first);
    if points.len() > 2 {
        for pair in points[1..].windows(2) {
            path.quad_to(pair[0], pair[0].midpoint(pair[1]));
        }
    }
    path.line_to(last);
    Some(path)
}

/// Fold decoration: the shaded corner triangle and the darker flap.
fn fold_paths(rect: Rect) -> (BezPath, BezPath) {
    let fold = StickyNote::FOLD_SIZE;
    let mut shade = BezPath::new();
    shade.move_to(Point::new(rect.x1 - fold, rect.y0));
    shade.line_to(Point::new(rect.x1, rect.y0));
    shade.line_to(Point::new(rect.x1, rect.y0 + fold));
    shade.close_path();

    let mut flap = BezPath::new();
    flap.move_to(Point::new(rect.x1 - fold, rect.y0));
    flap.line_to(Point::new(rect.x1 - fold, rect.y0 + fold));
    flap.line_to(Point::new(rect.x1, rect.y0 + fold));
    flap.close_path();
    (shade, flap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_list::{DisplayList, DrawCommand};
    use kurbo::PathEl;
    use sketchboard_core::{InputEvent, MouseButton, ToolKind};

    const EPS: f64 = 1e-9;

    fn board() -> Whiteboard {
        let mut board = Whiteboard::new();
        board.resize(100.0, 50.0);
        board
    }

    fn render(board: &Whiteboard) -> DisplayList {
        let mut renderer = BoardRenderer::new(DisplayList::new());
        renderer.build_scene(&RenderContext::new(board));
        renderer.into_painter()
    }

    fn dot_count(path: &BezPath) -> usize {
        path.elements().iter().filter(|el| matches!(el, PathEl::MoveTo(_))).count()
    }

    fn style() -> ShapeStyle {
        ShapeStyle::default()
    }

    #[test]
    fn test_zero_sized_canvas_draws_nothing() {
        let board = Whiteboard::new();
        assert!(render(&board).is_empty());
    }

    #[test]
    fn test_grid_covers_visible_rect() {
        let list = render(&board());
        let (grid, color) = list.fills().next().expect("grid fill");
        // x in 0..=100 step 25, y in 0..=50 step 25
        assert_eq!(dot_count(grid), 5 * 3);
        assert_eq!(color, Color::from(BoardConfig::default().grid_color));
    }

    #[test]
    fn test_grid_starts_on_aligned_floor() {
        let mut board = board();
        board.handle_event(InputEvent::PointerDown {
            position: Point::ZERO,
            button: MouseButton::Middle,
        });
        board.handle_event(InputEvent::PointerMove {
            position: Point::new(10.0, 0.0),
        });
        board.handle_event(InputEvent::PointerUp {
            position: Point::new(10.0, 0.0),
        });
        let list = render(&board);
        let (grid, _) = list.fills().next().expect("grid fill");
        let first = grid.elements().iter().find_map(|el| match el {
            PathEl::MoveTo(p) => Some(*p),
            _ => None,
        });
        // Visible x starts at -10, so the first column is at -25 (dot edge at -24).
        let first = first.expect("dot");
        assert!((first.x - (-24.0)).abs() < EPS);
    }

    #[test]
    fn test_grid_color_style_input() {
        let board = board();
        let mut renderer = BoardRenderer::new(DisplayList::new());
        renderer.build_scene(&RenderContext::new(&board).with_grid_color(" #ff0000 "));
        let (_, color) = renderer.painter().fills().next().expect("grid fill");
        assert_eq!(color, Color::from_rgba8(255, 0, 0, 255));
    }

    #[test]
    fn test_grid_color_falls_back() {
        let fallback = BoardConfig::default().grid_color;
        assert_eq!(resolve_grid_color(Some("   "), fallback), Color::from(fallback));
        assert_eq!(resolve_grid_color(Some("not-a-color"), fallback), Color::from(fallback));
        assert_eq!(resolve_grid_color(None, fallback), Color::from(fallback));
        assert!(matches!(parse_style_color(""), Err(RendererError::EmptyStyle)));
        assert!(matches!(parse_style_color("#zz"), Err(RendererError::Style(_))));
    }

    #[test]
    fn test_frame_is_bracketed_by_viewport_transform() {
        let board = board();
        let list = render(&board);
        let commands = list.commands();
        assert!(matches!(commands[0], DrawCommand::Clear(_)));
        assert!(matches!(commands[1], DrawCommand::Save));
        assert!(matches!(commands[2], DrawCommand::Transform(_)));
        assert!(matches!(commands.last(), Some(DrawCommand::Restore)));
    }

    #[test]
    fn test_fill_skipped_without_color() {
        let mut board = board();
        board.add_shape(Shape::Rectangle(BoxShape::new(Point::new(5.0, 5.0), 20.0, 10.0, style())));
        let list = render(&board);
        // Grid only; the rectangle is stroked.
        assert_eq!(list.fills().count(), 1);
        assert_eq!(list.strokes().count(), 1);
    }

    #[test]
    fn test_filled_shape_fills_before_stroke() {
        let mut board = board();
        let filled = ShapeStyle {
            fill_color: Some(SerializableColor::rgb(1, 2, 3)),
            ..style()
        };
        board.add_shape(Shape::Ellipse(BoxShape::new(Point::new(5.0, 5.0), 20.0, 10.0, filled)));
        let list = render(&board);
        let fill_at = list
            .commands()
            .iter()
            .position(|c| matches!(c, DrawCommand::Fill { color, .. } if *color == Color::from_rgba8(1, 2, 3, 255)))
            .expect("shape fill");
        let stroke_at = list
            .commands()
            .iter()
            .position(|c| matches!(c, DrawCommand::Stroke { .. }))
            .expect("shape stroke");
        assert!(fill_at < stroke_at);
    }

    #[test]
    fn test_shape_strokes_use_round_caps() {
        let mut board = board();
        board.add_shape(Shape::Line(Segment::new(Point::ZERO, Point::new(30.0, 0.0), style())));
        let list = render(&board);
        let (_, stroke, _) = list.strokes().next().expect("line stroke");
        assert_eq!(stroke.start_cap, Cap::Round);
        assert_eq!(stroke.join, Join::Round);
        assert!((stroke.width - 2.0).abs() < EPS);
    }

    #[test]
    fn test_ellipse_radius_falls_back_to_one() {
        let flat = BoxShape::new(Point::new(10.0, 10.0), 40.0, 0.0, style());
        let bbox = ellipse_path(&flat).bounding_box();
        assert!((bbox.height() - 2.0).abs() < 1e-6);
        assert!((bbox.width() - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_diamond_vertices() {
        let b = BoxShape::new(Point::new(0.0, 0.0), 40.0, 20.0, style());
        let path = diamond_path(&b);
        let els = path.elements();
        assert_eq!(els[0], PathEl::MoveTo(Point::new(20.0, 0.0)));
        assert_eq!(els[1], PathEl::LineTo(Point::new(40.0, 10.0)));
        assert_eq!(els[2], PathEl::LineTo(Point::new(20.0, 20.0)));
        assert_eq!(els[3], PathEl::LineTo(Point::new(0.0, 10.0)));
    }

    #[test]
    fn test_arrow_head_geometry() {
        let seg = Segment::new(Point::ZERO, Point::new(100.0, 0.0), style());
        let head = arrow_head(&seg);
        let PathEl::LineTo(barb) = head.elements()[1] else {
            panic!("expected barb");
        };
        // Minimum length 12 at a half-angle of pi/7 behind the tip.
        let back = seg.end - barb;
        assert!((back.hypot() - 12.0).abs() < 1e-6);
        assert!((back.y.abs() - 12.0 * (PI / 7.0).sin()).abs() < 1e-6);

        let thick = Segment::new(
            Point::ZERO,
            Point::new(0.0, 100.0),
            ShapeStyle {
                stroke_width: 5.0,
                ..style()
            },
        );
        let PathEl::LineTo(barb) = arrow_head(&thick).elements()[1] else {
            panic!("expected barb");
        };
        assert!(((thick.end - barb).hypot() - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_arrow_draws_head_in_stroke_color() {
        let mut board = board();
        let red = ShapeStyle {
            stroke_color: SerializableColor::rgb(255, 0, 0),
            ..style()
        };
        board.add_shape(Shape::Arrow(Segment::new(Point::ZERO, Point::new(50.0, 0.0), red)));
        let list = render(&board);
        let fills: Vec<_> = list.fills().collect();
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[1].1, Color::from_rgba8(255, 0, 0, 255));
    }

    #[test]
    fn test_pen_path_smoothing() {
        let two = Freehand::from_points(vec![Point::ZERO, Point::new(10.0, 0.0)], style());
        let path = pen_path(&two).expect("two points");
        assert_eq!(path.elements().len(), 2);
        assert!(matches!(path.elements()[1], PathEl::LineTo(_)));

        let points = vec![
            Point::ZERO,
            Point::new(10.0, 10.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 10.0),
        ];
        let path = pen_path(&Freehand::from_points(points, style())).expect("four points");
        let els = path.elements();
        assert_eq!(els.len(), 4);
        assert_eq!(els[1], PathEl::QuadTo(Point::new(10.0, 10.0), Point::new(15.0, 5.0)));
        assert_eq!(els[2], PathEl::QuadTo(Point::new(20.0, 0.0), Point::new(25.0, 5.0)));
        assert_eq!(els[3], PathEl::LineTo(Point::new(30.0, 10.0)));

        assert!(pen_path(&Freehand::start(Point::ZERO, style())).is_none());
    }

    #[test]
    fn test_text_lines_at_line_height() {
        let mut board = board();
        board.add_shape(Shape::Text(Text::new(
            Point::new(10.0, 20.0),
            "one\n\nthree".to_string(),
            10.0,
            SerializableColor::white(),
        )));
        let list = render(&board);
        let texts: Vec<_> = list.texts().collect();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0], ("one", Point::new(10.0, 20.0)));
        assert_eq!(texts[1].0, "three");
        assert!((texts[1].1.y - 44.0).abs() < EPS);
    }

    #[test]
    fn test_sticky_decorations() {
        let mut board = board();
        let mut note = StickyNote::centered_at(
            Point::new(75.0, 50.0),
            150.0,
            100.0,
            SerializableColor::rgb(0xfe, 0xf0, 0x8a),
        );
        note.text = "hello world".to_string();
        board.add_shape(Shape::Sticky(note));
        let list = render(&board);

        assert_eq!(list.shadow_count(), 1);
        let fills: Vec<_> = list.fills().collect();
        // grid, body, fold shade, fold flap
        assert_eq!(fills.len(), 4);
        assert_eq!(fills[1].1, Color::from_rgba8(0xfe, 0xf0, 0x8a, 255));
        assert_eq!(fills[2].1, FOLD_SHADE);
        let darker = SerializableColor::rgb(0xfe, 0xf0, 0x8a).darken(0.1);
        assert_eq!(fills[3].1, Color::from(darker));

        let texts: Vec<_> = list.texts().collect();
        assert_eq!(texts, vec![("hello world ", Point::new(8.0, 8.0))]);
    }

    #[test]
    fn test_sticky_text_wraps_to_inner_width() {
        let mut board = board();
        let mut note = StickyNote::centered_at(Point::new(75.0, 50.0), 150.0, 100.0, SerializableColor::white());
        // 14px * 0.6 per char: inner width 134 fits 15 characters per line.
        note.text = "aaaaaa bbbbbb cccccc".to_string();
        board.add_shape(Shape::Sticky(note));
        let list = render(&board);
        let texts: Vec<_> = list.texts().collect();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].0, "aaaaaa bbbbbb ");
        assert_eq!(texts[1].0, "cccccc ");
        assert!((texts[1].1.y - (8.0 + 18.0)).abs() < EPS);
    }

    #[test]
    fn test_draft_preview_rendered() {
        let mut board = board();
        board.set_tool(ToolKind::Rectangle);
        board.handle_event(InputEvent::PointerDown {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        board.handle_event(InputEvent::PointerMove {
            position: Point::new(40.0, 30.0),
        });
        assert!(board.shapes().is_empty());
        let list = render(&board);
        let (path, _, _) = list.strokes().next().expect("preview stroke");
        let bbox = path.bounding_box();
        assert!((bbox.width() - 30.0).abs() < EPS);
        assert!((bbox.height() - 20.0).abs() < EPS);
    }

    #[test]
    fn test_selection_scaled_by_zoom() {
        let mut board = board();
        board.set_tool(ToolKind::Rectangle);
        board.handle_event(InputEvent::PointerDown {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        board.handle_event(InputEvent::PointerMove {
            position: Point::new(40.0, 30.0),
        });
        board.handle_event(InputEvent::PointerUp {
            position: Point::new(40.0, 30.0),
        });
        assert!(board.selection().is_some());
        board.zoom_in();
        board.zoom_in();
        let scale = board.viewport().scale;

        let list = render(&board);
        let strokes: Vec<_> = list.strokes().collect();
        // shape, dashed box, eight handle outlines
        assert_eq!(strokes.len(), 1 + 1 + 8);
        let (_, dashed, color) = strokes[1];
        assert_eq!(color, Color::from_rgba8(0x4a, 0x9e, 0xff, 255));
        assert!((dashed.width - 1.5 / scale).abs() < EPS);
        assert_eq!(dashed.dash_pattern.len(), 2);
        assert!((dashed.dash_pattern[0] - 6.0 / scale).abs() < EPS);

        let (handle, outline, _) = strokes[2];
        assert!((outline.width - 2.0 / scale).abs() < EPS);
        assert!((handle.bounding_box().width() - 10.0 / scale).abs() < 1e-6);
        let white_squares = list.fills().filter(|(_, c)| *c == Color::WHITE).count();
        assert_eq!(white_squares, 8);
    }

    #[test]
    fn test_frame_transform_matches_viewport() {
        let mut board = board();
        board.zoom_in();
        let list = render(&board);
        let DrawCommand::Transform(affine) = list.commands()[2] else {
            panic!("expected transform");
        };
        let mapped = affine * Point::new(10.0, 10.0);
        let expected = board.viewport().canvas_to_screen(Point::new(10.0, 10.0));
        assert!((mapped - expected).hypot() < EPS);
    }
}
