mod common;

use common::*;
use kurbo::{Point, Rect, Vec2};
use sketchboard_core::geometry;
use sketchboard_core::shapes::{BoxShape, Shape, ShapeStyle};
use sketchboard_core::{
    BoardConfig, EditTarget, HandleKind, InputEvent, Key, KeyEvent, KeyFocus, Modifiers, MouseButton, ToolKind,
    Viewport,
};

const EPS: f64 = 1e-9;

fn assert_rect(shape: &Shape, x: f64, y: f64, w: f64, h: f64) {
    match shape {
        Shape::Rectangle(r) => {
            assert!((r.position.x - x).abs() < EPS, "x = {}", r.position.x);
            assert!((r.position.y - y).abs() < EPS, "y = {}", r.position.y);
            assert!((r.width - w).abs() < EPS, "w = {}", r.width);
            assert!((r.height - h).abs() < EPS, "h = {}", r.height);
        }
        other => panic!("Expected Rectangle, got {other:?}"),
    }
}

#[test]
fn viewport_roundtrips_for_many_states() {
    let origins = [Point::ZERO, Point::new(37.0, 112.5)];
    let offsets = [Vec2::ZERO, Vec2::new(-250.0, 80.0), Vec2::new(1e4, -3e3)];
    let scales = [0.1, 0.37, 1.0, 2.5, 5.0];
    let points = [Point::ZERO, Point::new(123.4, -56.7), Point::new(-999.0, 4321.0)];
    for origin in origins {
        for offset in offsets {
            for scale in scales {
                let viewport = Viewport {
                    origin,
                    offset,
                    scale,
                    ..Viewport::default()
                };
                for p in points {
                    let back = viewport.canvas_to_screen(viewport.screen_to_canvas(p));
                    assert!((back - p).hypot() < 1e-6);
                    let back = viewport.screen_to_canvas(viewport.canvas_to_screen(p));
                    assert!((back - p).hypot() < 1e-6);
                }
            }
        }
    }
}

#[test]
fn zoom_is_always_clamped() {
    let mut board = board();
    for _ in 0..100 {
        board.handle_event(InputEvent::Wheel {
            position: Point::new(300.0, 200.0),
            delta_y: -1.0,
        });
        assert!(board.viewport().scale <= 5.0 + EPS);
    }
    assert!((board.viewport().scale - 5.0).abs() < EPS);

    for _ in 0..100 {
        board.zoom_out();
        assert!(board.viewport().scale >= 0.1 - EPS);
    }
    assert!((board.viewport().scale - 0.1).abs() < EPS);
    assert_eq!(board.zoom_label(), "10%");

    board.reset_zoom();
    board.zoom_in();
    assert_eq!(board.zoom_label(), "120%");
}

#[test]
fn zoom_preserves_anchor_canvas_position() {
    let mut board = board();
    board.set_origin(20.0, 40.0);
    let anchor = Point::new(420.0, 240.0);
    for delta_y in [-1.0, -1.0, 1.0, -1.0, 1.0, 1.0, 1.0] {
        let before = board.viewport().screen_to_canvas(anchor);
        board.handle_event(InputEvent::Wheel {
            position: anchor,
            delta_y,
        });
        let after = board.viewport().screen_to_canvas(anchor);
        assert!((before - after).hypot() < 1e-9);
    }

    // Button zoom anchors at the canvas center.
    let center = Point::new(20.0 + 400.0, 40.0 + 300.0);
    let before = board.viewport().screen_to_canvas(center);
    board.zoom_in();
    let after = board.viewport().screen_to_canvas(center);
    assert!((before - after).hypot() < 1e-9);
}

#[test]
fn simplify_never_grows_and_keeps_endpoints() {
    let inputs: Vec<Vec<Point>> = vec![
        (0..50).map(|i| Point::new(f64::from(i), f64::from(i % 3))).collect(),
        (0..50).map(|i| Point::new(f64::from(i).cos() * 40.0, f64::from(i).sin() * 40.0)).collect(),
        vec![Point::new(1.0, 1.0), Point::new(1.0, 1.0), Point::new(1.0, 1.0)],
    ];
    for points in inputs {
        let out = geometry::simplify(&points, 1.5);
        assert!(out.len() <= points.len());
        assert_eq!(out.first(), points.first());
        assert_eq!(out.last(), points.last());
    }
}

#[test]
fn history_keeps_last_fifty_states() {
    let mut board = board();
    for i in 0..60 {
        board.add_shape(Shape::Rectangle(BoxShape::new(
            Point::new(f64::from(i), 0.0),
            10.0,
            10.0,
            ShapeStyle::default(),
        )));
    }
    let history = board.history();
    assert_eq!(history.len(), 50);
    assert_eq!(history.cursor(), 49);
    assert_eq!(history.current(), board.shapes());
    // The oldest kept state has 11 shapes: states 0..=10 were dropped.
    assert_eq!(history.snapshots()[0].len(), 11);
}

#[test]
fn undo_then_redo_restores_state() {
    let mut board = board();
    for i in 0..5 {
        let x = f64::from(i) * 150.0;
        draw_rect(&mut board, (x, 10.0), (x + 100.0, 60.0));
    }
    for steps in 0..5 {
        for _ in 0..steps {
            key(&mut board, Key::Char('z'), ctrl());
        }
        let before = board.shapes().to_vec();
        key(&mut board, Key::Char('z'), ctrl());
        key(&mut board, Key::Char('Z'), ctrl_shift());
        assert_eq!(board.shapes(), before.as_slice());
        for _ in 0..steps {
            key(&mut board, Key::Char('y'), ctrl());
        }
    }
    assert_eq!(board.shapes().len(), 5);
}

#[test]
fn undo_and_redo_clear_selection() {
    let mut board = board();
    draw_rect(&mut board, (10.0, 10.0), (110.0, 60.0));
    assert_eq!(board.selection(), Some(0));
    assert!(board.undo());
    assert!(board.shapes().is_empty());
    assert_eq!(board.selection(), None);
    assert!(board.can_redo());
    assert!(board.redo());
    assert_eq!(board.selection(), None);
    assert!(!board.can_redo());
}

#[test]
fn resize_never_goes_below_floor() {
    let mut board = board();
    draw_rect(&mut board, (10.0, 10.0), (110.0, 60.0));
    // South-east handle collapsed onto the north-west corner.
    drag(&mut board, &[(110.0, 60.0), (60.0, 30.0), (11.0, 11.0)]);
    let bounds = board.shapes()[0].bounds(board.metrics());
    assert!((bounds.width() - 5.0).abs() < EPS);
    assert!((bounds.height() - 5.0).abs() < EPS);

    // Dragging a corner past the opposite edge flips the box.
    drag(&mut board, &[(10.0, 12.5), (200.0, 12.5)]);
    let bounds = board.shapes()[0].bounds(board.metrics());
    assert!(bounds.width() >= 5.0);
    assert!(bounds.height() >= 5.0);
    assert!((bounds.x0 - 15.0).abs() < EPS);
}

#[test]
fn resize_rescales_pen_strokes() {
    let mut board = board();
    pick(&mut board, ToolKind::Pen);
    drag(&mut board, &[(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)]);
    assert_eq!(board.selection(), Some(0));
    drag(&mut board, &[(100.0, 100.0), (200.0, 50.0)]);
    match &board.shapes()[0] {
        Shape::Pen(pen) => {
            assert_eq!(pen.points[0], Point::new(0.0, 0.0));
            assert_eq!(pen.points[1], Point::new(100.0, 50.0));
            assert_eq!(pen.points[2], Point::new(200.0, 0.0));
        }
        other => panic!("Expected Pen, got {other:?}"),
    }
}

#[test]
fn drawing_a_rectangle() {
    let mut board = board();
    draw_rect(&mut board, (10.0, 10.0), (110.0, 60.0));
    assert_eq!(board.shapes().len(), 1);
    assert_rect(&board.shapes()[0], 10.0, 10.0, 100.0, 50.0);
    assert_eq!(board.selection(), Some(0));
    assert_eq!(board.tool(), ToolKind::Select);
    assert!(board.can_undo());
}

#[test]
fn drawing_an_inverted_rectangle() {
    let mut board = board();
    draw_rect(&mut board, (50.0, 50.0), (30.0, 30.0));
    assert_rect(&board.shapes()[0], 30.0, 30.0, 20.0, 20.0);
}

#[test]
fn drawing_uses_the_viewport_mapping() {
    let mut board = board();
    board.set_origin(100.0, 50.0);
    board.zoom_in();
    board.reset_zoom();
    board.handle_event(InputEvent::Wheel {
        position: Point::new(100.0, 50.0),
        delta_y: -1.0,
    });
    // Scale is 1.1 anchored at the canvas top-left, so offset stays zero.
    draw_rect(&mut board, (111.0, 61.0), (221.0, 116.0));
    assert_rect(&board.shapes()[0], 10.0, 10.0, 100.0, 50.0);
}

#[test]
fn tiny_shapes_are_discarded() {
    let mut board = board();
    draw_rect(&mut board, (10.0, 10.0), (12.0, 12.0));
    pick(&mut board, ToolKind::Line);
    drag(&mut board, &[(0.0, 0.0), (1.0, 1.0)]);
    pick(&mut board, ToolKind::Pen);
    drag(&mut board, &[(0.0, 0.0)]);
    assert!(board.shapes().is_empty());
    assert!(!board.can_undo());
    // The tool is kept after a discard.
    assert_eq!(board.tool(), ToolKind::Pen);
}

#[test]
fn sticky_notes_cycle_the_palette() {
    let mut board = board();
    let palette = BoardConfig::default().sticky_palette;
    for (i, at) in [(200.0, 200.0), (400.0, 400.0)].into_iter().enumerate() {
        pick(&mut board, ToolKind::Sticky);
        down(&mut board, at.0, at.1);
        up(&mut board, at.0, at.1);
        assert_eq!(board.tool(), ToolKind::Select);
        assert_eq!(board.selection(), Some(i));
    }
    match (&board.shapes()[0], &board.shapes()[1]) {
        (Shape::Sticky(a), Shape::Sticky(b)) => {
            assert_eq!(a.bg_color, palette[0]);
            assert_eq!(b.bg_color, palette[1]);
            assert_eq!(a.position, Point::new(125.0, 150.0));
            assert_eq!(a.as_rect(), Rect::new(125.0, 150.0, 275.0, 250.0));
        }
        other => panic!("Expected two stickies, got {other:?}"),
    }
}

#[test]
fn collinear_pen_stroke_simplifies_to_endpoints() {
    let mut board = board();
    pick(&mut board, ToolKind::Pen);
    drag(&mut board, &[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]);
    match &board.shapes()[0] {
        Shape::Pen(pen) => assert_eq!(pen.points, vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]),
        other => panic!("Expected Pen, got {other:?}"),
    }
}

#[test]
fn deleting_the_selection_is_undoable() {
    let mut board = board();
    draw_rect(&mut board, (10.0, 10.0), (110.0, 60.0));
    draw_rect(&mut board, (200.0, 10.0), (300.0, 60.0));
    // Select the first rectangle.
    down(&mut board, 50.0, 30.0);
    up(&mut board, 50.0, 30.0);
    assert_eq!(board.selection(), Some(0));

    key(&mut board, Key::Delete, Modifiers::NONE);
    assert_eq!(board.shapes().len(), 1);
    assert_rect(&board.shapes()[0], 200.0, 10.0, 100.0, 50.0);
    assert_eq!(board.selection(), None);

    key(&mut board, Key::Char('z'), ctrl());
    assert_eq!(board.shapes().len(), 2);
    assert_rect(&board.shapes()[0], 10.0, 10.0, 100.0, 50.0);
}

#[test]
fn topmost_shape_wins_hit_test() {
    let mut board = board();
    draw_rect(&mut board, (0.0, 0.0), (100.0, 100.0));
    draw_rect(&mut board, (50.0, 50.0), (150.0, 150.0));
    board.set_tool(ToolKind::Select);
    down(&mut board, 75.0, 75.0);
    up(&mut board, 75.0, 75.0);
    assert_eq!(board.selection(), Some(1));
}

fn zoomed_board(config: BoardConfig) -> sketchboard_core::Whiteboard {
    init_logging();
    let mut board = sketchboard_core::Whiteboard::with_config(config).unwrap();
    board.resize(800.0, 600.0);
    board.add_shape(Shape::Rectangle(BoxShape::new(
        Point::new(100.0, 100.0),
        100.0,
        50.0,
        ShapeStyle::default(),
    )));
    board.set_tool(ToolKind::Select);
    down(&mut board, 150.0, 125.0);
    up(&mut board, 150.0, 125.0);
    assert_eq!(board.selection(), Some(0));
    board
}

#[test]
fn hit_tolerance_shrinks_when_zoomed_in() {
    let mut board = zoomed_board(BoardConfig::default());
    // At 1x the six pixel margin is six canvas units.
    assert_eq!(board.hit_test(Point::new(202.0, 125.0)), Some(0));
    assert_eq!(board.hit_test_handle(Point::new(202.0, 152.0)), Some(HandleKind::SouthEast));

    for _ in 0..20 {
        board.zoom_in();
    }
    assert!((board.viewport().scale - 5.0).abs() < EPS);
    assert_eq!(board.hit_test(Point::new(202.0, 125.0)), None);
    assert_eq!(board.hit_test(Point::new(201.0, 125.0)), Some(0));
    assert_eq!(board.hit_test_handle(Point::new(202.0, 152.0)), None);
    assert_eq!(board.hit_test_handle(Point::new(201.5, 151.5)), Some(HandleKind::SouthEast));
}

#[test]
fn hit_tolerance_grows_when_zoomed_out() {
    let config = BoardConfig {
        min_zoom: 0.5,
        ..BoardConfig::default()
    };
    let mut board = zoomed_board(config);
    assert_eq!(board.hit_test(Point::new(210.0, 125.0)), None);
    assert_eq!(board.hit_test_handle(Point::new(210.0, 160.0)), None);

    for _ in 0..20 {
        board.zoom_out();
    }
    assert!((board.viewport().scale - 0.5).abs() < EPS);
    assert_eq!(board.hit_test(Point::new(210.0, 125.0)), Some(0));
    assert_eq!(board.hit_test(Point::new(214.0, 125.0)), None);
    assert_eq!(board.hit_test_handle(Point::new(210.0, 160.0)), Some(HandleKind::SouthEast));
    assert_eq!(board.hit_test_handle(Point::new(220.0, 160.0)), None);
}

#[test]
fn escape_mid_drag_keeps_history_in_sync() {
    let mut board = board();
    draw_rect(&mut board, (10.0, 10.0), (110.0, 60.0));
    board.set_tool(ToolKind::Select);
    down(&mut board, 20.0, 20.0);
    move_to(&mut board, 30.0, 20.0);
    key(&mut board, Key::Escape, Modifiers::NONE);
    move_to(&mut board, 220.0, 20.0);
    up(&mut board, 220.0, 20.0);

    assert_eq!(board.history().current(), board.shapes());
    assert_rect(&board.shapes()[0], 20.0, 10.0, 100.0, 50.0);
    board.undo();
    assert_rect(&board.shapes()[0], 10.0, 10.0, 100.0, 50.0);
}

#[test]
fn clear_is_noop_when_empty() {
    let mut board = board();
    assert!(!board.clear());
    assert!(!board.can_undo());
    draw_rect(&mut board, (10.0, 10.0), (110.0, 60.0));
    assert!(board.clear());
    assert!(board.shapes().is_empty());
    assert_eq!(board.selection(), None);
    assert!(board.undo());
    assert_eq!(board.shapes().len(), 1);
}

#[test]
fn text_is_created_through_the_overlay() {
    let mut board = board();
    pick(&mut board, ToolKind::Text);
    down(&mut board, 100.0, 120.0);
    up(&mut board, 100.0, 120.0);
    let overlay = board.text_overlay().expect("overlay open");
    assert_eq!(overlay.target, EditTarget::NewText);
    assert!((overlay.font_size - 18.0).abs() < EPS);

    board.handle_event(InputEvent::TextChanged("  hello\nworld  ".into()));
    board.handle_event(InputEvent::KeyDown(KeyEvent::new(
        Key::Enter,
        Modifiers::NONE,
        KeyFocus::TextOverlay,
    )));
    assert!(board.text_overlay().is_none());
    assert_eq!(board.tool(), ToolKind::Select);
    match &board.shapes()[0] {
        Shape::Text(text) => {
            assert_eq!(text.content, "hello\nworld");
            assert_eq!(text.position, Point::new(100.0, 120.0));
            assert!((text.font_size - 18.0).abs() < EPS);
            assert_eq!(text.color, board.style().stroke_color);
        }
        other => panic!("Expected Text, got {other:?}"),
    }
}

#[test]
fn empty_or_cancelled_text_is_discarded() {
    let mut board = board();
    pick(&mut board, ToolKind::Text);
    down(&mut board, 10.0, 10.0);
    board.handle_event(InputEvent::TextChanged("   ".into()));
    board.handle_event(InputEvent::TextBlur);
    assert!(board.shapes().is_empty());
    assert_eq!(board.tool(), ToolKind::Select);

    pick(&mut board, ToolKind::Text);
    down(&mut board, 10.0, 10.0);
    board.handle_event(InputEvent::TextChanged("draft".into()));
    board.handle_event(InputEvent::KeyDown(KeyEvent::new(
        Key::Escape,
        Modifiers::NONE,
        KeyFocus::TextOverlay,
    )));
    assert!(board.shapes().is_empty());
    assert!(!board.is_editing_text());
    assert!(!board.can_undo());
}

#[test]
fn double_click_edits_sticky_in_place() {
    let mut board = board();
    board.set_panel_origin(0.0, 0.0);
    pick(&mut board, ToolKind::Sticky);
    down(&mut board, 200.0, 200.0);
    up(&mut board, 200.0, 200.0);
    let commits = board.history().len();

    board.handle_event(InputEvent::DoubleClick {
        position: Point::new(200.0, 200.0),
    });
    let overlay = board.text_overlay().expect("overlay open");
    assert_eq!(overlay.target, EditTarget::Existing(0));
    assert_eq!(overlay.width, Some(150.0));
    assert_eq!(overlay.position, Point::new(125.0, 150.0));
    assert!((overlay.font_size - 14.0).abs() < EPS);

    board.handle_event(InputEvent::TextChanged("remember the milk".into()));
    board.handle_event(InputEvent::TextBlur);
    assert_eq!(board.shapes().len(), 1);
    assert_eq!(board.shapes()[0].text(), Some("remember the milk"));
    assert_eq!(board.history().len(), commits + 1);
}

#[test]
fn double_click_ignores_other_shapes() {
    let mut board = board();
    draw_rect(&mut board, (10.0, 10.0), (110.0, 60.0));
    board.handle_event(InputEvent::DoubleClick {
        position: Point::new(50.0, 30.0),
    });
    assert!(!board.is_editing_text());
}

#[test]
fn pointer_leave_ends_a_gesture() {
    let mut board = board();
    pick(&mut board, ToolKind::Arrow);
    down(&mut board, 0.0, 0.0);
    move_to(&mut board, 80.0, 0.0);
    board.handle_event(InputEvent::PointerLeave);
    assert!(matches!(board.shapes()[0], Shape::Arrow(_)));
    assert_eq!(board.gesture().name(), "idle");
}

#[test]
fn single_touch_draws_like_a_mouse() {
    let mut board = board();
    pick(&mut board, ToolKind::Rectangle);
    let response = board.handle_event(InputEvent::TouchStart {
        touches: vec![Point::new(10.0, 10.0)],
    });
    assert!(response.prevent_default);
    board.handle_event(InputEvent::TouchMove {
        touches: vec![Point::new(60.0, 60.0)],
    });
    board.handle_event(InputEvent::TouchEnd);
    assert_rect(&board.shapes()[0], 10.0, 10.0, 50.0, 50.0);

    // Two-finger gestures are ignored.
    pick(&mut board, ToolKind::Rectangle);
    let response = board.handle_event(InputEvent::TouchStart {
        touches: vec![Point::ZERO, Point::new(5.0, 5.0)],
    });
    assert!(!response.prevent_default);
    assert_eq!(board.gesture().name(), "idle");
}

#[test]
fn middle_button_pan_survives_tool() {
    let mut board = board();
    pick(&mut board, ToolKind::Pen);
    board.handle_event(InputEvent::PointerDown {
        position: Point::new(100.0, 100.0),
        button: MouseButton::Middle,
    });
    move_to(&mut board, 140.0, 90.0);
    up(&mut board, 140.0, 90.0);
    assert_eq!(board.viewport().offset, Vec2::new(40.0, -10.0));
    assert!(board.shapes().is_empty());
    assert_eq!(board.tool(), ToolKind::Pen);
}

#[test]
fn expression_widget_keeps_its_keys() {
    let mut board = board();
    draw_rect(&mut board, (10.0, 10.0), (110.0, 60.0));
    board.handle_event(InputEvent::KeyDown(KeyEvent::new(
        Key::Backspace,
        Modifiers::NONE,
        KeyFocus::ExpressionWidget,
    )));
    board.handle_event(InputEvent::KeyDown(KeyEvent::new(
        Key::Escape,
        Modifiers::NONE,
        KeyFocus::ExpressionWidget,
    )));
    assert_eq!(board.shapes().len(), 1);
    assert_eq!(board.selection(), Some(0));
}
