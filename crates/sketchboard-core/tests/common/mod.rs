//! Shared helpers for driving a `Whiteboard` with input events.

#![allow(dead_code)]

use kurbo::Point;
use sketchboard_core::{InputEvent, Key, KeyEvent, KeyFocus, Modifiers, MouseButton, ToolKind, Whiteboard};

/// Install the test logger once; `RUST_LOG=debug` shows engine logs.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn board() -> Whiteboard {
    init_logging();
    let mut board = Whiteboard::new();
    board.resize(800.0, 600.0);
    board
}

pub fn down(board: &mut Whiteboard, x: f64, y: f64) {
    board.handle_event(InputEvent::PointerDown {
        position: Point::new(x, y),
        button: MouseButton::Left,
    });
}

pub fn move_to(board: &mut Whiteboard, x: f64, y: f64) {
    board.handle_event(InputEvent::PointerMove {
        position: Point::new(x, y),
    });
}

pub fn up(board: &mut Whiteboard, x: f64, y: f64) {
    board.handle_event(InputEvent::PointerUp {
        position: Point::new(x, y),
    });
}

/// Press, move through `points`, and release at the last one.
pub fn drag(board: &mut Whiteboard, points: &[(f64, f64)]) {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };
    down(board, x0, y0);
    for &(x, y) in rest {
        move_to(board, x, y);
    }
    let (xn, yn) = rest.last().copied().unwrap_or((x0, y0));
    up(board, xn, yn);
}

/// Select a tool through its keyboard shortcut.
pub fn pick(board: &mut Whiteboard, tool: ToolKind) {
    key(board, Key::Char(tool.shortcut()), Modifiers::NONE);
}

pub fn key(board: &mut Whiteboard, key: Key, modifiers: Modifiers) {
    board.handle_event(InputEvent::KeyDown(KeyEvent::new(key, modifiers, KeyFocus::Board)));
}

pub fn ctrl() -> Modifiers {
    Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    }
}

pub fn ctrl_shift() -> Modifiers {
    Modifiers {
        ctrl: true,
        shift: true,
        ..Modifiers::NONE
    }
}

/// Draw a rectangle from one canvas point to another (identity viewport).
pub fn draw_rect(board: &mut Whiteboard, from: (f64, f64), to: (f64, f64)) {
    pick(board, ToolKind::Rectangle);
    drag(board, &[from, to]);
}
