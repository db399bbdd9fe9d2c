//! Normalized input events for mouse, touch and keyboard.
//!
//! Hosts translate their native events into [`InputEvent`]s and feed them
//! to [`crate::Whiteboard::handle_event`]. All positions are screen (page)
//! coordinates.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Logical key identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Space,
    Delete,
    Backspace,
    Escape,
    Enter,
    Other(String),
}

impl Key {
    /// Map a DOM-style `key` string.
    pub fn from_name(name: &str) -> Self {
        match name {
            " " | "Space" => Key::Space,
            "Delete" => Key::Delete,
            "Backspace" => Key::Backspace,
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other(name.to_string()),
                }
            }
        }
    }
}

/// Where keyboard focus was when a key event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyFocus {
    /// The canvas, the page body, or the whiteboard panel.
    #[default]
    Board,
    /// The inline text-entry overlay.
    TextOverlay,
    /// Inside the separate expression-evaluator widget.
    ExpressionWidget,
    /// Any other element on the page.
    Elsewhere,
}

/// Keyboard event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub focus: KeyFocus,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers, focus: KeyFocus) -> Self {
        Self { key, modifiers, focus }
    }

    /// Unmodified key with board focus.
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE, KeyFocus::Board)
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown { position: Point, button: MouseButton },
    PointerMove { position: Point },
    PointerUp { position: Point },
    /// The pointer left the canvas; ends any gesture like pointer-up.
    PointerLeave,
    DoubleClick { position: Point },
    Wheel { position: Point, delta_y: f64 },
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd,
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    /// The text editor's contents changed.
    TextChanged(String),
    /// The text editor lost focus; commits the edit.
    TextBlur,
}

impl InputEvent {
    /// Rewrite single-touch events as primary-button pointer events.
    ///
    /// Returns None for multi-touch (or touchless) events, which are ignored.
    /// Non-touch events pass through unchanged.
    pub fn normalize_touch(self) -> Option<InputEvent> {
        match self {
            InputEvent::TouchStart { touches } => single_touch(&touches).map(|position| InputEvent::PointerDown {
                position,
                button: MouseButton::Left,
            }),
            InputEvent::TouchMove { touches } => {
                single_touch(&touches).map(|position| InputEvent::PointerMove { position })
            }
            InputEvent::TouchEnd => Some(InputEvent::PointerLeave),
            other => Some(other),
        }
    }

    pub fn is_touch(&self) -> bool {
        matches!(
            self,
            InputEvent::TouchStart { .. } | InputEvent::TouchMove { .. } | InputEvent::TouchEnd
        )
    }
}

fn single_touch(touches: &[Point]) -> Option<Point> {
    match touches {
        [only] => Some(*only),
        _ => None,
    }
}

/// What the host should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// The board must be redrawn.
    pub redraw: bool,
    /// The native event's default action must be suppressed.
    pub prevent_default: bool,
    /// New cursor to show, if it changed.
    pub cursor: Option<&'static str>,
}

impl EventResponse {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }

    pub fn with_prevent_default(mut self) -> Self {
        self.prevent_default = true;
        self
    }

    pub fn with_cursor(mut self, cursor: &'static str) -> Self {
        self.cursor = Some(cursor);
        self
    }
}

/// Key state carried between events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Space is held down (temporary pan mode).
    pub space_held: bool,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }
}
