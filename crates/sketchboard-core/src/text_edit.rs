//! Inline text-entry overlay state.
//!
//! The engine does not edit text itself. It describes an input element
//! the host positions over the canvas, and receives the final value back
//! on commit.

use crate::color::SerializableColor;
use crate::input::{Key, KeyEvent};
use crate::shapes::{Shape, StickyNote};
use kurbo::Point;

/// What a text edit will produce on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// Create a new text label at the anchor.
    NewText,
    /// Replace the text of the shape at this document index.
    Existing(usize),
}

/// Action requested by a key pressed inside the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    Commit,
    Cancel,
}

/// Inline editor the host must show while text is being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    pub target: EditTarget,
    /// Canvas-space anchor (top-left of the text).
    pub anchor: Point,
    /// Top-left of the editor relative to the host panel, in pixels.
    pub position: Point,
    /// Font size in screen pixels.
    pub font_size: f64,
    pub color: SerializableColor,
    /// Fixed width in screen pixels; `None` sizes to content.
    pub width: Option<f64>,
    /// Editor background; `None` is transparent.
    pub background: Option<SerializableColor>,
    /// Current editor contents.
    pub value: String,
}

impl TextOverlay {
    /// Editor for a new text label.
    pub fn new_text(anchor: Point, position: Point, font_size: f64, scale: f64, color: SerializableColor) -> Self {
        Self {
            target: EditTarget::NewText,
            anchor,
            position,
            font_size: font_size * scale,
            color,
            width: None,
            background: None,
            value: String::new(),
        }
    }

    /// Editor pre-filled from an existing text label or sticky note.
    /// Returns None for shapes without text.
    pub fn for_shape(index: usize, shape: &Shape, position: Point, scale: f64) -> Option<Self> {
        let overlay = match shape {
            Shape::Text(text) => Self {
                target: EditTarget::Existing(index),
                anchor: text.position,
                position,
                font_size: text.font_size * scale,
                color: text.color,
                width: None,
                background: None,
                value: text.content.clone(),
            },
            Shape::Sticky(note) => Self {
                target: EditTarget::Existing(index),
                anchor: note.position,
                position,
                font_size: StickyNote::FONT_SIZE * scale,
                color: StickyNote::TEXT_COLOR,
                width: Some(note.width * scale),
                background: Some(note.bg_color),
                value: note.text.clone(),
            },
            _ => return None,
        };
        Some(overlay)
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Trimmed value, or None when only whitespace remains.
    pub fn committed_text(&self) -> Option<&str> {
        let text = self.value.trim();
        (!text.is_empty()).then_some(text)
    }

    /// Map a key pressed inside the editor. Shift+Enter is left to the
    /// host so it inserts a newline.
    pub fn key_action(event: &KeyEvent) -> Option<OverlayAction> {
        match event.key {
            Key::Escape => Some(OverlayAction::Cancel),
            Key::Enter if !event.modifiers.shift => Some(OverlayAction::Commit),
            _ => None,
        }
    }
}
