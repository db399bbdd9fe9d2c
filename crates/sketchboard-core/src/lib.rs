//! Sketchboard Core Library
//!
//! Platform-agnostic engine for an in-page vector whiteboard: the shape
//! model, geometry utilities, viewport transform, undo history and the
//! interaction state machine.

pub mod canvas;
pub mod color;
pub mod config;
pub mod geometry;
pub mod history;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod text_edit;
pub mod tools;
pub mod viewport;

pub use canvas::{CurrentStyle, Gesture, Whiteboard};
pub use color::{ColorParseError, SerializableColor};
pub use config::{BoardConfig, ConfigError};
pub use geometry::{ApproxTextMetrics, TextMetrics};
pub use history::History;
pub use input::{EventResponse, InputEvent, Key, KeyEvent, KeyFocus, Modifiers, MouseButton};
pub use selection::{Handle, HandleKind};
pub use shapes::{Shape, ShapeKind, ShapeStyle};
pub use text_edit::{EditTarget, TextOverlay};
pub use tools::{Draft, ToolKind};
pub use viewport::Viewport;
