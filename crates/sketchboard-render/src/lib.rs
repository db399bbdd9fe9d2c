//! Sketchboard Render Library
//!
//! Renderer abstraction for Sketchboard. [`BoardRenderer`] turns a
//! whiteboard into calls on a [`Painter`]; [`DisplayList`] records them for
//! replay, and the optional Vello backend encodes them into a GPU scene.

mod board_renderer;
mod display_list;
mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use board_renderer::{
    ARROW_HEAD_HALF_ANGLE, ARROW_HEAD_MIN_LENGTH, BoardRenderer, arrow_head, diamond_path, ellipse_path, parse_style_color,
    pen_path, resolve_grid_color,
};
pub use display_list::{DisplayList, DrawCommand};
pub use renderer::{Painter, RenderContext, RenderResult, Renderer, RendererError, Shadow};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::{ParleyTextMetrics, VelloPainter};
