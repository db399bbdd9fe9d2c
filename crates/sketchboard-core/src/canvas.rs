//! Whiteboard engine state and the interaction state machine.

use crate::color::SerializableColor;
use crate::config::{BoardConfig, ConfigError};
use crate::geometry::{ApproxTextMetrics, TextMetrics};
use crate::history::History;
use crate::input::{EventResponse, InputEvent, InputState, Key, KeyEvent, KeyFocus, MouseButton};
use crate::selection::{self, HandleKind};
use crate::shapes::{Shape, ShapeStyle, StickyNote, Text};
use crate::text_edit::{EditTarget, OverlayAction, TextOverlay};
use crate::tools::{Draft, ToolKind};
use crate::viewport::Viewport;
use kurbo::{Point, Size, Vec2};
use std::fmt;

/// Style applied to newly created shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentStyle {
    pub stroke_color: SerializableColor,
    pub fill_color: SerializableColor,
    pub no_fill: bool,
    pub stroke_width: f64,
}

impl CurrentStyle {
    pub fn from_config(config: &BoardConfig) -> Self {
        Self {
            stroke_color: config.stroke_color,
            fill_color: config.fill_color,
            no_fill: config.no_fill,
            stroke_width: config.stroke_width,
        }
    }

    /// Fill for new shapes; `None` when fill is disabled.
    pub fn fill(&self) -> Option<SerializableColor> {
        (!self.no_fill).then_some(self.fill_color)
    }

    pub fn shape_style(&self) -> ShapeStyle {
        ShapeStyle {
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_width,
            fill_color: self.fill(),
        }
    }
}

/// The in-progress interaction.
///
/// Pointer gestures start on pointer-down and resolve on pointer-up or
/// pointer-leave. Text editing starts on placement or double-click and
/// resolves on commit or cancel.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Drawing(Draft),
    /// Moving the selected shape; `grab` is the pointer offset from the
    /// shape's bounding-box top-left.
    Dragging { index: usize, grab: Vec2 },
    Resizing { index: usize, handle: HandleKind },
    Panning { start_screen: Point, start_offset: Vec2 },
    EditingText(TextOverlay),
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::Drawing(_) => "drawing",
            Gesture::Dragging { .. } => "dragging",
            Gesture::Resizing { .. } => "resizing",
            Gesture::Panning { .. } => "panning",
            Gesture::EditingText(_) => "editing-text",
        }
    }
}

/// The whiteboard engine: document, viewport, selection, tool, gesture and
/// history. This is the only mutator of the document.
pub struct Whiteboard {
    config: BoardConfig,
    shapes: Vec<Shape>,
    selection: Option<usize>,
    viewport: Viewport,
    history: History,
    tool: ToolKind,
    gesture: Gesture,
    style: CurrentStyle,
    input: InputState,
    sticky_count: usize,
    panel_origin: Point,
    metrics: Box<dyn TextMetrics>,
}

impl fmt::Debug for Whiteboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Whiteboard")
            .field("shapes", &self.shapes.len())
            .field("selection", &self.selection)
            .field("tool", &self.tool)
            .field("gesture", &self.gesture.name())
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl Default for Whiteboard {
    fn default() -> Self {
        Self::from_valid_config(BoardConfig::default())
    }
}

impl Whiteboard {
    /// Create a board with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board with a validated configuration.
    pub fn with_config(config: BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: BoardConfig) -> Self {
        Self {
            viewport: Viewport::with_limits(config.min_zoom, config.max_zoom),
            history: History::new(config.history_capacity),
            style: CurrentStyle::from_config(&config),
            config,
            shapes: Vec::new(),
            selection: None,
            tool: ToolKind::Select,
            gesture: Gesture::Idle,
            input: InputState::new(),
            sticky_count: 0,
            panel_origin: Point::ZERO,
            metrics: Box::new(ApproxTextMetrics::default()),
        }
    }

    /// Replace the text measurement backend.
    pub fn set_text_metrics(&mut self, metrics: Box<dyn TextMetrics>) {
        self.metrics = metrics;
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Shapes in z-order (later is on top).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selection.and_then(|i| self.shapes.get(i))
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn style(&self) -> &CurrentStyle {
        &self.style
    }

    pub fn space_held(&self) -> bool {
        self.input.space_held
    }

    /// The shape being drawn, if a drawing gesture is active.
    pub fn draft_preview(&self) -> Option<Shape> {
        match &self.gesture {
            Gesture::Drawing(draft) => Some(draft.preview()),
            _ => None,
        }
    }

    /// The open text editor, if any.
    pub fn text_overlay(&self) -> Option<&TextOverlay> {
        match &self.gesture {
            Gesture::EditingText(overlay) => Some(overlay),
            _ => None,
        }
    }

    pub fn is_editing_text(&self) -> bool {
        matches!(self.gesture, Gesture::EditingText(_))
    }

    /// Cursor for the current tool and gesture.
    pub fn cursor(&self) -> &'static str {
        match self.gesture {
            Gesture::Panning { .. } => "grabbing",
            _ if self.input.space_held => "grab",
            _ => self.tool.cursor(),
        }
    }

    // --- Host-reported geometry -------------------------------------------

    /// Size of the canvas element in pixels.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.size = Size::new(width, height);
    }

    /// On-screen top-left of the canvas element.
    pub fn set_origin(&mut self, x: f64, y: f64) {
        self.viewport.origin = Point::new(x, y);
    }

    /// On-screen top-left of the panel hosting the text editor.
    pub fn set_panel_origin(&mut self, x: f64, y: f64) {
        self.panel_origin = Point::new(x, y);
    }

    // --- Tools and style ----------------------------------------------------

    /// Switch tools. Any tool but select clears the selection.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool != self.tool {
            log::debug!("Tool changed: {:?} -> {:?}", self.tool, tool);
        }
        self.tool = tool;
        if tool != ToolKind::Select {
            self.clear_selection();
        }
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.style.stroke_width = width;
        if let Some(shape) = self.selected_shape_mut() {
            shape.set_stroke_width(width);
            self.commit();
        }
    }

    pub fn set_stroke_color(&mut self, color: SerializableColor) {
        self.style.stroke_color = color;
        if let Some(shape) = self.selected_shape_mut() {
            shape.set_stroke_color(color);
            self.commit();
        }
    }

    pub fn set_fill_color(&mut self, color: SerializableColor) {
        self.style.fill_color = color;
        if self.style.no_fill {
            return;
        }
        if let Some(shape) = self.selected_shape_mut().filter(|s| s.is_fillable()) {
            shape.set_fill(Some(color));
            self.commit();
        }
    }

    pub fn set_no_fill(&mut self, no_fill: bool) {
        self.style.no_fill = no_fill;
        let fill = self.style.fill();
        if let Some(shape) = self.selected_shape_mut().filter(|s| s.is_fillable()) {
            shape.set_fill(fill);
            self.commit();
        }
    }

    fn selected_shape_mut(&mut self) -> Option<&mut Shape> {
        self.selection.and_then(|i| self.shapes.get_mut(i))
    }

    // --- Document commands --------------------------------------------------

    /// Append a shape on top and record it in history.
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.commit();
        self.shapes.len() - 1
    }

    /// Remove the selected shape. Returns false when nothing is selected.
    pub fn delete_selected(&mut self) -> bool {
        self.interrupt_gesture();
        let Some(index) = self.selection.take() else {
            return false;
        };
        if index >= self.shapes.len() {
            return false;
        }
        let removed = self.shapes.remove(index);
        log::debug!("Deleted {} at {}", removed.kind(), index);
        self.commit();
        true
    }

    /// Remove every shape. No-op on an empty document.
    pub fn clear(&mut self) -> bool {
        self.interrupt_gesture();
        if self.shapes.is_empty() {
            return false;
        }
        log::info!("Clearing {} shapes", self.shapes.len());
        self.shapes.clear();
        self.selection = None;
        self.commit();
        true
    }

    pub fn undo(&mut self) -> bool {
        self.interrupt_gesture();
        match self.history.undo() {
            Some(document) => {
                self.shapes = document;
                self.selection = None;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.interrupt_gesture();
        match self.history.redo() {
            Some(document) => {
                self.shapes = document;
                self.selection = None;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn commit(&mut self) {
        self.history.commit(&self.shapes);
    }

    /// End any gesture that holds a document index before the document
    /// changes under it. An open text edit is committed, as on blur.
    fn interrupt_gesture(&mut self) {
        match self.gesture {
            Gesture::EditingText(_) => {
                self.commit_text();
            }
            Gesture::Dragging { .. } | Gesture::Resizing { .. } => {
                log::debug!("Interrupted {} gesture", self.gesture.name());
                self.gesture = Gesture::Idle;
            }
            _ => {}
        }
    }

    /// Drop the selection. A drag or resize in progress ends here, and any
    /// movement it already made is committed.
    fn clear_selection(&mut self) {
        if matches!(self.gesture, Gesture::Dragging { .. } | Gesture::Resizing { .. }) {
            self.interrupt_gesture();
            if self.shapes.as_slice() != self.history.current() {
                self.commit();
            }
        }
        self.selection = None;
    }

    // --- Viewport commands --------------------------------------------------

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_at_center(self.config.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_at_center(1.0 / self.config.zoom_step);
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset();
    }

    pub fn zoom_label(&self) -> String {
        self.viewport.zoom_label()
    }

    // --- Hit testing --------------------------------------------------------

    /// Top-most shape under a canvas point.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        let tolerance = self.viewport.screen_to_canvas_len(self.config.hit_tolerance);
        self.shapes
            .iter()
            .rposition(|shape| shape.hit_test(point, tolerance, self.metrics.as_ref()))
    }

    /// Resize handle of the selection under a canvas point.
    pub fn hit_test_handle(&self, point: Point) -> Option<HandleKind> {
        let shape = self.selected_shape()?;
        let size = self.viewport.screen_to_canvas_len(self.config.handle_size);
        selection::hit_test_handles(shape.bounds(self.metrics.as_ref()), point, size)
    }

    // --- Event dispatch -----------------------------------------------------

    /// Feed one normalized input event through the state machine.
    pub fn handle_event(&mut self, event: InputEvent) -> EventResponse {
        if event.is_touch() {
            let prevent = !matches!(event, InputEvent::TouchEnd);
            let Some(event) = event.normalize_touch() else {
                return EventResponse::none();
            };
            let response = self.handle_event(event);
            return if prevent { response.with_prevent_default() } else { response };
        }

        match event {
            InputEvent::PointerDown { position, button } => self.pointer_down(position, button),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => self.pointer_up(),
            InputEvent::DoubleClick { position } => self.double_click(position),
            InputEvent::Wheel { position, delta_y } => self.wheel(position, delta_y),
            InputEvent::KeyDown(key) => self.key_down(&key),
            InputEvent::KeyUp(key) => self.key_up(&key),
            InputEvent::TextChanged(value) => {
                if let Gesture::EditingText(overlay) = &mut self.gesture {
                    overlay.set_value(value);
                }
                EventResponse::none()
            }
            InputEvent::TextBlur => {
                if self.commit_text() {
                    EventResponse::redraw()
                } else {
                    EventResponse::none()
                }
            }
            InputEvent::TouchStart { .. } | InputEvent::TouchMove { .. } | InputEvent::TouchEnd => {
                EventResponse::none()
            }
        }
    }

    fn pointer_down(&mut self, screen: Point, button: MouseButton) -> EventResponse {
        if button == MouseButton::Right {
            return EventResponse::none();
        }
        if self.is_editing_text() {
            self.commit_text();
        }
        let pos = self.viewport.screen_to_canvas(screen);

        if button == MouseButton::Middle || self.input.space_held || self.tool == ToolKind::Pan {
            self.gesture = Gesture::Panning {
                start_screen: screen,
                start_offset: self.viewport.offset,
            };
            return EventResponse::none().with_cursor("grabbing");
        }

        match self.tool {
            ToolKind::Select => self.select_down(pos),
            ToolKind::Text => self.start_text(pos),
            ToolKind::Sticky => self.place_sticky(pos),
            tool => {
                if let Some(draft) = Draft::begin(tool, pos, self.style.shape_style()) {
                    self.gesture = Gesture::Drawing(draft);
                }
            }
        }
        EventResponse::redraw()
    }

    fn select_down(&mut self, pos: Point) {
        if let Some(index) = self.selection {
            if let Some(handle) = self.hit_test_handle(pos) {
                self.gesture = Gesture::Resizing { index, handle };
                return;
            }
        }
        match self.hit_test(pos) {
            Some(index) => {
                let origin = self.shapes[index].bounds(self.metrics.as_ref()).origin();
                self.selection = Some(index);
                self.gesture = Gesture::Dragging {
                    index,
                    grab: pos - origin,
                };
            }
            None => self.selection = None,
        }
    }

    fn pointer_move(&mut self, screen: Point) -> EventResponse {
        let pos = self.viewport.screen_to_canvas(screen);

        if let Gesture::Drawing(draft) = &mut self.gesture {
            log::trace!("Draw to ({:.1}, {:.1})", pos.x, pos.y);
            draft.update(pos);
            return EventResponse::redraw();
        }

        match self.gesture {
            Gesture::Panning {
                start_screen,
                start_offset,
            } => {
                self.viewport.offset = start_offset + (screen - start_screen);
                EventResponse::redraw()
            }
            Gesture::Dragging { index, grab } => {
                self.drag_to(index, grab, pos);
                EventResponse::redraw()
            }
            Gesture::Resizing { index, handle } => {
                self.resize_to(index, handle, pos);
                EventResponse::redraw()
            }
            Gesture::Idle if self.tool == ToolKind::Select => {
                EventResponse::none().with_cursor(self.hover_cursor(pos))
            }
            _ => EventResponse::none(),
        }
    }

    fn drag_to(&mut self, index: usize, grab: Vec2, pos: Point) {
        if self.selection != Some(index) {
            return;
        }
        let metrics = self.metrics.as_ref();
        let Some(shape) = self.shapes.get_mut(index) else {
            return;
        };
        let origin = shape.bounds(metrics).origin();
        let delta = (pos - grab) - origin;
        log::trace!("Move shape {} by ({:.1}, {:.1})", index, delta.x, delta.y);
        shape.translate(delta);
    }

    fn resize_to(&mut self, index: usize, handle: HandleKind, pos: Point) {
        if self.selection != Some(index) {
            return;
        }
        let metrics = self.metrics.as_ref();
        let min_extent = self.config.min_resize_extent;
        let Some(shape) = self.shapes.get_mut(index) else {
            return;
        };
        let old = shape.bounds(metrics);
        let new = selection::resize_bounds(old, handle, pos, min_extent);
        log::trace!("Resize shape {} via {:?} to {:?}", index, handle, new);
        shape.apply_bounds(new, old);
    }

    fn hover_cursor(&self, pos: Point) -> &'static str {
        if let Some(handle) = self.hit_test_handle(pos) {
            handle.cursor()
        } else if self.hit_test(pos).is_some() {
            "move"
        } else {
            "default"
        }
    }

    fn pointer_up(&mut self) -> EventResponse {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => EventResponse::none(),
            Gesture::Panning { .. } => EventResponse::none().with_cursor(self.cursor()),
            Gesture::Drawing(draft) => {
                self.finish_draw(draft);
                EventResponse::redraw()
            }
            Gesture::Dragging { .. } | Gesture::Resizing { .. } => {
                if self.selection.is_some() {
                    self.commit();
                }
                EventResponse::redraw()
            }
            editing @ Gesture::EditingText(_) => {
                self.gesture = editing;
                EventResponse::none()
            }
        }
    }

    fn finish_draw(&mut self, draft: Draft) {
        match draft.finish(self.config.min_create_extent, self.config.simplify_tolerance) {
            Some(shape) => {
                log::debug!("Committed {}", shape.kind());
                self.shapes.push(shape);
                self.selection = Some(self.shapes.len() - 1);
                self.commit();
                self.set_tool(ToolKind::Select);
            }
            None => log::debug!("Discarded degenerate shape"),
        }
    }

    fn place_sticky(&mut self, pos: Point) {
        let color = self.config.sticky_color(self.sticky_count);
        self.sticky_count += 1;
        let note = StickyNote::centered_at(pos, self.config.sticky_width, self.config.sticky_height, color);
        self.shapes.push(Shape::Sticky(note));
        self.selection = Some(self.shapes.len() - 1);
        log::debug!("Placed sticky {} ({})", self.sticky_count, color);
        self.commit();
        self.set_tool(ToolKind::Select);
    }

    fn double_click(&mut self, screen: Point) -> EventResponse {
        let pos = self.viewport.screen_to_canvas(screen);
        let Some(index) = self.hit_test(pos) else {
            return EventResponse::none();
        };
        if !self.shapes[index].is_text_editable() {
            return EventResponse::none();
        }
        if self.is_editing_text() {
            self.commit_text();
        }
        // Committing never removes shapes, so the index is still valid.
        let shape = &self.shapes[index];
        let anchor = shape.bounds(self.metrics.as_ref()).origin();
        let position = self.overlay_position(anchor);
        if let Some(overlay) = TextOverlay::for_shape(index, shape, position, self.viewport.scale) {
            log::debug!("Editing text of shape {}", index);
            self.gesture = Gesture::EditingText(overlay);
        }
        EventResponse::redraw()
    }

    fn wheel(&mut self, screen: Point, delta_y: f64) -> EventResponse {
        let step = self.config.wheel_zoom_step;
        let factor = if delta_y < 0.0 { step } else { 1.0 / step };
        self.viewport.zoom_at_screen(screen, factor);
        EventResponse::redraw().with_prevent_default()
    }

    // --- Text editing -------------------------------------------------------

    fn overlay_position(&self, anchor: Point) -> Point {
        self.viewport.canvas_to_screen(anchor) - self.panel_origin.to_vec2()
    }

    fn start_text(&mut self, pos: Point) {
        let overlay = TextOverlay::new_text(
            pos,
            self.overlay_position(pos),
            self.config.text_font_size,
            self.viewport.scale,
            self.style.stroke_color,
        );
        self.gesture = Gesture::EditingText(overlay);
    }

    /// Replace the open editor's contents.
    pub fn set_text_value(&mut self, value: impl Into<String>) {
        if let Gesture::EditingText(overlay) = &mut self.gesture {
            overlay.set_value(value);
        }
    }

    /// Close the editor, applying its trimmed text. Returns true when the
    /// document changed.
    pub fn commit_text(&mut self) -> bool {
        let Gesture::EditingText(overlay) = std::mem::take(&mut self.gesture) else {
            return false;
        };
        let changed = match (overlay.target, overlay.committed_text()) {
            (EditTarget::NewText, Some(text)) => {
                self.shapes.push(Shape::Text(Text::new(
                    overlay.anchor,
                    text.to_string(),
                    self.config.text_font_size,
                    self.style.stroke_color,
                )));
                true
            }
            (EditTarget::Existing(index), Some(text)) => self
                .shapes
                .get_mut(index)
                .is_some_and(|shape| shape.set_text(text.to_string())),
            (_, None) => false,
        };
        if changed {
            log::debug!("Committed text edit");
            self.commit();
        }
        self.set_tool(ToolKind::Select);
        changed
    }

    /// Close the editor without changing the document.
    pub fn cancel_text(&mut self) {
        if self.is_editing_text() {
            log::debug!("Cancelled text edit");
            self.gesture = Gesture::Idle;
            self.set_tool(ToolKind::Select);
        }
    }

    // --- Keyboard -----------------------------------------------------------

    fn key_down(&mut self, event: &KeyEvent) -> EventResponse {
        match event.focus {
            KeyFocus::TextOverlay => return self.overlay_key(event),
            KeyFocus::ExpressionWidget => return EventResponse::none(),
            KeyFocus::Board | KeyFocus::Elsewhere => {}
        }
        let on_board = event.focus == KeyFocus::Board;
        let mods = event.modifiers;

        if on_board {
            match &event.key {
                Key::Space => {
                    self.input.space_held = true;
                    return EventResponse::none().with_prevent_default().with_cursor("grab");
                }
                Key::Char(c) if mods.command() && c.eq_ignore_ascii_case(&'z') => {
                    let redo = mods.shift || c.is_ascii_uppercase();
                    if redo {
                        self.redo();
                    } else {
                        self.undo();
                    }
                    return EventResponse::redraw().with_prevent_default();
                }
                Key::Char(c) if mods.command() && c.eq_ignore_ascii_case(&'y') => {
                    self.redo();
                    return EventResponse::redraw().with_prevent_default();
                }
                Key::Delete | Key::Backspace if self.selection.is_some() => {
                    self.delete_selected();
                    return EventResponse::redraw().with_prevent_default();
                }
                Key::Char(c) if !mods.ctrl && !mods.meta && !mods.alt => {
                    if let Some(tool) = ToolKind::from_shortcut(*c) {
                        self.set_tool(tool);
                        return EventResponse::redraw().with_cursor(self.cursor());
                    }
                }
                _ => {}
            }
        }

        if event.key == Key::Escape {
            if self.is_editing_text() {
                self.cancel_text();
            } else {
                self.clear_selection();
            }
            return EventResponse::redraw();
        }
        EventResponse::none()
    }

    fn overlay_key(&mut self, event: &KeyEvent) -> EventResponse {
        match TextOverlay::key_action(event) {
            Some(OverlayAction::Commit) => {
                self.commit_text();
                EventResponse::redraw().with_prevent_default()
            }
            Some(OverlayAction::Cancel) => {
                self.cancel_text();
                EventResponse::redraw()
            }
            None => EventResponse::none(),
        }
    }

    fn key_up(&mut self, event: &KeyEvent) -> EventResponse {
        if event.key == Key::Space {
            self.input.space_held = false;
            return EventResponse::none().with_cursor(self.cursor());
        }
        EventResponse::none()
    }
}
