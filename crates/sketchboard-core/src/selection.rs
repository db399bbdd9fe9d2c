//! Selection and resize handle system.

use crate::geometry;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Handle hit half-size in screen pixels.
pub const HANDLE_SIZE: f64 = 8.0;
/// Half-size of the drawn handle squares in screen pixels.
pub const HANDLE_DRAW_HALF_SIZE: f64 = 5.0;
/// Smallest extent a resize may produce, in canvas units.
pub const MIN_RESIZE_EXTENT: f64 = 5.0;

/// One of the eight resize handles on a bounding box.
///
/// Handles are numbered row-major: the top row left to right, then the two
/// side midpoints, then the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl HandleKind {
    /// All handles in index order.
    pub const ALL: [HandleKind; 8] = [
        HandleKind::NorthWest,
        HandleKind::North,
        HandleKind::NorthEast,
        HandleKind::West,
        HandleKind::East,
        HandleKind::SouthWest,
        HandleKind::South,
        HandleKind::SouthEast,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this handle on `bounds`.
    pub fn position(self, bounds: Rect) -> Point {
        let cx = bounds.center().x;
        let cy = bounds.center().y;
        match self {
            HandleKind::NorthWest => Point::new(bounds.x0, bounds.y0),
            HandleKind::North => Point::new(cx, bounds.y0),
            HandleKind::NorthEast => Point::new(bounds.x1, bounds.y0),
            HandleKind::West => Point::new(bounds.x0, cy),
            HandleKind::East => Point::new(bounds.x1, cy),
            HandleKind::SouthWest => Point::new(bounds.x0, bounds.y1),
            HandleKind::South => Point::new(cx, bounds.y1),
            HandleKind::SouthEast => Point::new(bounds.x1, bounds.y1),
        }
    }

    pub fn moves_left(self) -> bool {
        matches!(self, HandleKind::NorthWest | HandleKind::West | HandleKind::SouthWest)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, HandleKind::NorthEast | HandleKind::East | HandleKind::SouthEast)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, HandleKind::NorthWest | HandleKind::North | HandleKind::NorthEast)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, HandleKind::SouthWest | HandleKind::South | HandleKind::SouthEast)
    }

    /// CSS cursor name shown while hovering this handle.
    pub fn cursor(self) -> &'static str {
        match self {
            HandleKind::NorthWest => "nw-resize",
            HandleKind::North => "n-resize",
            HandleKind::NorthEast => "ne-resize",
            HandleKind::West => "w-resize",
            HandleKind::East => "e-resize",
            HandleKind::SouthWest => "sw-resize",
            HandleKind::South => "s-resize",
            HandleKind::SouthEast => "se-resize",
        }
    }
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in canvas coordinates.
    pub position: Point,
    /// Handle type.
    pub kind: HandleKind,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Square hit test; `size` is the half-extent in canvas units.
    pub fn hit_test(&self, point: Point, size: f64) -> bool {
        (point.x - self.position.x).abs() <= size && (point.y - self.position.y).abs() <= size
    }
}

/// The eight handles of a bounding box, in index order.
pub fn get_handles(bounds: Rect) -> Vec<Handle> {
    HandleKind::ALL
        .iter()
        .map(|&kind| Handle::new(kind.position(bounds), kind))
        .collect()
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(bounds: Rect, point: Point, size: f64) -> Option<HandleKind> {
    get_handles(bounds)
        .into_iter()
        .find(|handle| handle.hit_test(point, size))
        .map(|handle| handle.kind)
}

/// Box produced by dragging `handle` of `bounds` to `pointer`.
///
/// Edges the handle controls follow the pointer; the others stay put. The
/// result is normalized and each extent is floored to `min_extent`.
pub fn resize_bounds(bounds: Rect, handle: HandleKind, pointer: Point, min_extent: f64) -> Rect {
    let (mut x, mut y) = (bounds.x0, bounds.y0);
    let (mut w, mut h) = (bounds.width(), bounds.height());
    if handle.moves_left() {
        w += x - pointer.x;
        x = pointer.x;
    }
    if handle.moves_right() {
        w = pointer.x - x;
    }
    if handle.moves_top() {
        h += y - pointer.y;
        y = pointer.y;
    }
    if handle.moves_bottom() {
        h = pointer.y - y;
    }
    geometry::normalized_resize_box(x, y, w, h, min_extent)
}
