//! Tool system for the whiteboard.

use crate::geometry;
use crate::shapes::{BoxShape, Freehand, Segment, Shape, ShapeStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Smallest extent (or segment length) a drawn shape must reach to be kept.
pub const MIN_CREATE_EXTENT: f64 = 3.0;
/// Perpendicular tolerance used to simplify freehand strokes on commit.
pub const SIMPLIFY_TOLERANCE: f64 = 1.5;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Pen,
    Rectangle,
    Ellipse,
    Diamond,
    Line,
    Arrow,
    Text,
    Sticky,
}

impl ToolKind {
    pub const ALL: [ToolKind; 10] = [
        ToolKind::Select,
        ToolKind::Pan,
        ToolKind::Pen,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
        ToolKind::Diamond,
        ToolKind::Line,
        ToolKind::Arrow,
        ToolKind::Text,
        ToolKind::Sticky,
    ];

    /// Keyboard shortcut for this tool.
    pub fn shortcut(self) -> char {
        match self {
            ToolKind::Select => 'v',
            ToolKind::Pan => 'h',
            ToolKind::Pen => 'p',
            ToolKind::Rectangle => 'r',
            ToolKind::Ellipse => 'e',
            ToolKind::Diamond => 'd',
            ToolKind::Line => 'l',
            ToolKind::Arrow => 'a',
            ToolKind::Text => 't',
            ToolKind::Sticky => 's',
        }
    }

    /// Tool bound to a (case-insensitive) shortcut letter.
    pub fn from_shortcut(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        Self::ALL.into_iter().find(|tool| tool.shortcut() == key)
    }

    /// Idle cursor for this tool.
    pub fn cursor(self) -> &'static str {
        match self {
            ToolKind::Select => "default",
            ToolKind::Pan => "grab",
            ToolKind::Text => "text",
            _ => "crosshair",
        }
    }
}

/// A shape being drawn by a drawing tool.
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    /// Rectangle, ellipse or diamond between a fixed anchor and a live corner.
    Box {
        tool: ToolKind,
        anchor: Point,
        current: Point,
        style: ShapeStyle,
    },
    /// Line or arrow between a fixed start and a live end.
    Segment {
        arrow: bool,
        start: Point,
        end: Point,
        style: ShapeStyle,
    },
    /// Freehand stroke collecting every move position.
    Pen(Freehand),
}

impl Draft {
    /// Start drawing with `tool` at `point`. Returns None for non-drawing tools.
    pub fn begin(tool: ToolKind, point: Point, style: ShapeStyle) -> Option<Self> {
        let draft = match tool {
            ToolKind::Rectangle | ToolKind::Ellipse | ToolKind::Diamond => Draft::Box {
                tool,
                anchor: point,
                current: point,
                style,
            },
            ToolKind::Line | ToolKind::Arrow => Draft::Segment {
                arrow: tool == ToolKind::Arrow,
                start: point,
                end: point,
                style,
            },
            ToolKind::Pen => Draft::Pen(Freehand::start(point, ShapeStyle { fill_color: None, ..style })),
            _ => return None,
        };
        Some(draft)
    }

    /// Feed a pointer move.
    pub fn update(&mut self, point: Point) {
        match self {
            Draft::Box { current, .. } => *current = point,
            Draft::Segment { end, .. } => *end = point,
            Draft::Pen(freehand) => freehand.add_point(point),
        }
    }

    /// The shape as it currently looks, without normalization.
    pub fn preview(&self) -> Shape {
        match self {
            Draft::Box {
                tool,
                anchor,
                current,
                style,
            } => {
                let b = BoxShape::new(*anchor, current.x - anchor.x, current.y - anchor.y, style.clone());
                box_shape(*tool, b)
            }
            Draft::Segment {
                arrow,
                start,
                end,
                style,
            } => segment_shape(*arrow, Segment::new(*start, *end, ShapeStyle { fill_color: None, ..style.clone() })),
            Draft::Pen(freehand) => Shape::Pen(freehand.clone()),
        }
    }

    /// Resolve the draft into a shape, or None when it is too small.
    pub fn finish(self, min_extent: f64, simplify_tolerance: f64) -> Option<Shape> {
        match self {
            Draft::Box {
                tool,
                anchor,
                current,
                style,
            } => {
                let (x, y, w, h) =
                    geometry::normalize_box(anchor.x, anchor.y, current.x - anchor.x, current.y - anchor.y);
                if w < min_extent && h < min_extent {
                    return None;
                }
                Some(box_shape(tool, BoxShape::new(Point::new(x, y), w, h, style)))
            }
            Draft::Segment {
                arrow,
                start,
                end,
                style,
            } => {
                if start.distance(end) < min_extent {
                    return None;
                }
                Some(segment_shape(arrow, Segment::new(start, end, ShapeStyle { fill_color: None, ..style })))
            }
            Draft::Pen(mut freehand) => {
                if freehand.len() < 2 {
                    return None;
                }
                freehand.simplify(simplify_tolerance);
                Some(Shape::Pen(freehand))
            }
        }
    }
}

fn box_shape(tool: ToolKind, b: BoxShape) -> Shape {
    match tool {
        ToolKind::Ellipse => Shape::Ellipse(b),
        ToolKind::Diamond => Shape::Diamond(b),
        _ => Shape::Rectangle(b),
    }
}

fn segment_shape(arrow: bool, segment: Segment) -> Shape {
    if arrow {
        Shape::Arrow(segment)
    } else {
        Shape::Line(segment)
    }
}
