//! Pure geometry utilities: hit-testing primitives, distances, line
//! simplification, bounding-box normalization and text measurement.

use kurbo::{Point, Rect};

/// Point-in-rectangle with a tolerance margin on every side.
pub fn point_in_rect(point: Point, rect: Rect, tolerance: f64) -> bool {
    point.x >= rect.x0 - tolerance
        && point.x <= rect.x1 + tolerance
        && point.y >= rect.y0 - tolerance
        && point.y <= rect.y1 + tolerance
}

/// Point-in-ellipse via normalized distance, with the tolerance folded
/// into both radii.
pub fn point_in_ellipse(point: Point, center: Point, radius_x: f64, radius_y: f64, tolerance: f64) -> bool {
    let rx = radius_x + tolerance;
    let ry = radius_y + tolerance;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let dx = (point.x - center.x) / rx;
    let dy = (point.y - center.y) / ry;
    dx * dx + dy * dy <= 1.0
}

/// Point-in-diamond via L1 normalized distance, with the tolerance folded
/// into both half-extents. `rect` is the diamond's bounding box.
pub fn point_in_diamond(point: Point, rect: Rect, tolerance: f64) -> bool {
    let center = rect.center();
    let half_w = rect.width() / 2.0 + tolerance;
    let half_h = rect.height() / 2.0 + tolerance;
    if half_w <= 0.0 || half_h <= 0.0 {
        return false;
    }
    let dx = (point.x - center.x).abs() / half_w;
    let dy = (point.y - center.y).abs() / half_h;
    dx + dy <= 1.0
}

/// Distance from a point to a line segment (a→b), using the clamped
/// projection onto the segment.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Whether a point lies within `tolerance` of the segment a→b.
pub fn point_near_segment(point: Point, a: Point, b: Point, tolerance: f64) -> bool {
    point_to_segment_dist(point, a, b) <= tolerance
}

/// Whether a point lies within `tolerance` of any segment of a polyline.
pub fn point_near_path(point: Point, points: &[Point], tolerance: f64) -> bool {
    points
        .windows(2)
        .any(|w| point_near_segment(point, w[0], w[1], tolerance))
}

/// Bounding box of a set of points (`Rect::ZERO` when empty).
pub fn points_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p))
}

/// Ramer-Douglas-Peucker simplification.
///
/// Walks index ranges with an explicit stack instead of slicing, so the
/// only allocations are the keep-mask and the output. The first and last
/// points are always kept and the output never grows.
pub fn simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut ranges = vec![(0usize, last)];
    while let Some((start, end)) = ranges.pop() {
        if end <= start + 1 {
            continue;
        }
        let (a, b) = (points[start], points[end]);
        let mut max_dist = 0.0;
        let mut max_index = start;
        for (i, point) in points.iter().enumerate().take(end).skip(start + 1) {
            let dist = point_to_segment_dist(*point, a, b);
            if dist > max_dist {
                max_dist = dist;
                max_index = i;
            }
        }
        if max_dist > tolerance {
            keep[max_index] = true;
            ranges.push((start, max_index));
            ranges.push((max_index, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Normalize a box given as origin + signed extent: a negative extent
/// flips the origin and is negated. Returns `(x, y, w, h)` with `w, h >= 0`.
pub fn normalize_box(x: f64, y: f64, w: f64, h: f64) -> (f64, f64, f64, f64) {
    let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
    let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };
    (x, y, w, h)
}

/// Normalize a signed box and floor each extent to `min_extent`.
pub fn normalized_resize_box(x: f64, y: f64, w: f64, h: f64, min_extent: f64) -> Rect {
    let (x, y, w, h) = normalize_box(x, y, w, h);
    Rect::new(x, y, x + w.max(min_extent), y + h.max(min_extent))
}

/// Affinely map `point` from `old` to `new`, independently per axis.
/// A zero-extent axis of `old` is treated as extent 1.
pub fn remap_point(point: Point, old: Rect, new: Rect) -> Point {
    let sx = new.width() / nonzero(old.width());
    let sy = new.height() / nonzero(old.height());
    Point::new(new.x0 + (point.x - old.x0) * sx, new.y0 + (point.y - old.y0) * sy)
}

fn nonzero(extent: f64) -> f64 {
    if extent == 0.0 { 1.0 } else { extent }
}

/// Text measurement backend.
///
/// The engine needs text widths for text-shape bounding boxes and the
/// renderer needs them for word wrapping. Hosts with a real font stack
/// supply their own implementation.
pub trait TextMetrics {
    /// Advance width of a single line of text.
    fn line_width(&self, text: &str, font_size: f64) -> f64;
}

/// Font-agnostic approximation: every character advances a fixed fraction
/// of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxTextMetrics {
    pub advance_ratio: f64,
}

impl Default for ApproxTextMetrics {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl TextMetrics for ApproxTextMetrics {
    fn line_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * self.advance_ratio
    }
}

/// Width of multi-line text: the widest `\n`-delimited line, floored at
/// `min_width`.
pub fn measure_text(metrics: &dyn TextMetrics, text: &str, font_size: f64, min_width: f64) -> f64 {
    text.split('\n')
        .map(|line| metrics.line_width(line, font_size))
        .fold(min_width, f64::max)
}

/// Greedy word wrap on single spaces.
///
/// A word is moved to a new line when appending it would exceed
/// `max_width`; the first word always stays on the first line. Each line
/// keeps its trailing space.
pub fn wrap_text(metrics: &dyn TextMetrics, text: &str, font_size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for (i, word) in text.split(' ').enumerate() {
        let candidate = format!("{line}{word} ");
        if i > 0 && metrics.line_width(&candidate, font_size) > max_width {
            lines.push(std::mem::take(&mut line));
            line = format!("{word} ");
        } else {
            line = candidate;
        }
    }
    lines.push(line);
    lines
}
