//! Rectangle (marquee) selection helpers and selection reducers.

use crate::hit_test::rect_contains;
use crate::shapes::{Circle, DrawingObject};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// How a new set of hits combines with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// The hits become the selection.
    #[default]
    Replace,
    /// The hits are appended to the selection.
    Add,
    /// The hits are removed from the selection.
    Subtract,
}

/// What a marquee rectangle must cover to select an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Containment {
    /// The whole object must lie inside the rectangle.
    #[default]
    Complete,
    /// Any overlap selects the object.
    Intersect,
}

/// Build a rectangle from two drag corners given in any order.
pub fn normalize_rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
    Rect::from_origin_size(
        Point::new(x0.min(x1), y0.min(y1)),
        ((x1 - x0).abs(), (y1 - y0).abs()),
    )
}

/// Whether every extremal point of the object lies inside `rect`.
pub fn is_object_completely_in_rect(obj: &DrawingObject, rect: Rect) -> bool {
    if obj.is_canvas() {
        return false;
    }
    // Rect corners, circle ±radius, text box and point-list bounding boxes are
    // all captured by the object's bounds.
    let bounds = obj.bounds();
    rect_contains(rect, bounds.x0, bounds.y0) && rect_contains(rect, bounds.x1, bounds.y1)
}

/// Whether the object overlaps `rect` at all (touching edges count).
pub fn is_object_intersecting_rect(obj: &DrawingObject, rect: Rect) -> bool {
    match obj {
        DrawingObject::Rect(_) | DrawingObject::Text(_) => boxes_overlap(obj.bounds(), rect),
        DrawingObject::Circle(circle) => circle_intersects_rect(circle, rect),
        DrawingObject::Line(line) => polyline_intersects_rect(&line.all_points(), rect),
        DrawingObject::Path(path) => polyline_intersects_rect(&path.all_points(), rect),
        DrawingObject::Canvas => false,
    }
}

/// Objects selected by a marquee, in scene order.
pub fn objects_in_rect<'a>(
    rect: Rect,
    objects: &'a [DrawingObject],
    containment: Containment,
) -> Vec<&'a DrawingObject> {
    objects
        .iter()
        .filter(|obj| match containment {
            Containment::Complete => is_object_completely_in_rect(obj, rect),
            Containment::Intersect => is_object_intersecting_rect(obj, rect),
        })
        .collect()
}

/// Combine the current selection with new hits.
///
/// `Add` keeps the current order and appends unseen hits; `Subtract` keeps
/// the current order minus the hits.
pub fn update_selection<T: PartialEq + Clone>(current: &[T], next: &[T], mode: SelectionMode) -> Vec<T> {
    match mode {
        SelectionMode::Replace => next.to_vec(),
        SelectionMode::Add => {
            let mut result = current.to_vec();
            for item in next {
                if !result.contains(item) {
                    result.push(item.clone());
                }
            }
            result
        }
        SelectionMode::Subtract => current
            .iter()
            .filter(|item| !next.contains(item))
            .cloned()
            .collect(),
    }
}

/// Separating-axis test for two axis-aligned boxes.
fn boxes_overlap(a: Rect, b: Rect) -> bool {
    !(a.x1 < b.x0 || a.x0 > b.x1 || a.y1 < b.y0 || a.y0 > b.y1)
}

/// Distance from the circle's center to the closest point of the rectangle.
fn circle_intersects_rect(circle: &Circle, rect: Rect) -> bool {
    let center = circle.center();
    let closest_x = center.x.clamp(rect.x0, rect.x1);
    let closest_y = center.y.clamp(rect.y0, rect.y1);
    let dx = center.x - closest_x;
    let dy = center.y - closest_y;
    dx * dx + dy * dy <= circle.radius * circle.radius
}

/// Test if any segment of a polyline intersects or lies inside a rectangle.
fn polyline_intersects_rect(points: &[Point], rect: Rect) -> bool {
    if points.iter().any(|p| rect_contains(rect, p.x, p.y)) {
        return true;
    }
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ];
    let edges = [
        (corners[0], corners[1]),
        (corners[1], corners[2]),
        (corners[2], corners[3]),
        (corners[3], corners[0]),
    ];
    points.windows(2).any(|w| {
        edges
            .iter()
            .any(|&(c, d)| segments_intersect(w[0], w[1], c, d))
    })
}

/// Test if two line segments (a-b) and (c-d) intersect.
fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let cross = |o: Point, p: Point, q: Point| -> f64 {
        (p.x - o.x) * (q.y - o.y) - (p.y - o.y) * (q.x - o.x)
    };
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    // Collinear: an endpoint lies on the other segment
    let on_segment = |p: Point, q: Point, r: Point| -> bool {
        r.x >= p.x.min(q.x) && r.x <= p.x.max(q.x) && r.y >= p.y.min(q.y) && r.y <= p.y.max(q.y)
    };
    (d1.abs() < 1e-10 && on_segment(c, d, a))
        || (d2.abs() < 1e-10 && on_segment(c, d, b))
        || (d3.abs() < 1e-10 && on_segment(a, b, c))
        || (d4.abs() < 1e-10 && on_segment(a, b, d))
}
