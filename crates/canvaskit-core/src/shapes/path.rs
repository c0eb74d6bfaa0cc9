//! Free-form path shape.

use super::{ObjectId, ShapeStyle, ShapeTrait, absolute_points, points_bounds};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A (possibly smoothed, possibly closed) path through a flat relative point
/// list, as produced by freehand drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<ObjectId>,
    #[serde(flatten)]
    pub position: Point,
    #[serde(default)]
    pub points: Vec<f64>,
    /// Curve tension used by the renderer (0 = straight segments).
    #[serde(default)]
    pub tension: f64,
    /// Whether the last point connects back to the first.
    #[serde(default)]
    pub closed: bool,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Path {
    pub fn from_flat(position: Point, points: Vec<f64>) -> Self {
        Self {
            id: None,
            position,
            points,
            tension: 0.0,
            closed: false,
            style: ShapeStyle::default(),
        }
    }

    /// Build from absolute points, anchoring the path at the first one.
    pub fn from_points(points: &[Point]) -> Self {
        let origin = points.first().copied().unwrap_or(Point::ZERO);
        let flat = points
            .iter()
            .flat_map(|p| [p.x - origin.x, p.y - origin.y])
            .collect();
        Self::from_flat(origin, flat)
    }

    pub fn with_id(mut self, id: impl Into<ObjectId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Get all points in canvas coordinates. Closed paths repeat the first
    /// point at the end.
    pub fn all_points(&self) -> Vec<Point> {
        let mut pts = absolute_points(self.position, &self.points);
        if self.closed && pts.len() > 2 {
            pts.push(pts[0]);
        }
        pts
    }

    /// Margin added around the bounding box for point hit tests (half the
    /// stroke, which is how far the painted stroke extends past the points).
    pub fn hit_margin(&self) -> f64 {
        self.style.effective_stroke_width() / 2.0
    }
}

impl ShapeTrait for Path {
    fn id(&self) -> Option<&ObjectId> {
        self.id.as_ref()
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn bounds(&self) -> Rect {
        points_bounds(self.position, &self.points)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
