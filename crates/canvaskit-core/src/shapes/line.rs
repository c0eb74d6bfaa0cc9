//! Line shape.

use super::{ObjectId, ShapeStyle, ShapeTrait, absolute_points, points_bounds};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// An open polyline. `points` are a flat `[x0, y0, x1, y1, ...]` list relative
/// to `position`, so moving a line only changes its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<ObjectId>,
    #[serde(flatten)]
    pub position: Point,
    #[serde(default)]
    pub points: Vec<f64>,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Line {
    /// Extra hit margin beyond the stroke width: the hit test uses the
    /// bounding box, not the stroked geometry, so thin lines need slack.
    pub const HIT_MARGIN: f64 = 3.0;

    /// Create a single segment between two absolute points.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: None,
            position: Point::ZERO,
            points: vec![start.x, start.y, end.x, end.y],
            style: ShapeStyle::default(),
        }
    }

    /// Create a polyline from a flat relative point list.
    pub fn from_flat(position: Point, points: Vec<f64>) -> Self {
        Self {
            id: None,
            position,
            points,
            style: ShapeStyle::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ObjectId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Get all points in canvas coordinates.
    pub fn all_points(&self) -> Vec<Point> {
        absolute_points(self.position, &self.points)
    }

    /// Margin added around the bounding box for point hit tests.
    pub fn hit_margin(&self) -> f64 {
        self.style.effective_stroke_width() + Self::HIT_MARGIN
    }
}

impl ShapeTrait for Line {
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
