//! Circle shape.

use super::{ObjectId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A circle anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<ObjectId>,
    /// Center point.
    #[serde(flatten)]
    pub position: Point,
    pub radius: f64,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: None,
            position: center,
            radius,
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

    pub fn center(&self) -> Point {
        self.position
    }
}

impl ShapeTrait for Circle {
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
        Rect::new(
            self.position.x - self.radius,
            self.position.y - self.radius,
            self.position.x + self.radius,
            self.position.y + self.radius,
        )
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let circle = Circle::new(Point::new(200.0, 100.0), 25.0);
        let bounds = circle.bounds();
        assert!((bounds.x0 - 175.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 75.0).abs() < f64::EPSILON);
        assert!((bounds.width() - 50.0).abs() < f64::EPSILON);
        assert!((bounds.height() - 50.0).abs() < f64::EPSILON);
    }
}
