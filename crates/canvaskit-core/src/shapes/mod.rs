//! Drawable object definitions.

mod circle;
mod line;
mod path;
mod rectangle;
mod text;

pub use circle::Circle;
pub use line::Line;
pub use path::Path;
pub use rectangle::Rectangle;
pub use text::{Text, TextAlign};

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable string key for objects within a scene (e.g. `rect-3`).
pub type ObjectId = String;

/// Stroke width assumed when a shape does not set one (canvas `lineWidth` default).
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

/// Style properties shared by every drawable shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    /// Fill color as a CSS color string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Stroke color as a CSS color string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width in canvas units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl ShapeStyle {
    /// Create a style with only a fill color.
    pub fn filled(fill: impl Into<String>) -> Self {
        Self {
            fill: Some(fill.into()),
            ..Self::default()
        }
    }

    /// Stroke width, falling back to [`DEFAULT_STROKE_WIDTH`].
    pub fn effective_stroke_width(&self) -> f64 {
        self.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH)
    }
}

/// Size component of a shape's geometry, as changed by a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeSize {
    /// Width and height (rectangles).
    Dimensions { width: f64, height: f64 },
    /// Radius (circles).
    Radius(f64),
    /// Shapes whose size is not directly resizable (text, paths, lines).
    Intrinsic,
}

/// Position plus size: everything Move and Resize need to capture and restore.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub position: Point,
    pub size: ShapeSize,
}

impl Geometry {
    pub fn new(position: Point, size: ShapeSize) -> Self {
        Self { position, size }
    }
}

/// Common trait for all concrete shapes.
pub trait ShapeTrait {
    /// Get the identifier, if one has been assigned.
    fn id(&self) -> Option<&ObjectId>;

    /// Get the anchor position.
    fn position(&self) -> Point;

    /// Set the anchor position.
    fn set_position(&mut self, position: Point);

    /// Get the axis-aligned bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;
}

/// Tagged union of everything that can be placed in a scene.
///
/// Serializes with a `type` discriminator (`rect`, `circle`, `text`, `path`,
/// `line`, `canvas`) and camelCase fields, matching the objects a JavaScript
/// canvas host works with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DrawingObject {
    Rect(Rectangle),
    Circle(Circle),
    Text(Text),
    Path(Path),
    Line(Line),
    /// Sentinel for "nothing / the background is selected". Carries no data
    /// and is never stored in a scene.
    Canvas,
}

impl DrawingObject {
    /// The wire name of this object's type.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawingObject::Rect(_) => "rect",
            DrawingObject::Circle(_) => "circle",
            DrawingObject::Text(_) => "text",
            DrawingObject::Path(_) => "path",
            DrawingObject::Line(_) => "line",
            DrawingObject::Canvas => "canvas",
        }
    }

    fn shape(&self) -> Option<&dyn ShapeTrait> {
        match self {
            DrawingObject::Rect(s) => Some(s),
            DrawingObject::Circle(s) => Some(s),
            DrawingObject::Text(s) => Some(s),
            DrawingObject::Path(s) => Some(s),
            DrawingObject::Line(s) => Some(s),
            DrawingObject::Canvas => None,
        }
    }

    fn shape_mut(&mut self) -> Option<&mut dyn ShapeTrait> {
        match self {
            DrawingObject::Rect(s) => Some(s),
            DrawingObject::Circle(s) => Some(s),
            DrawingObject::Text(s) => Some(s),
            DrawingObject::Path(s) => Some(s),
            DrawingObject::Line(s) => Some(s),
            DrawingObject::Canvas => None,
        }
    }

    pub fn id(&self) -> Option<&ObjectId> {
        self.shape().and_then(|s| s.id())
    }

    /// Check whether this object carries the given id.
    pub fn has_id(&self, id: &str) -> bool {
        self.id().is_some_and(|own| own == id)
    }

    /// Assign an id. No-op for the canvas sentinel.
    pub(crate) fn set_id(&mut self, id: ObjectId) {
        let slot = match self {
            DrawingObject::Rect(s) => &mut s.id,
            DrawingObject::Circle(s) => &mut s.id,
            DrawingObject::Text(s) => &mut s.id,
            DrawingObject::Path(s) => &mut s.id,
            DrawingObject::Line(s) => &mut s.id,
            DrawingObject::Canvas => return,
        };
        *slot = Some(id);
    }

    /// Replace the id with a freshly generated one (used by paste/duplicate).
    pub fn regenerate_id(&mut self) {
        let id = generate_object_id(self.kind());
        self.set_id(id);
    }

    /// Anchor position. The canvas sentinel reports the origin.
    pub fn position(&self) -> Point {
        self.shape().map_or(Point::ZERO, |s| s.position())
    }

    pub fn set_position(&mut self, position: Point) {
        if let Some(shape) = self.shape_mut() {
            shape.set_position(position);
        }
    }

    /// Move the anchor by an offset.
    pub fn translate(&mut self, offset: Vec2) {
        let position = self.position() + offset;
        self.set_position(position);
    }

    /// Bounding box. The canvas sentinel yields a zero-size box at the origin.
    pub fn bounds(&self) -> Rect {
        self.shape()
            .map_or(Rect::from_origin_size(Point::ZERO, (0.0, 0.0)), |s| {
                s.bounds()
            })
    }

    pub fn style(&self) -> Option<&ShapeStyle> {
        self.shape().map(|s| s.style())
    }

    pub fn style_mut(&mut self) -> Option<&mut ShapeStyle> {
        self.shape_mut().map(|s| s.style_mut())
    }

    /// Check if a point hits this object (see [`crate::hit_test`]).
    pub fn hit_test(&self, point: Point) -> bool {
        crate::hit_test::is_point_in_object(point.x, point.y, self)
    }

    /// Whether this is the background sentinel.
    pub fn is_canvas(&self) -> bool {
        matches!(self, DrawingObject::Canvas)
    }

    /// Current position and size.
    pub fn geometry(&self) -> Geometry {
        let size = match self {
            DrawingObject::Rect(r) => ShapeSize::Dimensions {
                width: r.width,
                height: r.height,
            },
            DrawingObject::Circle(c) => ShapeSize::Radius(c.radius),
            _ => ShapeSize::Intrinsic,
        };
        Geometry::new(self.position(), size)
    }

    /// Apply a position and size. A size that does not fit the shape kind is
    /// ignored; the position is always applied.
    pub fn apply_geometry(&mut self, geometry: &Geometry) {
        match (&mut *self, geometry.size) {
            (DrawingObject::Rect(r), ShapeSize::Dimensions { width, height }) => {
                r.width = width;
                r.height = height;
            }
            (DrawingObject::Circle(c), ShapeSize::Radius(radius)) => {
                c.radius = radius;
            }
            _ => {}
        }
        self.set_position(geometry.position);
    }
}

impl From<Rectangle> for DrawingObject {
    fn from(shape: Rectangle) -> Self {
        DrawingObject::Rect(shape)
    }
}

impl From<Circle> for DrawingObject {
    fn from(shape: Circle) -> Self {
        DrawingObject::Circle(shape)
    }
}

impl From<Text> for DrawingObject {
    fn from(shape: Text) -> Self {
        DrawingObject::Text(shape)
    }
}

impl From<Path> for DrawingObject {
    fn from(shape: Path) -> Self {
        DrawingObject::Path(shape)
    }
}

impl From<Line> for DrawingObject {
    fn from(shape: Line) -> Self {
        DrawingObject::Line(shape)
    }
}

/// Generate an id of the form `{kind}-{millis}-{random}` for objects created
/// outside a scene's counter (clipboard paste, duplicate, orphan commands).
pub fn generate_object_id(kind: &str) -> ObjectId {
    let millis = web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let random = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", kind, millis, &random[..9])
}

/// Convert a flat `[x0, y0, x1, y1, ...]` list, relative to `origin`, into
/// absolute points. A trailing odd value is ignored.
pub fn absolute_points(origin: Point, flat: &[f64]) -> Vec<Point> {
    flat.chunks_exact(2)
        .map(|pair| Point::new(origin.x + pair[0], origin.y + pair[1]))
        .collect()
}

/// Bounding box of a relative point list. Empty lists collapse to `origin`.
pub(crate) fn points_bounds(origin: Point, flat: &[f64]) -> Rect {
    let points = absolute_points(origin, flat);
    if points.is_empty() {
        return Rect::from_origin_size(origin, (0.0, 0.0));
    }
    let (min_x, max_x) = points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| {
        (mn.min(p.x), mx.max(p.x))
    });
    let (min_y, max_y) = points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| {
        (mn.min(p.y), mx.max(p.y))
    });
    Rect::new(min_x, min_y, max_x, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let rect: DrawingObject = Rectangle::new(Point::new(0.0, 0.0), 1.0, 1.0).into();
        assert_eq!(rect.kind(), "rect");
        assert_eq!(DrawingObject::Canvas.kind(), "canvas");
    }

    #[test]
    fn test_generated_id_format() {
        let id = generate_object_id("circle");
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "circle");
        assert!(parts[1].parse::<u128>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert_ne!(id, generate_object_id("circle"));
    }

    #[test]
    fn test_wire_shape() {
        let json = r##"{"type":"rect","id":"rect-1","x":10,"y":20,"width":50,"height":30,"fill":"#ff0000","strokeWidth":2}"##;
        let obj: DrawingObject = serde_json::from_str(json).unwrap();
        match &obj {
            DrawingObject::Rect(r) => {
                assert!((r.position.x - 10.0).abs() < f64::EPSILON);
                assert!((r.width - 50.0).abs() < f64::EPSILON);
                assert_eq!(r.style.fill.as_deref(), Some("#ff0000"));
                assert_eq!(r.style.stroke_width, Some(2.0));
            }
            other => panic!("expected rect, got {:?}", other),
        }
        assert!(obj.has_id("rect-1"));

        let value = serde_json::to_value(&obj).unwrap();
        assert_eq!(value["type"], "rect");
        assert_eq!(value["strokeWidth"], 2.0);
        assert!(value.get("stroke").is_none());
    }

    #[test]
    fn test_canvas_sentinel_defaults() {
        let mut canvas = DrawingObject::Canvas;
        canvas.set_position(Point::new(5.0, 5.0));
        assert_eq!(canvas.position(), Point::ZERO);
        assert!(canvas.id().is_none());
        assert!((canvas.bounds().area()).abs() < f64::EPSILON);
        assert!(canvas.style().is_none());
    }

    #[test]
    fn test_apply_geometry_ignores_mismatched_size() {
        let mut obj: DrawingObject = Circle::new(Point::new(0.0, 0.0), 10.0).into();
        obj.apply_geometry(&Geometry::new(
            Point::new(5.0, 6.0),
            ShapeSize::Dimensions {
                width: 1.0,
                height: 1.0,
            },
        ));
        assert_eq!(obj.position(), Point::new(5.0, 6.0));
        assert_eq!(obj.geometry().size, ShapeSize::Radius(10.0));
    }

    #[test]
    fn test_absolute_points_ignores_odd_tail() {
        let pts = absolute_points(Point::new(10.0, 10.0), &[0.0, 0.0, 5.0, 5.0, 9.0]);
        assert_eq!(pts, vec![Point::new(10.0, 10.0), Point::new(15.0, 15.0)]);
    }
}
