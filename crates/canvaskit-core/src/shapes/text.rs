//! Text shape.

use super::{ObjectId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A single-line text label anchored at its baseline's left end.
///
/// No font metrics are available in the core, so extents are approximated:
/// each character is `0.6 * font_size` wide and the box is `font_size` tall,
/// extending upward from the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<ObjectId>,
    /// Baseline start position.
    #[serde(flatten)]
    pub position: Point,
    /// Text content.
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Text {
    /// Font size used when none is set.
    pub const DEFAULT_FONT_SIZE: f64 = 16.0;

    /// Approximate glyph advance as a fraction of the font size.
    pub const CHAR_WIDTH_FACTOR: f64 = 0.6;

    pub fn new(position: Point, text: impl Into<String>) -> Self {
        Self {
            id: None,
            position,
            text: text.into(),
            font_size: None,
            font_family: None,
            align: None,
            style: ShapeStyle::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ObjectId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn effective_font_size(&self) -> f64 {
        self.font_size.unwrap_or(Self::DEFAULT_FONT_SIZE)
    }

    /// Approximate rendered width.
    pub fn approximate_width(&self) -> f64 {
        self.text.chars().count() as f64 * self.effective_font_size() * Self::CHAR_WIDTH_FACTOR
    }
}

impl ShapeTrait for Text {
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
        let height = self.effective_font_size();
        Rect::new(
            self.position.x,
            self.position.y - height,
            self.position.x + self.approximate_width(),
            self.position.y,
        )
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
