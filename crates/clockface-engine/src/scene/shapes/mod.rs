pub(crate) mod ellipse;
pub(crate) mod path;
pub(crate) mod text;

pub use ellipse::EllipseCmd;
pub use path::PathCmd;
pub use text::TextCmd;

use crate::paint::Color;

/// Stroke centred on a shape's outline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// How a shape's geometry is painted.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ShapeStyle {
    Fill(Color),
    Stroke(Stroke),
}

impl ShapeStyle {
    #[inline]
    pub fn color(self) -> Color {
        match self {
            ShapeStyle::Fill(c) => c,
            ShapeStyle::Stroke(s) => s.color,
        }
    }
}
