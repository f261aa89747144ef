use clockface_engine::coords::{Rect, Vec2};
use clockface_engine::paint::Color;
use clockface_engine::scene::{DrawList, ShapeStyle, Stroke, TextCmd, ZIndex};
use clockface_engine::text::{FontId, FontSystem};

use crate::context::DrawContext;

/// One element of the painter's current path.
#[derive(Debug, Clone, PartialEq)]
enum PathElement {
    Ellipse(Rect),
    Polyline { points: Vec<Vec2>, closed: bool },
}

/// [`DrawContext`] that records into the engine's [`DrawList`].
///
/// Every painted element gets the next z-index, so the recorded paint order
/// is the order of the drawing calls.
pub struct Painter<'a> {
    pub(crate) draw_list: &'a mut DrawList,
    pub(crate) font_system: &'a FontSystem,
    font: Option<FontId>,
    z: i32,

    path: Vec<PathElement>,
    fill_color: Color,
    stroke_color: Color,
    line_width: f32,
}

impl<'a> Painter<'a> {
    /// `font` is used for text and line metrics; with `None`, text commands
    /// are still recorded but the renderer skips them.
    pub fn new(draw_list: &'a mut DrawList, font_system: &'a FontSystem, font: Option<FontId>) -> Self {
        Self {
            draw_list,
            font_system,
            font,
            z: 0,
            path: Vec::new(),
            fill_color: Color::black(),
            stroke_color: Color::black(),
            line_width: 1.0,
        }
    }

    fn paint_path(&mut self, style: ShapeStyle) {
        for element in std::mem::take(&mut self.path) {
            let z = self.next_z();
            match element {
                PathElement::Ellipse(rect) => self.draw_list.push_ellipse(z, rect, style),
                PathElement::Polyline { points, closed } => {
                    self.draw_list.push_path(z, points, closed, style);
                }
            }
        }
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}

impl DrawContext for Painter<'_> {
    fn add_ellipse(&mut self, rect: Rect) {
        self.path.push(PathElement::Ellipse(rect));
    }

    fn move_to(&mut self, point: Vec2) {
        self.path.push(PathElement::Polyline { points: vec![point], closed: false });
    }

    fn add_line_to(&mut self, point: Vec2) {
        match self.path.last_mut() {
            Some(PathElement::Polyline { points, closed: false }) => points.push(point),
            Some(PathElement::Polyline { points, closed: true }) => {
                let start = points[0];
                self.path.push(PathElement::Polyline { points: vec![start, point], closed: false });
            }
            // No current point: behaves like move_to.
            _ => self.move_to(point),
        }
    }

    fn close_path(&mut self) {
        if let Some(PathElement::Polyline { closed, .. }) = self.path.last_mut() {
            *closed = true;
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn fill_path(&mut self) {
        self.paint_path(ShapeStyle::Fill(self.fill_color));
    }

    fn stroke_path(&mut self) {
        self.paint_path(ShapeStyle::Stroke(Stroke::new(self.line_width, self.stroke_color)));
    }

    fn draw_text(&mut self, text: &str, rect: Rect, font_size: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_text(z, TextCmd::new(text, self.font, font_size, color, rect));
    }

    fn line_height(&self, font_size: f32) -> f32 {
        self.font_system.line_height(self.font, font_size)
    }
}
