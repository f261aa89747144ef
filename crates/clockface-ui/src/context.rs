use clockface_engine::coords::{Rect, Vec2};
use clockface_engine::paint::Color;

/// Abstract 2D drawing surface the clock face renders against.
///
/// The path API is stateful, like a canvas: `move_to` starts a new subpath,
/// `add_line_to` extends it, and `fill_path`/`stroke_path` consume the current
/// path with the current fill/stroke state. Ellipses are added and painted in
/// one call through [`DrawContext::fill_ellipse`] and
/// [`DrawContext::stroke_ellipse`].
///
/// [`Painter`](crate::painter::Painter) records into the engine's draw list;
/// tests use a recording fake.
pub trait DrawContext {
    /// Adds an ellipse inscribed in `rect` to the current path.
    fn add_ellipse(&mut self, rect: Rect);

    /// Starts a new subpath at `point`.
    fn move_to(&mut self, point: Vec2);

    /// Adds a straight line from the current point to `point`.
    fn add_line_to(&mut self, point: Vec2);

    /// Closes the current subpath back to its starting point. The next line
    /// starts from that point.
    fn close_path(&mut self);

    fn set_fill_color(&mut self, color: Color);

    fn set_stroke_color(&mut self, color: Color);

    fn set_line_width(&mut self, width: f32);

    /// Fills and clears the current path.
    fn fill_path(&mut self);

    /// Strokes and clears the current path.
    fn stroke_path(&mut self);

    /// Draws `text` with its first line's top-left corner at `rect.origin`.
    fn draw_text(&mut self, text: &str, rect: Rect, font_size: f32, color: Color);

    /// Baseline-to-baseline distance for the context's font at `font_size`.
    fn line_height(&self, font_size: f32) -> f32;

    /// Fills the ellipse inscribed in `rect` with `color`.
    fn fill_ellipse(&mut self, rect: Rect, color: Color) {
        self.set_fill_color(color);
        self.add_ellipse(rect);
        self.fill_path();
    }

    /// Strokes the ellipse inscribed in `rect`.
    fn stroke_ellipse(&mut self, rect: Rect, width: f32, color: Color) {
        self.set_stroke_color(color);
        self.set_line_width(width);
        self.add_ellipse(rect);
        self.stroke_path();
    }

    /// Strokes a single straight line from `from` to `to`.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.set_stroke_color(color);
        self.set_line_width(width);
        self.move_to(from);
        self.add_line_to(to);
        self.stroke_path();
    }
}
