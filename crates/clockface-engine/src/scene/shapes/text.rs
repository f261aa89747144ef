use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::FontId;

/// A single-line text label placed in a box.
///
/// Glyphs are laid out from the top-left corner of `bounds`; the box does not
/// wrap or clip.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    /// `None` when no font is loaded; renderers skip such commands.
    pub font: Option<FontId>,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    pub bounds: Rect,
}

impl TextCmd {
    pub fn new(text: impl Into<String>, font: Option<FontId>, size: f32, color: Color, bounds: Rect) -> Self {
        Self { text: text.into(), font, size, color, bounds }
    }

    /// Whether a renderer can lay this label out at all.
    pub fn is_drawable(&self) -> bool {
        self.font.is_some()
            && !self.text.is_empty()
            && self.size > 0.0
            && self.size.is_finite()
            && self.bounds.is_finite()
    }
}

impl DrawList {
    /// Records a text label.
    #[inline]
    pub fn push_text(&mut self, z: ZIndex, cmd: TextCmd) {
        self.push(z, DrawCmd::Text(cmd));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str, size: f32) -> TextCmd {
        TextCmd::new(text, Some(FontId(0)), size, Color::white(), Rect::new(0.0, 0.0, 10.0, 10.0))
    }

    #[test]
    fn drawable_needs_font_text_and_size() {
        assert!(label("12", 11.0).is_drawable());
        assert!(!label("", 11.0).is_drawable());
        assert!(!label("12", 0.0).is_drawable());
        assert!(!label("12", f32::NAN).is_drawable());

        let mut no_font = label("12", 11.0);
        no_font.font = None;
        assert!(!no_font.is_drawable());
    }

    #[test]
    fn non_finite_bounds_are_not_drawable() {
        let mut cmd = label("3", 11.0);
        cmd.bounds = Rect::new(f32::INFINITY, 0.0, 10.0, 10.0);
        assert!(!cmd.is_drawable());
    }
}
