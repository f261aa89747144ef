use super::Rect;

/// Viewport size in logical pixels.
///
/// Renderers upload this as a uniform to convert logical px positions to NDC.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Largest square that fits the viewport, centred in it.
    #[inline]
    pub fn centered_square(self) -> Rect {
        let side = self.width.min(self.height).max(0.0);
        Rect::new((self.width - side) / 2.0, (self.height - side) / 2.0, side, side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_square_landscape() {
        let sq = Viewport::new(400.0, 300.0).centered_square();
        assert_eq!(sq, Rect::new(50.0, 0.0, 300.0, 300.0));
    }

    #[test]
    fn centered_square_portrait() {
        let sq = Viewport::new(300.0, 500.0).centered_square();
        assert_eq!(sq, Rect::new(0.0, 100.0, 300.0, 300.0));
    }

    #[test]
    fn zero_viewport_is_invalid() {
        assert!(!Viewport::new(0.0, 10.0).is_valid());
        assert!(Viewport::new(1.0, 1.0).is_valid());
    }
}
