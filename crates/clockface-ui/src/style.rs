use clockface_engine::paint::Color;

/// Fixed visual parameters of the face that are not tied to a hand.
///
/// The numeral constants were tuned by eye for one set of font metrics, so
/// they are exposed here instead of being baked into the geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FaceStyle {
    pub background: Color,

    pub border_color: Color,
    /// The border stroke is inset by half this width so it stays inside the region.
    pub border_width: f32,

    pub numeral_color: Color,
    /// Numeral font size is `numeral_font_base + region_width / numeral_font_width_divisor`.
    pub numeral_font_base: f32,
    pub numeral_font_width_divisor: f32,
    /// Extra inward offset of the numeral circle, in logical pixels.
    pub numeral_offset: f32,

    /// Hub covering the hour and minute hand bases.
    pub hub_radius: f32,
    pub hub_color: Color,
    /// Hub covering the second hand base; painted in the second hand's color.
    pub second_hub_radius: f32,
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            background: Color::black(),
            border_color: Color::white(),
            border_width: 2.0,
            numeral_color: Color::white(),
            numeral_font_base: 8.0,
            numeral_font_width_divisor: 50.0,
            numeral_offset: 15.0,
            hub_radius: 6.0,
            hub_color: Color::white(),
            second_hub_radius: 3.0,
        }
    }
}

impl FaceStyle {
    /// Numeral font size for a region `region_width` pixels wide.
    #[inline]
    pub fn numeral_font_size(&self, region_width: f32) -> f32 {
        self.numeral_font_base + region_width / self.numeral_font_width_divisor
    }
}
