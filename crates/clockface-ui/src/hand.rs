use clockface_engine::paint::Color;

/// One of the face's three hand slots.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum HandKind {
    Hours,
    Minutes,
    Seconds,
}

impl HandKind {
    pub const ALL: [HandKind; 3] = [HandKind::Hours, HandKind::Minutes, HandKind::Seconds];
}

/// Visual parameters and current value of a clock hand.
///
/// `length_divisor` is an inverse scale: the hand is `region_width / length_divisor`
/// long. `value` is hours (1–12) or minutes/seconds (0–59); it is not
/// validated, out-of-range values just produce other angles.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hand {
    pub stroke_width: f32,
    pub length_divisor: f32,
    pub color: Color,
    pub value: i32,
}

impl Hand {
    #[inline]
    pub const fn new(stroke_width: f32, length_divisor: f32, color: Color, value: i32) -> Self {
        Self { stroke_width, length_divisor, color, value }
    }

    /// Hand length for a region of `region_width` logical pixels.
    #[inline]
    pub fn length(&self, region_width: f32) -> f32 {
        region_width / self.length_divisor
    }

    pub const fn default_hours() -> Self {
        Self::new(4.0, 4.6, Color::white(), 4)
    }

    pub const fn default_minutes() -> Self {
        Self::new(3.0, 3.2, Color::white(), 20)
    }

    pub const fn default_seconds() -> Self {
        Self::new(1.0, 2.4, Color::red(), 34)
    }

    pub const fn default_for(kind: HandKind) -> Self {
        match kind {
            HandKind::Hours => Self::default_hours(),
            HandKind::Minutes => Self::default_minutes(),
            HandKind::Seconds => Self::default_seconds(),
        }
    }
}
