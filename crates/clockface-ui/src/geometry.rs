//! Time-to-angle mapping and face layout.
//!
//! Angles are in radians, measured from +X towards +Y in the top-left/+Y-down
//! space. `-π/2` therefore points straight up on screen, which is where 0
//! minutes/seconds and 12 hours sit. Everything here is a pure function of
//! hand values and the region.

use core::f32::consts::{FRAC_PI_2, TAU};

use clockface_engine::coords::{Rect, Vec2};

use crate::face::ClockFace;
use crate::hand::HandKind;

/// Labels in dial order, index 0 is "1". Single digits carry a leading space
/// so they sit visually centred in their square.
pub const NUMERAL_LABELS: [&str; 12] =
    [" 1", " 2", " 3", " 4", " 5", " 6", " 7", " 8", " 9", "10", "11", "12"];

/// Angle of a minute (or second) value, `0` pointing up.
#[inline]
pub fn minute_angle(minutes: i32) -> f32 {
    minutes as f32 / 60.0 * TAU - FRAC_PI_2
}

/// Angle of a second value; same mapping as minutes.
#[inline]
pub fn second_angle(seconds: i32) -> f32 {
    minute_angle(seconds)
}

/// Angle of the hour hand, moving continuously with the minutes.
#[inline]
pub fn hour_angle(hours: i32, minutes: i32) -> f32 {
    (hours as f32 + minutes as f32 / 60.0) / 12.0 * TAU - FRAC_PI_2
}

/// End of a hand of `length` starting at `center` and pointing at `angle`.
#[inline]
pub fn hand_endpoint(center: Vec2, angle: f32, length: f32) -> Vec2 {
    center + Vec2::from_angle(angle) * length
}

/// Radius of the circle the numeral squares are centred on.
///
/// `d = width/2 − lh/4 − offset`, then each numeral is pulled in by half its
/// line height.
#[inline]
pub fn numeral_radius(region_width: f32, line_height: f32, offset: f32) -> f32 {
    let d = region_width / 2.0 - line_height / 4.0 - offset;
    d - line_height / 2.0
}

/// Centre of numeral `index` (1–12) on a circle of `radius` around `center`.
///
/// The dial angle is `(index + 3) · 30°`; x is mirrored through 180° and y is
/// flipped for the +Y-down space, which lands 12 at the top and 3 on the right.
pub fn numeral_center(index: u32, center: Vec2, radius: f32) -> Vec2 {
    let angle = ((index + 3) as f32 * 30.0).to_radians();
    Vec2::new(
        center.x + radius * (angle + core::f32::consts::PI).cos(),
        center.y - radius * angle.sin(),
    )
}

/// One placed numeral.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NumeralLabel {
    pub text: &'static str,
    /// `line_height × line_height` square centred on the numeral position.
    pub rect: Rect,
}

/// Derived geometry of one render, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceGeometry {
    pub region: Rect,
    pub center: Vec2,
    /// Bounding rect of the border ellipse.
    pub border: Rect,
    pub numeral_font_size: f32,
    pub numeral_line_height: f32,
    /// Numerals 1 through 12, in that order.
    pub numerals: [NumeralLabel; 12],
    pub hour_end: Vec2,
    pub minute_end: Vec2,
    pub second_end: Vec2,
}

impl FaceGeometry {
    /// Lays out `face` in `region`.
    ///
    /// `line_height` maps a font size to its line height. Returns `None` for
    /// empty or non-finite regions.
    pub fn compute(face: &ClockFace, region: Rect, line_height: impl Fn(f32) -> f32) -> Option<Self> {
        if !region.is_finite() || region.is_empty() {
            return None;
        }

        let style = face.style();
        let width = region.width();
        let center = region.center();

        let numeral_font_size = style.numeral_font_size(width);
        let lh = line_height(numeral_font_size);
        let radius = numeral_radius(width, lh, style.numeral_offset);

        let numerals = core::array::from_fn(|i| {
            let pos = numeral_center(i as u32 + 1, center, radius);
            NumeralLabel {
                text: NUMERAL_LABELS[i],
                rect: Rect::new(pos.x - lh / 2.0, pos.y - lh / 2.0, lh, lh),
            }
        });

        let hours = face.hand(HandKind::Hours);
        let minutes = face.hand(HandKind::Minutes);
        let seconds = face.hand(HandKind::Seconds);

        Some(Self {
            region,
            center,
            border: region.inset(style.border_width / 2.0),
            numeral_font_size,
            numeral_line_height: lh,
            numerals,
            hour_end: hand_endpoint(center, hour_angle(hours.value, minutes.value), hours.length(width)),
            minute_end: hand_endpoint(center, minute_angle(minutes.value), minutes.length(width)),
            second_end: hand_endpoint(center, second_angle(seconds.value), seconds.length(width)),
        })
    }

    /// Centre of numeral `index` (1–12), or `None` when out of range.
    pub fn numeral_position(&self, index: u32) -> Option<Vec2> {
        let i = index.checked_sub(1)? as usize;
        self.numerals.get(i).map(|n| n.rect.center())
    }
}
