use clockface_engine::coords::{Rect, Vec2};
use clockface_engine::paint::Color;

use crate::context::DrawContext;
use crate::geometry::FaceGeometry;
use crate::hand::{Hand, HandKind};
use crate::style::FaceStyle;
use crate::time_source::ClockTime;

/// Analog clock face with hour, minute and second hands.
///
/// The face stores only hand state and style. Every [`ClockFace::render`]
/// recomputes the full geometry from the region it is given and redraws the
/// whole dial, back to front:
///
/// 1. background disc filling the region
/// 2. border ring, inset so the stroke stays inside the region
/// 3. the twelve numerals
/// 4. minute hand
/// 5. hour hand
/// 6. hub over the hour/minute hand bases
/// 7. second hand
/// 8. small hub in the second hand's color
#[derive(Debug, Clone, PartialEq)]
pub struct ClockFace {
    hours: Hand,
    minutes: Hand,
    seconds: Hand,
    style: FaceStyle,
}

impl Default for ClockFace {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockFace {
    /// Face with the default hands and style.
    pub fn new() -> Self {
        Self {
            hours: Hand::default_hours(),
            minutes: Hand::default_minutes(),
            seconds: Hand::default_seconds(),
            style: FaceStyle::default(),
        }
    }

    pub fn with_style(mut self, style: FaceStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_hand(mut self, kind: HandKind, hand: Hand) -> Self {
        *self.hand_mut(kind) = hand;
        self
    }

    #[inline]
    pub fn style(&self) -> &FaceStyle {
        &self.style
    }

    /// Sets a hand's visual parameters and its starting value.
    pub fn configure_hand(
        &mut self,
        kind: HandKind,
        stroke_width: f32,
        length_divisor: f32,
        color: Color,
        initial_value: i32,
    ) {
        *self.hand_mut(kind) = Hand::new(stroke_width, length_divisor, color, initial_value);
    }

    #[inline]
    pub fn hand(&self, kind: HandKind) -> &Hand {
        match kind {
            HandKind::Hours => &self.hours,
            HandKind::Minutes => &self.minutes,
            HandKind::Seconds => &self.seconds,
        }
    }

    fn hand_mut(&mut self, kind: HandKind) -> &mut Hand {
        match kind {
            HandKind::Hours => &mut self.hours,
            HandKind::Minutes => &mut self.minutes,
            HandKind::Seconds => &mut self.seconds,
        }
    }

    /// Stores new hand values. Values are not validated.
    pub fn set_time(&mut self, hours: i32, minutes: i32, seconds: i32) {
        self.hours.value = hours;
        self.minutes.value = minutes;
        self.seconds.value = seconds;
    }

    pub fn set_clock_time(&mut self, time: ClockTime) {
        self.set_time(time.hours, time.minutes, time.seconds);
    }

    /// Current hand values as a [`ClockTime`].
    pub fn clock_time(&self) -> ClockTime {
        ClockTime::new(self.hours.value, self.minutes.value, self.seconds.value)
    }

    /// Geometry of the face in `region`; `None` for empty or non-finite regions.
    pub fn geometry(&self, region: Rect, line_height: impl Fn(f32) -> f32) -> Option<FaceGeometry> {
        FaceGeometry::compute(self, region, line_height)
    }

    /// Draws the face into `region`.
    ///
    /// Without a context, or with an unusable region, nothing is drawn.
    pub fn render(&self, ctx: Option<&mut dyn DrawContext>, region: Rect) {
        let Some(ctx) = ctx else {
            log::trace!("clock face: no drawing context, skipping render");
            return;
        };
        let Some(g) = self.geometry(region, |size| ctx.line_height(size)) else {
            log::trace!("clock face: unusable region {region:?}, skipping render");
            return;
        };

        let style = &self.style;

        ctx.fill_ellipse(g.region, style.background);
        ctx.stroke_ellipse(g.border, style.border_width, style.border_color);

        for numeral in &g.numerals {
            ctx.draw_text(numeral.text, numeral.rect, g.numeral_font_size, style.numeral_color);
        }

        draw_hand(ctx, &self.minutes, g.center, g.minute_end);
        draw_hand(ctx, &self.hours, g.center, g.hour_end);
        ctx.fill_ellipse(Rect::from_center_radius(g.center, style.hub_radius), style.hub_color);

        draw_hand(ctx, &self.seconds, g.center, g.second_end);
        ctx.fill_ellipse(
            Rect::from_center_radius(g.center, style.second_hub_radius),
            self.seconds.color,
        );
    }
}

fn draw_hand(ctx: &mut dyn DrawContext, hand: &Hand, center: Vec2, end: Vec2) {
    ctx.stroke_line(center, end, hand.stroke_width, hand.color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::Painter;
    use clockface_engine::scene::{DrawCmd, DrawList, ShapeStyle, Stroke};
    use clockface_engine::text::FontSystem;

    fn record(face: &ClockFace, region: Rect) -> Vec<DrawCmd> {
        let fonts = FontSystem::new();
        let mut dl = DrawList::new();
        {
            let mut painter = Painter::new(&mut dl, &fonts, None);
            face.render(Some(&mut painter), region);
        }
        dl.iter_in_paint_order().map(|i| i.cmd.clone()).collect()
    }

    fn square(side: f32) -> Rect {
        Rect::new(0.0, 0.0, side, side)
    }

    // ── command sequence ──────────────────────────────────────────────────

    #[test]
    fn render_emits_eight_steps_in_order() {
        let cmds = record(&ClockFace::new(), square(200.0));
        assert_eq!(cmds.len(), 2 + 12 + 5);

        assert!(matches!(&cmds[0], DrawCmd::Ellipse(e) if e.style == ShapeStyle::Fill(Color::black())));
        assert!(matches!(&cmds[1], DrawCmd::Ellipse(e) if matches!(e.style, ShapeStyle::Stroke(_))));
        assert!(cmds[2..14].iter().all(|c| matches!(c, DrawCmd::Text(_))));
        assert!(matches!(&cmds[14], DrawCmd::Path(_)));
        assert!(matches!(&cmds[15], DrawCmd::Path(_)));
        assert!(matches!(&cmds[16], DrawCmd::Ellipse(_)));
        assert!(matches!(&cmds[17], DrawCmd::Path(_)));
        assert!(matches!(&cmds[18], DrawCmd::Ellipse(_)));
    }

    #[test]
    fn background_and_border_follow_region() {
        let region = Rect::new(50.0, 0.0, 300.0, 300.0);
        let cmds = record(&ClockFace::new(), region);

        let DrawCmd::Ellipse(bg) = &cmds[0] else { panic!("background missing") };
        assert_eq!(bg.rect, region);

        let DrawCmd::Ellipse(border) = &cmds[1] else { panic!("border missing") };
        assert_eq!(border.rect, region.inset(1.0));
        assert_eq!(border.style, ShapeStyle::Stroke(Stroke::new(2.0, Color::white())));
    }

    #[test]
    fn numerals_are_labelled_one_to_twelve() {
        let cmds = record(&ClockFace::new(), square(200.0));
        let labels: Vec<&str> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            labels,
            vec![" 1", " 2", " 3", " 4", " 5", " 6", " 7", " 8", " 9", "10", "11", "12"]
        );
    }

    #[test]
    fn hands_use_their_configured_style() {
        let cmds = record(&ClockFace::new(), square(200.0));

        let stroke = |i: usize| match &cmds[i] {
            DrawCmd::Path(p) => p.style,
            other => panic!("expected path, got {other:?}"),
        };
        assert_eq!(stroke(14), ShapeStyle::Stroke(Stroke::new(3.0, Color::white())));
        assert_eq!(stroke(15), ShapeStyle::Stroke(Stroke::new(4.0, Color::white())));
        assert_eq!(stroke(17), ShapeStyle::Stroke(Stroke::new(1.0, Color::red())));
    }

    #[test]
    fn hubs_are_centred_with_fixed_radii() {
        let cmds = record(&ClockFace::new(), square(200.0));
        let center = Vec2::new(100.0, 100.0);

        let DrawCmd::Ellipse(hub) = &cmds[16] else { panic!("hub missing") };
        assert_eq!(hub.rect, Rect::from_center_radius(center, 6.0));
        assert_eq!(hub.style, ShapeStyle::Fill(Color::white()));

        let DrawCmd::Ellipse(small) = &cmds[18] else { panic!("second hub missing") };
        assert_eq!(small.rect, Rect::from_center_radius(center, 3.0));
        assert_eq!(small.style, ShapeStyle::Fill(Color::red()));
    }

    #[test]
    fn hand_lines_start_at_center() {
        let cmds = record(&ClockFace::new(), square(200.0));
        for i in [14, 15, 17] {
            let DrawCmd::Path(p) = &cmds[i] else { panic!("expected path") };
            assert_eq!(p.points[0], Vec2::new(100.0, 100.0));
            assert_eq!(p.points.len(), 2);
        }
    }

    // ── no-op cases ───────────────────────────────────────────────────────

    #[test]
    fn render_without_context_is_a_no_op() {
        let mut face = ClockFace::new();
        face.set_time(9, 15, 30);
        let before = face.clone();

        let fonts = FontSystem::new();
        let mut dl = DrawList::new();
        {
            let mut painter = Painter::new(&mut dl, &fonts, None);
            face.render(Some(&mut painter), square(200.0));
        }
        let recorded = dl.len();

        face.render(None, square(200.0));
        assert_eq!(face, before);
        assert_eq!(dl.len(), recorded);
        assert_eq!(recorded, 19);
    }

    #[test]
    fn render_into_empty_region_draws_nothing() {
        assert!(record(&ClockFace::new(), square(0.0)).is_empty());
        assert!(record(&ClockFace::new(), Rect::new(0.0, 0.0, f32::INFINITY, 5.0)).is_empty());
    }

    // ── state ─────────────────────────────────────────────────────────────

    #[test]
    fn set_time_updates_all_hands() {
        let mut face = ClockFace::new();
        face.set_time(7, 45, 3);
        assert_eq!(face.hand(HandKind::Hours).value, 7);
        assert_eq!(face.hand(HandKind::Minutes).value, 45);
        assert_eq!(face.hand(HandKind::Seconds).value, 3);
        assert_eq!(face.clock_time(), ClockTime::new(7, 45, 3));
    }

    #[test]
    fn configure_hand_replaces_one_slot() {
        let mut face = ClockFace::new();
        face.configure_hand(HandKind::Seconds, 2.0, 2.0, Color::white(), 10);
        assert_eq!(*face.hand(HandKind::Seconds), Hand::new(2.0, 2.0, Color::white(), 10));
        assert_eq!(*face.hand(HandKind::Minutes), Hand::default_minutes());
    }

    #[test]
    fn new_face_uses_default_hands() {
        let face = ClockFace::new();
        for kind in HandKind::ALL {
            assert_eq!(*face.hand(kind), Hand::default_for(kind));
        }
    }

    #[test]
    fn with_hand_swaps_a_hand_before_first_render() {
        let long = Hand::new(1.0, 1.0, Color::white(), 15);
        let face = ClockFace::new().with_hand(HandKind::Seconds, long);
        let g = face.geometry(square(200.0), |s| s * 1.2).expect("geometry");
        // 15 seconds points at three o'clock with the full region width as length.
        assert!((g.second_end.x - 300.0).abs() < 1e-3);
        assert!((g.second_end.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn out_of_range_values_still_render_finite_geometry() {
        let mut face = ClockFace::new();
        face.set_time(99, -5, 600);
        let g = face.geometry(square(200.0), |s| s * 1.2).expect("geometry");
        assert!(g.hour_end.is_finite() && g.minute_end.is_finite() && g.second_end.is_finite());
    }
}
