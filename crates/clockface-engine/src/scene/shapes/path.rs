use crate::coords::Vec2;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::ShapeStyle;

/// Polyline draw payload.
///
/// `points[0]` is the move-to point; every following point is a line-to.
/// Strokes use butt caps and no joins, which is exact for the single
/// segments the clock hands produce.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCmd {
    pub points: Vec<Vec2>,
    pub closed: bool,
    pub style: ShapeStyle,
}

impl PathCmd {
    #[inline]
    pub fn new(points: Vec<Vec2>, closed: bool, style: ShapeStyle) -> Self {
        Self { points, closed, style }
    }

    /// Iterates the straight segments of the path, including the closing one.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let closing = match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(&first), Some(&last)) if self.points.len() > 2 => Some((last, first)),
            _ => None,
        };
        self.points.windows(2).map(|w| (w[0], w[1])).chain(closing)
    }
}

impl DrawList {
    /// Records a polyline draw command. Paths with fewer than two points are dropped.
    #[inline]
    pub fn push_path(&mut self, z: ZIndex, points: Vec<Vec2>, closed: bool, style: ShapeStyle) {
        if points.len() < 2 {
            return;
        }
        self.push(z, DrawCmd::Path(PathCmd::new(points, closed, style)));
    }
}
