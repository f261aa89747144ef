use crate::coords::Rect;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::ShapeStyle;

/// Ellipse draw payload, inscribed in `rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseCmd {
    pub rect: Rect,
    pub style: ShapeStyle,
}

impl EllipseCmd {
    #[inline]
    pub fn new(rect: Rect, style: ShapeStyle) -> Self {
        Self { rect, style }
    }
}

impl DrawList {
    /// Records an ellipse draw command.
    #[inline]
    pub fn push_ellipse(&mut self, z: ZIndex, rect: Rect, style: ShapeStyle) {
        self.push(z, DrawCmd::Ellipse(EllipseCmd::new(rect, style)));
    }
}
