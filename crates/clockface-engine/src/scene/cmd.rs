use crate::scene::shapes::ellipse::EllipseCmd;
use crate::scene::shapes::path::PathCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that shape module
/// - teach `render::SceneRenderer` which batch the variant belongs to
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Ellipse(EllipseCmd),
    Path(PathCmd),
    Text(TextCmd),
}

impl DrawCmd {
    /// True for commands drawn by the shape pipeline (everything but text).
    #[inline]
    pub fn is_shape(&self) -> bool {
        !matches!(self, DrawCmd::Text(_))
    }
}
