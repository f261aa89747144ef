//! Coordinate and geometry types shared across engine renderers and the face.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Angles follow the same convention: `0` points along +X and positive angles
//! turn clockwise on screen, because +Y points down.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
