//! Font loading and metrics.
//!
//! Fonts are parsed with `fontdue`; the same `FontSystem` feeds layout-time
//! metrics (line height) and the text renderer's glyph rasterisation.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem, FALLBACK_LINE_HEIGHT_FACTOR};
