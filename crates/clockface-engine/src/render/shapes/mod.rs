//! Per-primitive renderers driven by [`SceneRenderer`](super::SceneRenderer).

mod common;

pub mod shape;
pub mod text;

pub use shape::ShapeRenderer;
pub use text::TextRenderer;
