//! Clockface engine crate.
//!
//! Owns the platform + GPU runtime pieces the clock face is presented with:
//! geometry, colors, the renderer-agnostic draw list, fonts, frame timing and
//! the winit/wgpu runtime.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
