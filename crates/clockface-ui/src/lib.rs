//! Clockface UI: an analog clock face on top of `clockface-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use clockface_ui::prelude::*;
//!
//! Application::new()
//!     .title("Clockface")
//!     .font(std::fs::read("DejaVuSans.ttf")?)
//!     .timezone("UTC".parse()?)
//!     .run()?;
//! ```
//!
//! # Drawing into your own surface
//!
//! [`ClockFace`](face::ClockFace) only talks to the [`DrawContext`](context::DrawContext)
//! trait, so it can render anywhere:
//!
//! ```rust,ignore
//! let mut face = ClockFace::new();
//! face.set_time(10, 8, 42);
//! face.render(Some(&mut my_context), Rect::new(0.0, 0.0, 200.0, 200.0));
//! ```

pub mod app;
pub mod context;
pub mod driver;
pub mod face;
pub mod geometry;
pub mod hand;
pub mod painter;
pub mod style;
pub mod time_source;

pub use app::Application;

/// Everything needed to build, drive and draw a clock face.
pub mod prelude {
    pub use crate::app::Application;
    pub use crate::context::DrawContext;
    pub use crate::driver::ClockDriver;
    pub use crate::face::ClockFace;
    pub use crate::geometry::{FaceGeometry, NumeralLabel};
    pub use crate::hand::{Hand, HandKind};
    pub use crate::painter::Painter;
    pub use crate::style::FaceStyle;
    pub use crate::time_source::{ClockTime, TimeSource, TimeZoneError, TimeZoneSetting, WallClock};

    // Re-export the engine primitives everyone needs.
    pub use clockface_engine::coords::{Rect, Vec2};
    pub use clockface_engine::paint::Color;
    pub use clockface_engine::time::{Cadence, TickSource};
}
