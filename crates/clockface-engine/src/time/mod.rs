//! Time subsystem.
//!
//! Provides testable frame timing and cadence utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per window; call `tick()` once per presented frame
//! - a `TickSource` (usually [`Cadence`]) decides which frames carry an update

mod cadence;
mod frame_clock;

pub use cadence::{Cadence, TickSource};
pub use frame_clock::{FrameClock, FrameTime};
