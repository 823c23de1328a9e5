//! Frame timing.
//!
//! One `FrameClock` per render loop; the scheduler ticks it once per recorded frame
//! and hands the resulting `FrameTime` to drawables.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
