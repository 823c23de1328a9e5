//! The per-frame loop.
//!
//! `FrameScheduler` owns the pass shape and render targets and runs one iteration per
//! redraw against a `FrameBackend` (the GPU context in production).

mod backend;
mod scheduler;

pub use backend::FrameBackend;
pub use scheduler::{FrameOutcome, FrameScheduler, FrameStats, SchedulerState, SkipReason};
