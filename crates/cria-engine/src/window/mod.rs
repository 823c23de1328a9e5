//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, and wires them to the graphics
//! context and the frame scheduler.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
