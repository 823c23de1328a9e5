//! Cria engine crate.
//!
//! A minimal real-time renderer on wgpu: one window, one surface, one render pass per
//! frame. Drawables are initialized once and recorded into the pass in insertion
//! order; MSAA and depth targets follow the surface size.

pub mod core;
pub mod device;
pub mod error;
pub mod frame;
pub mod logging;
pub mod pass;
pub mod scene;
pub mod shader;
pub mod targets;
pub mod time;
pub mod util;
pub mod window;

pub use error::{RenderError, Result};
