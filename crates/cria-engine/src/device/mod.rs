//! GPU device, surface and canvas.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - picking the surface format and configuring the surface
//! - acquiring and presenting surface frames
//! - allocating the offscreen (MSAA color, depth) textures

mod allocator;
mod canvas;
mod context;
mod frame;
mod init;
mod surface;

pub use allocator::{OffscreenTarget, TextureAllocator};
pub use canvas::{CanvasConfig, RendererSettings, SampleCount, DEPTH_FORMAT};
pub use context::GraphicsContext;
pub use frame::SurfaceFrame;
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
