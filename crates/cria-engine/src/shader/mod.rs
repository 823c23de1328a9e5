//! WGSL source lookup.
//!
//! Drawables receive a [`ShaderSource`] during `init_shader_stage` and resolve their
//! own shader ids through it. Two loaders are provided:
//! - [`DirShaderLoader`]: reads `<root>/<id>.wgsl` from disk
//! - [`StaticShaderLoader`]: serves sources compiled into the binary

mod loader;

pub use loader::{DirShaderLoader, ShaderLoader, ShaderSource, StaticShaderLoader};
