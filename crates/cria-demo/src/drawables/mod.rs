//! Demo drawables.
//!
//! - `ColorTriangle`: interleaved position + color, required stages only
//! - `TintedTriangle`: positions plus a tint uniform (`UNIFORMS`)
//! - `TexturedPlane`: indexed quad with uvs, tint and a checkerboard (`UNIFORMS | TEXTURE`)

mod color_triangle;
mod common;
mod textured_plane;
mod tinted_triangle;

pub use color_triangle::ColorTriangle;
pub use textured_plane::TexturedPlane;
pub use tinted_triangle::TintedTriangle;
