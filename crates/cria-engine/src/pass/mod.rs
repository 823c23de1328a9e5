//! Render-pass descriptor selection.
//!
//! The pass shape (`PassVariant`) and its load/store ops are chosen once from the
//! canvas configuration. Every frame only the attachment views change; they are
//! filled in by `RenderPassBuilder::bind_views`.

mod builder;
mod variant;

pub use builder::{PassBinding, PassOps, RenderPassBuilder, CLEAR_COLOR, CLEAR_DEPTH};
pub use variant::PassVariant;
