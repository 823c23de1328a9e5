//! Drawable contract and the ordered scene the frame loop walks.
//!
//! - `Drawable`: required init stages + optional capabilities + `render`
//! - `PassEncoder`: the append-only view of the open render pass
//! - `SceneGraph`: insertion-ordered drawables, rendered one after another

mod drawable;
mod encoder;
mod graph;

pub use drawable::{initialize, Capabilities, Drawable, FrameContext, InitStage, SetupCtx};
pub use encoder::PassEncoder;
pub use graph::SceneGraph;
