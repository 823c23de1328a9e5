use crate::device::SampleCount;
use crate::error::Result;

use super::SurfaceSize;

/// Which offscreen target a request is for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TargetKind {
    /// Multisampled color target, resolved into the surface.
    Color,
    /// Depth target.
    Depth,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Color => "color",
            Self::Depth => "depth",
        })
    }
}

/// Parameters of a single target allocation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TargetRequest {
    pub kind: TargetKind,
    pub size: SurfaceSize,
    pub sample_count: SampleCount,
}

/// Creates and destroys offscreen textures on behalf of `RenderTargetManager`.
///
/// The GPU implementation is `device::TextureAllocator`.
pub trait TargetAllocator {
    /// View type bound into render passes.
    type View;

    /// Owned target (texture + view).
    type Target;

    /// Largest texture dimension the device accepts.
    fn max_dimension(&self) -> u32;

    fn allocate(&mut self, request: TargetRequest) -> Result<Self::Target>;

    /// Destroys `target`. The allocation is gone when this returns.
    fn release(&mut self, target: Self::Target);

    fn view(target: &Self::Target) -> &Self::View;
}
