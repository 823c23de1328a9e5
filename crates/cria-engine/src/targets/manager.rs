use crate::device::SampleCount;
use crate::error::Result;

use super::{SurfaceSize, TargetAllocator, TargetKind, TargetRequest};

/// Result of a `reconcile` call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Reconcile {
    /// Targets already match the surface; nothing was touched.
    Unchanged,
    /// Targets were released and recreated at `size`.
    Reallocated { size: SurfaceSize },
}

/// Keeps the offscreen targets consistent with the surface size.
///
/// A color target exists iff the sample count is above one, a depth target iff depth
/// is enabled. Both are fixed at construction.
pub struct RenderTargetManager<A: TargetAllocator> {
    sample_count: SampleCount,
    depth_enabled: bool,

    /// Size the current targets were created at. `None` until the first successful
    /// reconcile, and again after a failed one so the next frame retries.
    size: Option<SurfaceSize>,

    color: Option<A::Target>,
    depth: Option<A::Target>,

    reallocations: u64,
}

impl<A: TargetAllocator> RenderTargetManager<A> {
    pub fn new(sample_count: SampleCount, depth_enabled: bool) -> Self {
        Self {
            sample_count,
            depth_enabled,
            size: None,
            color: None,
            depth: None,
            reallocations: 0,
        }
    }

    /// Brings targets in line with the observed surface size.
    ///
    /// Existing targets are released before any replacement is allocated. On failure the
    /// stored size is cleared, so the next call reallocates again.
    pub fn reconcile(&mut self, allocator: &mut A, observed: SurfaceSize) -> Result<Reconcile> {
        let size = observed.clamped(allocator.max_dimension());

        // Nothing to allocate: the pass renders straight into the surface.
        if !self.requires_targets() {
            self.size = Some(size);
            return Ok(Reconcile::Unchanged);
        }

        if !self.needs_reallocation(size) {
            return Ok(Reconcile::Unchanged);
        }

        self.release_targets(allocator);
        self.size = None;

        if self.sample_count.is_multisampled() {
            let target = allocator.allocate(self.request(TargetKind::Color, size))?;
            self.color = Some(target);
        }

        if self.depth_enabled {
            let target = allocator.allocate(self.request(TargetKind::Depth, size))?;
            self.depth = Some(target);
        }

        self.size = Some(size);
        self.reallocations += 1;
        log::debug!(
            "render targets reconciled at {size} (color: {}, depth: {})",
            self.color.is_some(),
            self.depth.is_some()
        );

        Ok(Reconcile::Reallocated { size })
    }

    /// Releases every target. Used on teardown; the next `reconcile` reallocates.
    pub fn release_all(&mut self, allocator: &mut A) {
        self.release_targets(allocator);
        self.size = None;
    }

    /// Size the current targets were created at.
    pub fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    pub fn sample_count(&self) -> SampleCount {
        self.sample_count
    }

    pub fn depth_enabled(&self) -> bool {
        self.depth_enabled
    }

    pub fn has_color(&self) -> bool {
        self.color.is_some()
    }

    pub fn has_depth(&self) -> bool {
        self.depth.is_some()
    }

    /// Number of successful reallocations so far.
    pub fn reallocations(&self) -> u64 {
        self.reallocations
    }

    pub fn color_view(&self) -> Option<&A::View> {
        self.color.as_ref().map(A::view)
    }

    pub fn depth_view(&self) -> Option<&A::View> {
        self.depth.as_ref().map(A::view)
    }

    fn requires_targets(&self) -> bool {
        self.sample_count.is_multisampled() || self.depth_enabled
    }

    fn needs_reallocation(&self, size: SurfaceSize) -> bool {
        let missing_color = self.sample_count.is_multisampled() && self.color.is_none();
        let missing_depth = self.depth_enabled && self.depth.is_none();
        missing_color || missing_depth || self.size != Some(size)
    }

    fn release_targets(&mut self, allocator: &mut A) {
        if let Some(color) = self.color.take() {
            allocator.release(color);
        }
        if let Some(depth) = self.depth.take() {
            allocator.release(depth);
        }
    }

    fn request(&self, kind: TargetKind, size: SurfaceSize) -> TargetRequest {
        TargetRequest {
            kind,
            size,
            sample_count: self.sample_count,
        }
    }
}
