//! Offscreen render targets (multisample color + depth).
//!
//! Targets follow the surface size. `RenderTargetManager::reconcile` is called once per
//! frame and only does work when the clamped surface size actually changes.

mod allocator;
mod manager;

pub use allocator::{TargetAllocator, TargetKind, TargetRequest};
pub use manager::{Reconcile, RenderTargetManager};

/// Surface dimensions in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clamps each axis to `1..=max_dimension`.
    ///
    /// Never yields a zero axis, even when `max_dimension` is zero.
    #[inline]
    pub fn clamped(self, max_dimension: u32) -> Self {
        let max = max_dimension.max(1);
        Self {
            width: self.width.clamp(1, max),
            height: self.height.clamp(1, max),
        }
    }
}

impl std::fmt::Display for SurfaceSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for SurfaceSize {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_never_yields_zero() {
        assert_eq!(SurfaceSize::new(0, 0).clamped(8192), SurfaceSize::new(1, 1));
        assert_eq!(SurfaceSize::new(0, 600).clamped(8192), SurfaceSize::new(1, 600));
    }

    #[test]
    fn clamp_respects_device_limit() {
        assert_eq!(SurfaceSize::new(20_000, 300).clamped(8192), SurfaceSize::new(8192, 300));
        assert_eq!(SurfaceSize::new(5, 5).clamped(0), SurfaceSize::new(1, 1));
    }

    #[test]
    fn clamp_matches_min_max_formula() {
        let limit = 2048;
        for observed in [0u32, 1, 2, 799, 2047, 2048, 2049, u32::MAX] {
            let got = SurfaceSize::new(observed, observed).clamped(limit);
            let expected = observed.min(limit).max(1);
            assert_eq!(got.width, expected);
            assert_eq!(got.height, expected);
        }
    }
}
