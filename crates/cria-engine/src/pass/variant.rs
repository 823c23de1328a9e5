use crate::device::CanvasConfig;

/// Shape of the per-frame render pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PassVariant {
    /// Surface view is the only attachment.
    Basic,
    /// Surface view as color plus a single-sample depth attachment.
    Depth,
    /// Offscreen multisample color, resolved into the surface view.
    Multisampled,
    /// `Multisampled` plus a multisample depth attachment.
    DepthMultisampled,
}

impl PassVariant {
    /// Pure selection from `(multisampled, depth)`.
    pub const fn select(multisampled: bool, depth: bool) -> Self {
        match (multisampled, depth) {
            (false, false) => Self::Basic,
            (false, true) => Self::Depth,
            (true, false) => Self::Multisampled,
            (true, true) => Self::DepthMultisampled,
        }
    }

    pub fn for_canvas(canvas: &CanvasConfig) -> Self {
        Self::select(canvas.sample_count.is_multisampled(), canvas.depth)
    }

    #[inline]
    pub const fn resolves(self) -> bool {
        matches!(self, Self::Multisampled | Self::DepthMultisampled)
    }

    #[inline]
    pub const fn has_depth(self) -> bool {
        matches!(self, Self::Depth | Self::DepthMultisampled)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "cria basic pass",
            Self::Depth => "cria depth pass",
            Self::Multisampled => "cria multisampled pass",
            Self::DepthMultisampled => "cria depth multisampled pass",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{RendererSettings, SampleCount};

    #[test]
    fn selection_covers_all_combinations() {
        assert_eq!(PassVariant::select(false, false), PassVariant::Basic);
        assert_eq!(PassVariant::select(false, true), PassVariant::Depth);
        assert_eq!(PassVariant::select(true, false), PassVariant::Multisampled);
        assert_eq!(PassVariant::select(true, true), PassVariant::DepthMultisampled);
    }

    #[test]
    fn selection_is_deterministic() {
        for ms in [false, true] {
            for depth in [false, true] {
                let first = PassVariant::select(ms, depth);
                assert!((0..8).all(|_| PassVariant::select(ms, depth) == first));
                assert_eq!(first.resolves(), ms);
                assert_eq!(first.has_depth(), depth);
            }
        }
    }

    #[test]
    fn canvas_maps_to_variant() {
        let canvas = CanvasConfig::new(
            wgpu::TextureFormat::Rgba8UnormSrgb,
            RendererSettings { depth: true, sample_count: SampleCount::Four },
        );
        assert_eq!(PassVariant::for_canvas(&canvas), PassVariant::DepthMultisampled);
    }
}
