/// Depth attachment format used for every depth target and pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// MSAA sample count. Only 1x and 4x are supported.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum SampleCount {
    Single,
    #[default]
    Four,
}

impl SampleCount {
    #[inline]
    pub const fn get(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Four => 4,
        }
    }

    #[inline]
    pub const fn is_multisampled(self) -> bool {
        matches!(self, Self::Four)
    }
}

impl TryFrom<u32> for SampleCount {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, u32> {
        match value {
            1 => Ok(Self::Single),
            4 => Ok(Self::Four),
            other => Err(other),
        }
    }
}

/// Host-side renderer settings, chosen before the device exists.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RendererSettings {
    pub depth: bool,
    pub sample_count: SampleCount,
}

/// Canvas configuration shared read-only with drawables.
///
/// `format` is the surface format picked at initialization; the rest comes from
/// `RendererSettings` and never changes for the lifetime of the context.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CanvasConfig {
    pub format: wgpu::TextureFormat,
    pub depth: bool,
    pub sample_count: SampleCount,
}

impl CanvasConfig {
    pub fn new(format: wgpu::TextureFormat, settings: RendererSettings) -> Self {
        Self {
            format,
            depth: settings.depth,
            sample_count: settings.sample_count,
        }
    }

    /// Multisample state every pipeline drawing into this canvas must use.
    pub fn multisample_state(&self) -> wgpu::MultisampleState {
        wgpu::MultisampleState {
            count: self.sample_count.get(),
            mask: !0,
            alpha_to_coverage_enabled: false,
        }
    }

    /// Depth-stencil state for pipelines, or `None` when depth is disabled.
    pub fn depth_stencil_state(&self) -> Option<wgpu::DepthStencilState> {
        self.depth.then(|| wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        })
    }

    /// Single color target matching the surface format.
    pub fn color_target(&self, blend: Option<wgpu::BlendState>) -> wgpu::ColorTargetState {
        wgpu::ColorTargetState {
            format: self.format,
            blend,
            write_mask: wgpu::ColorWrites::ALL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count_accepts_only_one_and_four() {
        assert_eq!(SampleCount::try_from(1), Ok(SampleCount::Single));
        assert_eq!(SampleCount::try_from(4), Ok(SampleCount::Four));
        assert_eq!(SampleCount::try_from(2), Err(2));
        assert_eq!(SampleCount::try_from(8), Err(8));
    }

    #[test]
    fn pipeline_states_follow_settings() {
        let canvas = CanvasConfig::new(
            wgpu::TextureFormat::Bgra8UnormSrgb,
            RendererSettings { depth: false, sample_count: SampleCount::Four },
        );
        assert_eq!(canvas.multisample_state().count, 4);
        assert!(canvas.depth_stencil_state().is_none());

        let canvas = CanvasConfig::new(
            wgpu::TextureFormat::Bgra8UnormSrgb,
            RendererSettings { depth: true, sample_count: SampleCount::Single },
        );
        assert_eq!(canvas.multisample_state().count, 1);
        assert_eq!(canvas.depth_stencil_state().map(|d| d.format), Some(DEPTH_FORMAT));
    }
}
