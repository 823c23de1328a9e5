use crate::error::{RenderError, Result};
use crate::targets::{TargetAllocator, TargetKind, TargetRequest};
use crate::util::{capture_errors, ALLOCATION};

use super::{CanvasConfig, DEPTH_FORMAT};

/// Offscreen texture plus its default view.
pub struct OffscreenTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

/// `TargetAllocator` backed by a wgpu device.
///
/// Requests the device cannot satisfy (sample count unsupported by the format, size
/// over the limit) are rejected up front. Anything the device still refuses, including
/// running out of memory, is caught in an error scope. Both surface as
/// `ResourceAllocationFailed`.
pub struct TextureAllocator {
    device: wgpu::Device,
    color_format: wgpu::TextureFormat,
    max_dimension: u32,

    /// Sample-count support per format, queried from the adapter at init.
    color_features: wgpu::TextureFormatFeatureFlags,
    depth_features: wgpu::TextureFormatFeatureFlags,
}

impl TextureAllocator {
    pub(crate) fn new(device: wgpu::Device, adapter: &wgpu::Adapter, canvas: &CanvasConfig) -> Self {
        let max_dimension = device.limits().max_texture_dimension_2d;
        Self::with_capabilities(
            device,
            canvas.format,
            max_dimension,
            adapter.get_texture_format_features(canvas.format).flags,
            adapter.get_texture_format_features(DEPTH_FORMAT).flags,
        )
    }

    fn with_capabilities(
        device: wgpu::Device,
        color_format: wgpu::TextureFormat,
        max_dimension: u32,
        color_features: wgpu::TextureFormatFeatureFlags,
        depth_features: wgpu::TextureFormatFeatureFlags,
    ) -> Self {
        Self {
            device,
            color_format,
            max_dimension,
            color_features,
            depth_features,
        }
    }

    fn format_for(&self, kind: TargetKind) -> (wgpu::TextureFormat, wgpu::TextureFormatFeatureFlags) {
        match kind {
            TargetKind::Color => (self.color_format, self.color_features),
            TargetKind::Depth => (DEPTH_FORMAT, self.depth_features),
        }
    }

    fn reject(request: &TargetRequest, reason: impl Into<String>) -> RenderError {
        RenderError::ResourceAllocationFailed {
            kind: request.kind,
            width: request.size.width,
            height: request.size.height,
            reason: reason.into(),
        }
    }
}

impl TargetAllocator for TextureAllocator {
    type View = wgpu::TextureView;
    type Target = OffscreenTarget;

    fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    fn allocate(&mut self, request: TargetRequest) -> Result<OffscreenTarget> {
        let (format, features) = self.format_for(request.kind);
        let samples = request.sample_count.get();

        if request.size.is_empty()
            || request.size.width > self.max_dimension
            || request.size.height > self.max_dimension
        {
            return Err(Self::reject(&request, format!("limit is {}", self.max_dimension)));
        }
        if samples > 1 && !features.sample_count_supported(samples) {
            return Err(Self::reject(&request, format!("{format:?} does not support {samples}x MSAA")));
        }

        let label = match request.kind {
            TargetKind::Color => "cria msaa color target",
            TargetKind::Depth => "cria depth target",
        };

        let device = &self.device;
        let (target, refused) = capture_errors(device, ALLOCATION, || {
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: request.size.width,
                    height: request.size.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: samples,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            OffscreenTarget { texture, view }
        });

        match refused {
            Some(err) => {
                log::warn!("device refused {} target at {}: {err}", request.kind, request.size);
                Err(Self::reject(&request, err.to_string()))
            }
            None => Ok(target),
        }
    }

    fn release(&mut self, target: OffscreenTarget) {
        let OffscreenTarget { texture, view } = target;
        drop(view);
        texture.destroy();
    }

    fn view(target: &OffscreenTarget) -> &wgpu::TextureView {
        &target.view
    }
}
