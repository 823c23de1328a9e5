use std::sync::Arc;

use crate::error::{RenderError, Result};
use crate::frame::FrameBackend;
use crate::pass::PassBinding;
use crate::scene::{PassEncoder, SetupCtx};
use crate::targets::SurfaceSize;

use super::surface::{self, SurfaceErrorAction};
use super::{CanvasConfig, GpuInit, RendererSettings, SurfaceFrame, TextureAllocator, DEPTH_FORMAT};

/// Owns the wgpu objects for one window and the canvas they render into.
///
/// `'w` ties the surface to the window it was created from; the window must outlive
/// the context.
pub struct GraphicsContext<'w> {
    /// Kept alive for the lifetime of the surface.
    #[allow(dead_code)]
    instance: wgpu::Instance,

    surface: wgpu::Surface<'w>,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,

    config: wgpu::SurfaceConfiguration,
    canvas: CanvasConfig,
    allocator: TextureAllocator,

    /// Size last requested by the window, possibly empty.
    requested: SurfaceSize,
}

impl<'w> GraphicsContext<'w> {
    /// Acquires adapter and device and configures the surface.
    ///
    /// Fails with `UnsupportedPlatform` when no GPU API is usable here, and with
    /// `DeviceAcquisitionFailed` when the adapter or device cannot be obtained or
    /// cannot render at the requested sample count. Nothing is retried.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        size: SurfaceSize,
        init: GpuInit,
        settings: RendererSettings,
    ) -> Result<Self> {
        let GpuInit {
            backends,
            power_preference,
            prefer_srgb,
            present_mode,
            alpha_mode,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        let backends = backends & wgpu::Instance::enabled_backend_features();
        if backends.is_empty() {
            return Err(RenderError::unsupported("no GPU backend is available"));
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(target)
            .map_err(|err| RenderError::unsupported(format!("cannot create surface: {err}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|err| RenderError::device(format!("no suitable adapter: {err}")))?;

        let info = adapter.get_info();
        log::info!("using adapter `{}` ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("cria device"),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|err| RenderError::device(format!("device request failed: {err}")))?;

        // Errors outside an explicit scope are logged instead of panicking.
        device.on_uncaptured_error(Arc::new(|err| {
            log::error!("uncaptured wgpu error: {err}");
        }));

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats, prefer_srgb)
            .ok_or_else(|| RenderError::device("surface reports no formats for this adapter"))?;
        let canvas = CanvasConfig::new(format, settings);

        check_sample_count(&adapter, &canvas)?;
        log::info!(
            "canvas: {format:?}, {}x samples, depth {}",
            canvas.sample_count.get(),
            if canvas.depth { "on" } else { "off" }
        );

        let max_dimension = device.limits().max_texture_dimension_2d;
        let initial = size.clamped(max_dimension);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: initial.width,
            height: initial.height,
            present_mode,
            alpha_mode: surface::choose_alpha_mode(&caps.alpha_modes, alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency,
        };
        surface.configure(&device, &config);

        let allocator = TextureAllocator::new(device.clone(), &adapter, &canvas);

        Ok(Self {
            instance,
            surface,
            adapter,
            device,
            queue,
            config,
            canvas,
            allocator,
            requested: size,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }

    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Size the window last asked for. Empty while minimized.
    pub fn surface_size(&self) -> SurfaceSize {
        self.requested
    }

    /// Size the surface is actually configured at.
    pub fn configured_size(&self) -> SurfaceSize {
        SurfaceSize::new(self.config.width, self.config.height)
    }

    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    /// Handles borrowed by drawables during initialization.
    pub fn setup_ctx(&self) -> SetupCtx<'_> {
        SetupCtx {
            device: &self.device,
            queue: &self.queue,
            canvas: &self.canvas,
        }
    }

    /// Records the new window size and reconfigures the surface.
    ///
    /// wgpu rejects 0x0 surfaces, so an empty size only updates the request and
    /// defers configuration. Dimensions are clamped to the device limit.
    pub fn resize(&mut self, size: impl Into<SurfaceSize>) {
        self.requested = size.into();

        let Some(size) = surface::configurable_size(self.requested, self.max_texture_dimension()) else {
            return;
        };
        if size == self.configured_size() {
            return;
        }

        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
        log::debug!("surface reconfigured at {size}");
    }

    /// Converts an acquire error into an action, reconfiguring the surface when it
    /// was lost or outdated.
    pub fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        let action = surface::classify_surface_error(&err);
        match action {
            SurfaceErrorAction::Reconfigured => {
                if !self.requested.is_empty() {
                    self.surface.configure(&self.device, &self.config);
                }
                log::warn!("surface {err}; reconfigured");
            }
            SurfaceErrorAction::SkipFrame => log::warn!("surface {err}; skipping frame"),
            SurfaceErrorAction::Fatal => log::error!("surface {err}"),
        }
        action
    }
}

impl FrameBackend for GraphicsContext<'_> {
    type View = wgpu::TextureView;
    type Frame = SurfaceFrame;
    type Commands = wgpu::CommandBuffer;
    type Allocator = TextureAllocator;

    fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    fn surface_size(&self) -> SurfaceSize {
        self.requested
    }

    fn allocator(&mut self) -> &mut TextureAllocator {
        &mut self.allocator
    }

    fn acquire(&mut self) -> std::result::Result<SurfaceFrame, SurfaceErrorAction> {
        if self.requested.is_empty() {
            return Err(SurfaceErrorAction::SkipFrame);
        }

        match self.surface.get_current_texture() {
            Ok(texture) => Ok(SurfaceFrame::new(texture)),
            Err(err) => Err(self.handle_surface_error(err)),
        }
    }

    fn frame_view(frame: &SurfaceFrame) -> &wgpu::TextureView {
        &frame.view
    }

    fn encode(
        &mut self,
        binding: PassBinding<'_, wgpu::TextureView>,
        record: &mut dyn FnMut(&mut dyn PassEncoder),
    ) -> wgpu::CommandBuffer {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("cria frame encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(binding.variant.label()),
                color_attachments: &[Some(binding.color_attachment())],
                depth_stencil_attachment: binding.depth_attachment(),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            record(&mut pass);
        }

        encoder.finish()
    }

    fn submit(&mut self, frame: SurfaceFrame, commands: wgpu::CommandBuffer) {
        self.queue.submit(std::iter::once(commands));

        let SurfaceFrame { surface_texture, view } = frame;
        drop(view);
        surface_texture.present();
    }
}

fn check_sample_count(adapter: &wgpu::Adapter, canvas: &CanvasConfig) -> Result<()> {
    let samples = canvas.sample_count.get();
    if samples == 1 {
        return Ok(());
    }

    let mut formats = vec![canvas.format];
    if canvas.depth {
        formats.push(DEPTH_FORMAT);
    }

    for format in formats {
        let flags = adapter.get_texture_format_features(format).flags;
        if !flags.sample_count_supported(samples) {
            return Err(RenderError::device(format!(
                "{format:?} does not support {samples}x multisampling on this adapter"
            )));
        }
    }
    Ok(())
}
