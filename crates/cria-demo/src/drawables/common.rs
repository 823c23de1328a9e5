use anyhow::Context as _;
use bytemuck::{Pod, Zeroable};

use cria_engine::scene::SetupCtx;
use cria_engine::util::{capture_errors, VALIDATION};

/// Fragment tint: one vec3 padded to 16 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct TintUniform {
    pub color: [f32; 3],
    pub _pad: f32,
}

impl TintUniform {
    pub fn new(color: [f32; 3]) -> Self {
        Self { color, _pad: 0.0 }
    }
}

pub(super) fn uniform_layout(setup: &SetupCtx<'_>, label: &str) -> wgpu::BindGroupLayout {
    setup
        .device
        .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<TintUniform>() as u64),
                },
                count: None,
            }],
        })
}

/// Everything that differs between the demo pipelines.
pub(super) struct PipelineDesc<'a> {
    pub label: &'a str,
    pub shader: &'a wgpu::ShaderModule,
    pub buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
}

/// Builds a triangle-list pipeline targeting the canvas: surface format, canvas
/// sample count and, when enabled, the depth attachment.
///
/// Fails if the device rejects the layout or the pipeline, e.g. a shader missing
/// `vs_main`/`fs_main` or with mismatched vertex inputs.
pub(super) fn canvas_pipeline(setup: &SetupCtx<'_>, desc: PipelineDesc<'_>) -> anyhow::Result<wgpu::RenderPipeline> {
    let device = setup.device;
    let (pipeline, rejected) = capture_errors(device, VALIDATION, || {
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(desc.label),
            bind_group_layouts: desc.bind_group_layouts,
            immediate_size: 0,
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&layout),

            vertex: wgpu::VertexState {
                module: desc.shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: desc.buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: desc.shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(setup.canvas.color_target(None))],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: setup.canvas.depth_stencil_state(),
            multisample: setup.canvas.multisample_state(),

            multiview_mask: None,
            cache: None,
        })
    });

    match rejected {
        Some(err) => Err(anyhow::Error::new(err).context(format!("device rejected `{}`", desc.label))),
        None => Ok(pipeline),
    }
}

/// Returns the value of a stage that must already have run.
pub(super) fn ready<'a, T>(slot: &'a Option<T>, stage: &str) -> anyhow::Result<&'a T> {
    slot.as_ref().with_context(|| format!("{stage} has not run"))
}
