use cria_engine::scene::{Capabilities, Drawable, FrameContext, SetupCtx};
use cria_engine::shader::ShaderSource;
use cria_engine::util::create_buffer_init;

use super::common::{canvas_pipeline, ready, uniform_layout, PipelineDesc, TintUniform};
use crate::shaders;

const POSITIONS: [[f32; 3]; 3] = [[0.0, 1.0, 0.5], [-1.0, -1.0, 0.5], [1.0, -1.0, 0.5]];

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

/// Large triangle filled with a single uniform color.
pub struct TintedTriangle {
    tint: [f32; 3],

    shader: Option<wgpu::ShaderModule>,
    vbo: Option<wgpu::Buffer>,
    uniform_layout: Option<wgpu::BindGroupLayout>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
}

impl TintedTriangle {
    pub fn new(tint: [f32; 3]) -> Self {
        Self {
            tint,
            shader: None,
            vbo: None,
            uniform_layout: None,
            pipeline: None,
            bind_group: None,
        }
    }
}

impl Drawable for TintedTriangle {
    fn label(&self) -> &str {
        "tinted triangle"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::UNIFORMS
    }

    fn init_shader_stage(&mut self, setup: &SetupCtx<'_>, source: &ShaderSource) -> anyhow::Result<()> {
        self.shader = Some(source.module(setup.device, shaders::TINTED_TRIANGLE)?);
        Ok(())
    }

    fn init_attribute_storage(&mut self, setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        self.vbo = Some(create_buffer_init(
            setup.device,
            "cria tinted triangle vbo",
            &POSITIONS,
            wgpu::BufferUsages::VERTEX,
        ));
        Ok(())
    }

    fn init_pipeline(&mut self, setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        let shader = ready(&self.shader, "shader stage")?;
        let layout = uniform_layout(setup, "cria tinted triangle bgl");

        let pipeline = canvas_pipeline(
            setup,
            PipelineDesc {
                label: "cria tinted triangle pipeline",
                shader,
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &POSITION_ATTRS,
                }],
                bind_group_layouts: &[&layout],
            },
        )?;

        self.pipeline = Some(pipeline);
        self.uniform_layout = Some(layout);
        Ok(())
    }

    fn init_uniforms(&mut self, setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        let layout = ready(&self.uniform_layout, "pipeline")?;

        let ubo = create_buffer_init(
            setup.device,
            "cria tinted triangle ubo",
            &[TintUniform::new(self.tint)],
            wgpu::BufferUsages::UNIFORM,
        );
        let bind_group = setup.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cria tinted triangle bind group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.bind_group = Some(bind_group);
        Ok(())
    }

    fn render(&self, ctx: &mut FrameContext<'_>) {
        let (Some(pipeline), Some(vbo), Some(bind_group)) =
            (self.pipeline.as_ref(), self.vbo.as_ref(), self.bind_group.as_ref())
        else {
            return;
        };

        ctx.pass.set_pipeline(pipeline);
        ctx.pass.set_bind_group(0, bind_group);
        ctx.pass.set_vertex_buffer(0, vbo.slice(..));
        ctx.pass.draw(0..POSITIONS.len() as u32, 0..1);
    }
}
