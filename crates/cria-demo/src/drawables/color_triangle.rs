use bytemuck::{Pod, Zeroable};

use cria_engine::scene::{Drawable, FrameContext, SetupCtx};
use cria_engine::shader::ShaderSource;
use cria_engine::util::create_buffer_init;

use super::common::{canvas_pipeline, ready, PipelineDesc};
use crate::shaders;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ColorVertex {
    pos: [f32; 3],
    color: [f32; 4],
}

impl ColorVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // pos
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const VERTICES: [ColorVertex; 3] = [
    ColorVertex { pos: [0.0, 0.5, 0.1], color: [1.0, 0.0, 0.0, 1.0] },
    ColorVertex { pos: [-0.5, -0.5, 0.1], color: [0.0, 1.0, 0.0, 1.0] },
    ColorVertex { pos: [0.5, -0.5, 0.1], color: [0.0, 0.0, 1.0, 1.0] },
];

/// Vertex-colored triangle in the middle of the canvas.
#[derive(Default)]
pub struct ColorTriangle {
    shader: Option<wgpu::ShaderModule>,
    vbo: Option<wgpu::Buffer>,
    pipeline: Option<wgpu::RenderPipeline>,
}

impl ColorTriangle {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Drawable for ColorTriangle {
    fn label(&self) -> &str {
        "color triangle"
    }

    fn init_shader_stage(&mut self, setup: &SetupCtx<'_>, source: &ShaderSource) -> anyhow::Result<()> {
        self.shader = Some(source.module(setup.device, shaders::COLOR_TRIANGLE)?);
        Ok(())
    }

    fn init_attribute_storage(&mut self, setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        self.vbo = Some(create_buffer_init(
            setup.device,
            "cria color triangle vbo",
            &VERTICES,
            wgpu::BufferUsages::VERTEX,
        ));
        Ok(())
    }

    fn init_pipeline(&mut self, setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        let shader = ready(&self.shader, "shader stage")?;
        self.pipeline = Some(canvas_pipeline(
            setup,
            PipelineDesc {
                label: "cria color triangle pipeline",
                shader,
                buffers: &[ColorVertex::layout()],
                bind_group_layouts: &[],
            },
        )?);
        Ok(())
    }

    fn render(&self, ctx: &mut FrameContext<'_>) {
        let (Some(pipeline), Some(vbo)) = (self.pipeline.as_ref(), self.vbo.as_ref()) else {
            return;
        };

        ctx.pass.set_pipeline(pipeline);
        ctx.pass.set_vertex_buffer(0, vbo.slice(..));
        ctx.pass.draw(0..VERTICES.len() as u32, 0..1);
    }
}
