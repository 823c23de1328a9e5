use cria_engine::scene::{Capabilities, Drawable, FrameContext, SetupCtx};
use cria_engine::shader::ShaderSource;
use cria_engine::util::create_buffer_init;

use super::common::{canvas_pipeline, ready, uniform_layout, PipelineDesc, TintUniform};
use crate::shaders;

const DEPTH: f32 = 0.9;

const POSITIONS: [[f32; 3]; 4] = [
    [-1.0, -1.0, DEPTH],
    [1.0, -1.0, DEPTH],
    [1.0, 1.0, DEPTH],
    [-1.0, 1.0, DEPTH],
];

const UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

const INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const UV_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];

const CHECKER_CELLS: u32 = 8;
const CHECKER_LIGHT: [u8; 4] = [200, 200, 210, 255];
const CHECKER_DARK: [u8; 4] = [40, 40, 60, 255];

/// RGBA8 checkerboard, `cells` x `cells` texels, top-left light.
fn checkerboard(cells: u32) -> Vec<u8> {
    (0..cells * cells)
        .flat_map(|i| {
            let (x, y) = (i % cells, i / cells);
            if (x + y) % 2 == 0 { CHECKER_LIGHT } else { CHECKER_DARK }
        })
        .collect()
}

/// Full-canvas indexed quad sampling a checkerboard, modulated by a tint.
///
/// Positions and uvs live in separate vertex buffers (slots 0 and 1).
pub struct TexturedPlane {
    tint: [f32; 3],

    shader: Option<wgpu::ShaderModule>,
    positions: Option<wgpu::Buffer>,
    uvs: Option<wgpu::Buffer>,
    indices: Option<wgpu::Buffer>,

    uniform_layout: Option<wgpu::BindGroupLayout>,
    texture_layout: Option<wgpu::BindGroupLayout>,
    pipeline: Option<wgpu::RenderPipeline>,

    uniform_group: Option<wgpu::BindGroup>,
    texture_group: Option<wgpu::BindGroup>,
}

impl TexturedPlane {
    pub fn new(tint: [f32; 3]) -> Self {
        Self {
            tint,
            shader: None,
            positions: None,
            uvs: None,
            indices: None,
            uniform_layout: None,
            texture_layout: None,
            pipeline: None,
            uniform_group: None,
            texture_group: None,
        }
    }

    fn texture_bgl(setup: &SetupCtx<'_>) -> wgpu::BindGroupLayout {
        setup
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("cria plane texture bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            })
    }
}

impl Drawable for TexturedPlane {
    fn label(&self) -> &str {
        "textured plane"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::UNIFORMS | Capabilities::TEXTURE
    }

    fn init_shader_stage(&mut self, setup: &SetupCtx<'_>, source: &ShaderSource) -> anyhow::Result<()> {
        self.shader = Some(source.module(setup.device, shaders::TEXTURED_PLANE)?);
        Ok(())
    }

    fn init_attribute_storage(&mut self, setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        let device = setup.device;
        self.positions = Some(create_buffer_init(
            device,
            "cria plane positions",
            &POSITIONS,
            wgpu::BufferUsages::VERTEX,
        ));
        self.uvs = Some(create_buffer_init(device, "cria plane uvs", &UVS, wgpu::BufferUsages::VERTEX));
        self.indices = Some(create_buffer_init(
            device,
            "cria plane indices",
            &INDICES,
            wgpu::BufferUsages::INDEX,
        ));
        Ok(())
    }

    fn init_pipeline(&mut self, setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        let shader = ready(&self.shader, "shader stage")?;
        let uniforms = uniform_layout(setup, "cria plane uniform bgl");
        let texture = Self::texture_bgl(setup);

        let pipeline = canvas_pipeline(
            setup,
            PipelineDesc {
                label: "cria plane pipeline",
                shader,
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &POSITION_ATTRS,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &UV_ATTRS,
                    },
                ],
                bind_group_layouts: &[&uniforms, &texture],
            },
        )?;

        self.pipeline = Some(pipeline);
        self.uniform_layout = Some(uniforms);
        self.texture_layout = Some(texture);
        Ok(())
    }

    fn init_uniforms(&mut self, setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        let layout = ready(&self.uniform_layout, "pipeline")?;

        let ubo = create_buffer_init(
            setup.device,
            "cria plane tint ubo",
            &[TintUniform::new(self.tint)],
            wgpu::BufferUsages::UNIFORM,
        );
        self.uniform_group = Some(setup.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cria plane uniform bind group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        }));
        Ok(())
    }

    fn init_texture(&mut self, setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        let layout = ready(&self.texture_layout, "pipeline")?;

        let size = wgpu::Extent3d {
            width: CHECKER_CELLS,
            height: CHECKER_CELLS,
            depth_or_array_layers: 1,
        };
        let texture = setup.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("cria plane checkerboard"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        setup.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &checkerboard(CHECKER_CELLS),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * CHECKER_CELLS),
                rows_per_image: Some(CHECKER_CELLS),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = setup.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("cria plane sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        self.texture_group = Some(setup.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cria plane texture bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        }));
        Ok(())
    }

    fn render(&self, ctx: &mut FrameContext<'_>) {
        let (Some(pipeline), Some(positions), Some(uvs), Some(indices)) = (
            self.pipeline.as_ref(),
            self.positions.as_ref(),
            self.uvs.as_ref(),
            self.indices.as_ref(),
        ) else {
            return;
        };
        let (Some(uniforms), Some(texture)) = (self.uniform_group.as_ref(), self.texture_group.as_ref())
        else {
            return;
        };

        ctx.pass.set_pipeline(pipeline);
        ctx.pass.set_bind_group(0, uniforms);
        ctx.pass.set_bind_group(1, texture);
        ctx.pass.set_vertex_buffer(0, positions.slice(..));
        ctx.pass.set_vertex_buffer(1, uvs.slice(..));
        ctx.pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint16);
        ctx.pass.draw_indexed(0..INDICES.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates_cells() {
        let texels = checkerboard(4);
        assert_eq!(texels.len(), 4 * 4 * 4);
        assert_eq!(texels[0..4], CHECKER_LIGHT);
        assert_eq!(texels[4..8], CHECKER_DARK);
        // First texel of the second row is dark.
        assert_eq!(texels[16..20], CHECKER_DARK);
    }

    #[test]
    fn quad_is_two_ccw_triangles() {
        for tri in INDICES.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| POSITIONS[i as usize]);
            let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            assert!(cross > 0.0, "triangle {tri:?} is not counter-clockwise");
        }
    }
}
