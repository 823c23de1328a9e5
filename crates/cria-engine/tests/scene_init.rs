//! Drawable initialization against wgpu's noop device.

use cria_engine::device::{CanvasConfig, RendererSettings};
use cria_engine::error::RenderError;
use cria_engine::scene::{
    initialize, Capabilities, Drawable, FrameContext, InitStage, SceneGraph, SetupCtx,
};
use cria_engine::shader::{ShaderSource, StaticShaderLoader};

struct Gpu {
    device: wgpu::Device,
    queue: wgpu::Queue,
    canvas: CanvasConfig,
}

impl Gpu {
    fn noop() -> Self {
        let (device, queue) = wgpu::Device::noop(&wgpu::DeviceDescriptor::default());
        Self {
            device,
            queue,
            canvas: CanvasConfig::new(wgpu::TextureFormat::Bgra8UnormSrgb, RendererSettings::default()),
        }
    }

    fn setup(&self) -> SetupCtx<'_> {
        SetupCtx {
            device: &self.device,
            queue: &self.queue,
            canvas: &self.canvas,
        }
    }
}

fn shaders() -> ShaderSource {
    ShaderSource::new(StaticShaderLoader::new().with("bad", "this is not wgsl"))
}

/// Records every stage it is asked to run; optionally fails at one of them.
#[derive(Default)]
struct Staged {
    caps: Capabilities,
    fail_at: Option<InitStage>,
    calls: Vec<InitStage>,
}

impl Staged {
    fn step(&mut self, stage: InitStage) -> anyhow::Result<()> {
        self.calls.push(stage);
        match self.fail_at {
            Some(failing) if failing == stage => anyhow::bail!("{stage} exploded"),
            _ => Ok(()),
        }
    }
}

impl Drawable for Staged {
    fn label(&self) -> &str {
        "staged"
    }

    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn init_shader_stage(&mut self, _setup: &SetupCtx<'_>, _source: &ShaderSource) -> anyhow::Result<()> {
        self.step(InitStage::ShaderStage)
    }

    fn init_attribute_storage(&mut self, _setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        self.step(InitStage::AttributeStorage)
    }

    fn init_pipeline(&mut self, _setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        self.step(InitStage::Pipeline)
    }

    fn init_uniforms(&mut self, _setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        self.step(InitStage::Uniforms)
    }

    fn init_texture(&mut self, _setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        self.step(InitStage::Texture)
    }

    fn render(&self, _ctx: &mut FrameContext<'_>) {}
}

/// Compiles the `bad` shader during its shader stage.
struct BrokenShader;

impl Drawable for BrokenShader {
    fn label(&self) -> &str {
        "broken shader"
    }

    fn init_shader_stage(&mut self, setup: &SetupCtx<'_>, source: &ShaderSource) -> anyhow::Result<()> {
        source.module(setup.device, "bad")?;
        Ok(())
    }

    fn init_attribute_storage(&mut self, _setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    fn init_pipeline(&mut self, _setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    fn render(&self, _ctx: &mut FrameContext<'_>) {}
}

/// Creates an invalid texture but reports success.
struct SilentlyInvalid;

impl Drawable for SilentlyInvalid {
    fn label(&self) -> &str {
        "silently invalid"
    }

    fn init_shader_stage(&mut self, _setup: &SetupCtx<'_>, _source: &ShaderSource) -> anyhow::Result<()> {
        Ok(())
    }

    fn init_attribute_storage(&mut self, setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        let _texture = setup.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("zero sized"),
            size: wgpu::Extent3d {
                width: 0,
                height: 0,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        Ok(())
    }

    fn init_pipeline(&mut self, _setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    fn render(&self, _ctx: &mut FrameContext<'_>) {}
}

fn failed_stage(result: cria_engine::Result<()>) -> (String, InitStage, anyhow::Error) {
    match result {
        Err(RenderError::PipelineBuildFailed { drawable, stage, source }) => (drawable, stage, source),
        Err(other) => panic!("expected PipelineBuildFailed, got {other}"),
        Ok(()) => panic!("initialization unexpectedly succeeded"),
    }
}

#[test]
fn stages_run_in_fixed_order_with_all_capabilities() {
    let gpu = Gpu::noop();
    let mut drawable = Staged {
        caps: Capabilities::UNIFORMS | Capabilities::TEXTURE,
        ..Staged::default()
    };

    initialize(&mut drawable, &gpu.setup(), &shaders()).unwrap();

    assert_eq!(
        drawable.calls,
        [
            InitStage::ShaderStage,
            InitStage::AttributeStorage,
            InitStage::Pipeline,
            InitStage::Uniforms,
            InitStage::Texture,
        ]
    );
}

#[test]
fn undeclared_capabilities_are_skipped() {
    let gpu = Gpu::noop();
    let mut drawable = Staged {
        caps: Capabilities::TEXTURE,
        ..Staged::default()
    };

    initialize(&mut drawable, &gpu.setup(), &shaders()).unwrap();
    assert_eq!(drawable.calls.last(), Some(&InitStage::Texture));
    assert!(!drawable.calls.contains(&InitStage::Uniforms));
}

#[test]
fn failing_stage_stops_initialization_and_is_named() {
    let gpu = Gpu::noop();
    let mut drawable = Staged {
        caps: Capabilities::UNIFORMS,
        fail_at: Some(InitStage::Pipeline),
        ..Staged::default()
    };

    let (label, stage, source) = failed_stage(initialize(&mut drawable, &gpu.setup(), &shaders()));
    assert_eq!(label, "staged");
    assert_eq!(stage, InitStage::Pipeline);
    assert!(source.to_string().contains("pipeline exploded"));
    assert_eq!(drawable.calls.last(), Some(&InitStage::Pipeline));
}

#[test]
fn failed_drawable_is_never_added() {
    let gpu = Gpu::noop();
    let source = shaders();
    let mut scene = SceneGraph::new();
    scene.add(Staged::default(), &gpu.setup(), &source).unwrap();

    let failing = Staged {
        fail_at: Some(InitStage::Pipeline),
        ..Staged::default()
    };
    let (_, stage, _) = failed_stage(scene.add(failing, &gpu.setup(), &source));

    assert_eq!(stage, InitStage::Pipeline);
    assert_eq!(scene.len(), 1);
}

#[test]
fn rejected_wgsl_fails_the_shader_stage() {
    let gpu = Gpu::noop();
    let mut scene = SceneGraph::new();

    let (label, stage, source) = failed_stage(scene.add(BrokenShader, &gpu.setup(), &shaders()));

    assert_eq!(label, "broken shader");
    assert_eq!(stage, InitStage::ShaderStage);
    assert!(matches!(
        source.downcast_ref::<RenderError>(),
        Some(RenderError::ShaderRejected { id, .. }) if id == "bad"
    ));
    assert!(scene.is_empty());
}

#[test]
fn device_errors_fail_a_stage_that_reported_success() {
    let gpu = Gpu::noop();
    let mut scene = SceneGraph::new();

    let (_, stage, source) = failed_stage(scene.add(SilentlyInvalid, &gpu.setup(), &shaders()));

    assert_eq!(stage, InitStage::AttributeStorage);
    assert!(source.downcast_ref::<wgpu::Error>().is_some());
    assert!(scene.is_empty());
}
