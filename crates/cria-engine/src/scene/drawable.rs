use bitflags::bitflags;

use crate::device::CanvasConfig;
use crate::error::{RenderError, Result};
use crate::shader::ShaderSource;
use crate::targets::SurfaceSize;
use crate::time::FrameTime;
use crate::util::{capture_errors, ALLOCATION};

use super::PassEncoder;

bitflags! {
    /// Optional initialization steps a drawable implements.
    #[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
    pub struct Capabilities: u8 {
        const UNIFORMS = 1 << 0;
        const TEXTURE = 1 << 1;
    }
}

/// One-time initialization step, in execution order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum InitStage {
    ShaderStage,
    AttributeStorage,
    Pipeline,
    Uniforms,
    Texture,
}

impl InitStage {
    const REQUIRED: [InitStage; 3] = [Self::ShaderStage, Self::AttributeStorage, Self::Pipeline];

    /// Stages to run for a drawable with `caps`: the three required ones, then the
    /// optional ones it declares.
    pub fn plan(caps: Capabilities) -> impl Iterator<Item = InitStage> {
        let optional = [
            caps.contains(Capabilities::UNIFORMS).then_some(Self::Uniforms),
            caps.contains(Capabilities::TEXTURE).then_some(Self::Texture),
        ];
        Self::REQUIRED.into_iter().chain(optional.into_iter().flatten())
    }
}

impl std::fmt::Display for InitStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ShaderStage => "shader stage",
            Self::AttributeStorage => "attribute storage",
            Self::Pipeline => "pipeline",
            Self::Uniforms => "uniforms",
            Self::Texture => "texture",
        })
    }
}

/// Device handles borrowed by drawables during initialization.
#[derive(Copy, Clone)]
pub struct SetupCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub canvas: &'a CanvasConfig,
}

/// Per-frame context handed to `Drawable::render`.
pub struct FrameContext<'a> {
    pub pass: &'a mut dyn PassEncoder,
    pub canvas: &'a CanvasConfig,
    pub size: SurfaceSize,
    pub time: FrameTime,
}

/// A self-contained renderable unit.
///
/// Initialization runs once through [`initialize`]: shader stage, attribute storage and
/// pipeline, then `init_uniforms` / `init_texture` if declared in `capabilities`.
/// `render` only appends commands to the pass the frame loop already opened.
pub trait Drawable {
    fn label(&self) -> &str;

    fn init_shader_stage(&mut self, setup: &SetupCtx<'_>, source: &ShaderSource) -> anyhow::Result<()>;

    fn init_attribute_storage(&mut self, setup: &SetupCtx<'_>) -> anyhow::Result<()>;

    fn init_pipeline(&mut self, setup: &SetupCtx<'_>) -> anyhow::Result<()>;

    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    fn init_uniforms(&mut self, setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        let _ = setup;
        Ok(())
    }

    fn init_texture(&mut self, setup: &SetupCtx<'_>) -> anyhow::Result<()> {
        let _ = setup;
        Ok(())
    }

    fn render(&self, ctx: &mut FrameContext<'_>);
}

/// Runs every initialization stage of `drawable` in order.
///
/// Each stage runs inside a device error scope, so a stage that returns `Ok` while the
/// device rejected one of its calls still fails. Stops at the first failing stage; the
/// error names the drawable and the stage.
pub fn initialize(
    drawable: &mut dyn Drawable,
    setup: &SetupCtx<'_>,
    source: &ShaderSource,
) -> Result<()> {
    for stage in InitStage::plan(drawable.capabilities()) {
        let (res, device_err) = capture_errors(setup.device, ALLOCATION, || match stage {
            InitStage::ShaderStage => drawable.init_shader_stage(setup, source),
            InitStage::AttributeStorage => drawable.init_attribute_storage(setup),
            InitStage::Pipeline => drawable.init_pipeline(setup),
            InitStage::Uniforms => drawable.init_uniforms(setup),
            InitStage::Texture => drawable.init_texture(setup),
        });
        let res = res.and_then(|()| match device_err {
            Some(err) => Err(anyhow::Error::new(err).context("rejected by the device")),
            None => Ok(()),
        });

        res.map_err(|err| RenderError::PipelineBuildFailed {
            drawable: drawable.label().to_owned(),
            stage,
            source: err,
        })?;
    }

    log::debug!("drawable `{}` initialized", drawable.label());
    Ok(())
}
