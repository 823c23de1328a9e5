use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use cria_engine::core::App;
use cria_engine::device::{GpuInit, RendererSettings, SampleCount};
use cria_engine::logging::{init_logging, LoggingConfig};
use cria_engine::shader::{DirShaderLoader, ShaderSource};
use cria_engine::window::{Runtime, RuntimeConfig};

mod app;
mod drawables;
mod shaders;

use app::DemoApp;

#[derive(Parser, Debug)]
#[command(name = "cria-demo", version)]
struct Cli {
    /// MSAA sample count (1 or 4).
    #[arg(long, default_value_t = 4, value_parser = parse_samples)]
    samples: u32,

    /// Enable the depth attachment.
    #[arg(long)]
    depth: bool,

    /// Load `<id>.wgsl` shaders from this directory instead of the embedded ones.
    #[arg(long)]
    shader_dir: Option<PathBuf>,

    /// Initial window width (logical pixels).
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Initial window height (logical pixels).
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Log filter, `env_logger` syntax. Overrides `RUST_LOG`.
    #[arg(long)]
    log: Option<String>,
}

fn parse_samples(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    SampleCount::try_from(n)
        .map(SampleCount::get)
        .map_err(|n| format!("unsupported sample count {n}, expected 1 or 4"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    let sample_count = SampleCount::try_from(cli.samples)
        .map_err(|n| anyhow::anyhow!("unsupported sample count {n}"))?;

    let shaders = match &cli.shader_dir {
        Some(dir) => {
            anyhow::ensure!(dir.is_dir(), "shader directory '{}' does not exist", dir.display());
            log::info!("loading shaders from {}", dir.display());
            ShaderSource::new(DirShaderLoader::new(dir))
        }
        None => ShaderSource::new(shaders::embedded()),
    };

    let config = RuntimeConfig {
        title: "cria".to_string(),
        initial_size: winit::dpi::LogicalSize::new(cli.width, cli.height),
        gpu: GpuInit::default(),
        settings: RendererSettings {
            depth: cli.depth,
            sample_count,
        },
    };

    run(config, DemoApp::new(shaders)).context("cria-demo failed")
}

fn run(config: RuntimeConfig, app: impl App + 'static) -> anyhow::Result<()> {
    log::info!(
        "starting: {}x MSAA, depth {}",
        config.settings.sample_count.get(),
        if config.settings.depth { "on" } else { "off" }
    );
    Runtime::run(config, app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_renderer_defaults() {
        let cli = Cli::try_parse_from(["cria-demo"]).unwrap();
        assert_eq!(cli.samples, RendererSettings::default().sample_count.get());
        assert!(!cli.depth);
        assert!(cli.shader_dir.is_none());
    }

    #[test]
    fn sample_count_is_validated() {
        assert!(Cli::try_parse_from(["cria-demo", "--samples", "1", "--depth"]).is_ok());
        assert!(Cli::try_parse_from(["cria-demo", "--samples", "2"]).is_err());
        assert!(Cli::try_parse_from(["cria-demo", "--samples", "x"]).is_err());
    }
}
