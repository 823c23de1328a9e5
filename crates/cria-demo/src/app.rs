use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use cria_engine::core::{App, AppControl};
use cria_engine::frame::{FrameOutcome, FrameStats};
use cria_engine::scene::{SceneGraph, SetupCtx};
use cria_engine::shader::ShaderSource;
use cria_engine::window::RuntimeCtx;

use crate::drawables::{ColorTriangle, TexturedPlane, TintedTriangle};

const STATS_EVERY: u64 = 600;

/// Back to front: textured plane, tinted triangle, vertex-colored triangle.
///
/// Keys: Space pauses and resumes the frame loop, R restarts the renderer, Escape quits.
pub struct DemoApp {
    shaders: ShaderSource,
    paused: bool,
}

impl DemoApp {
    pub fn new(shaders: ShaderSource) -> Self {
        Self {
            shaders,
            paused: false,
        }
    }
}

impl App for DemoApp {
    fn init(&mut self, setup: &SetupCtx<'_>, scene: &mut SceneGraph) -> anyhow::Result<()> {
        self.paused = false;

        scene.add(TexturedPlane::new([0.9, 0.9, 1.0]), setup, &self.shaders)?;
        scene.add(TintedTriangle::new([1.0, 0.0, 0.0]), setup, &self.shaders)?;
        scene.add(ColorTriangle::new(), setup, &self.shaders)?;
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent, runtime: &mut RuntimeCtx) -> AppControl {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return AppControl::Continue;
        };
        if event.state != ElementState::Pressed || event.repeat {
            return AppControl::Continue;
        }

        match event.physical_key {
            PhysicalKey::Code(KeyCode::Escape) => return AppControl::Exit,
            PhysicalKey::Code(KeyCode::Space) => {
                self.paused = !self.paused;
                if self.paused {
                    log::info!("pausing frame loop");
                    runtime.stop();
                } else {
                    log::info!("resuming frame loop");
                    runtime.start();
                }
            }
            PhysicalKey::Code(KeyCode::KeyR) => runtime.restart(),
            _ => {}
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, outcome: FrameOutcome, stats: FrameStats, _runtime: &mut RuntimeCtx) -> AppControl {
        if outcome == FrameOutcome::Submitted && stats.submitted % STATS_EVERY == 0 {
            log::info!(
                "{} frames submitted, {} skipped, {} target reallocations",
                stats.submitted,
                stats.skipped,
                stats.reallocations
            );
        }
        AppControl::Continue
    }
}
