use winit::event::WindowEvent;

use crate::frame::{FrameOutcome, FrameStats};
use crate::scene::{SceneGraph, SetupCtx};
use crate::window::RuntimeCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by `Runtime`.
pub trait App {
    /// Populates the scene for a freshly created graphics context.
    ///
    /// Called at startup and again after every restart, always with an empty scene.
    fn init(&mut self, setup: &SetupCtx<'_>, scene: &mut SceneGraph) -> anyhow::Result<()>;

    /// Called for window events before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent, runtime: &mut RuntimeCtx) -> AppControl {
        let _ = (event, runtime);
        AppControl::Continue
    }

    /// Called after each frame iteration.
    fn on_frame(&mut self, outcome: FrameOutcome, stats: FrameStats, runtime: &mut RuntimeCtx) -> AppControl {
        let _ = (outcome, stats, runtime);
        AppControl::Continue
    }
}
