use crate::device::{CanvasConfig, SurfaceErrorAction};
use crate::error::{RenderError, Result};
use crate::pass::RenderPassBuilder;
use crate::scene::{FrameContext, PassEncoder, SceneGraph};
use crate::targets::{Reconcile, RenderTargetManager, TargetAllocator};
use crate::time::FrameClock;

use super::FrameBackend;

/// Whether the loop is currently producing frames.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Why an iteration produced no frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SkipReason {
    /// An offscreen target could not be allocated; retried next iteration.
    TargetAllocation,
    /// The surface was lost or outdated and has been reconfigured.
    SurfaceReconfigured,
    /// The surface had no image ready (timeout, minimized window).
    SurfaceNotReady,
}

/// Result of one `run_frame` call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Submitted,
    Skipped(SkipReason),
    /// The scheduler is not running; nothing was touched.
    Idle,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub submitted: u64,
    pub skipped: u64,
    pub reallocations: u64,
}

/// Drives one reconcile, acquire, bind, record, submit cycle per iteration.
///
/// Stopping is cooperative: `stop` only raises a flag, and the loop goes idle the next
/// time `rearm` is consulted. Render targets survive a stop and are released by
/// `teardown`.
pub struct FrameScheduler<A: TargetAllocator> {
    state: SchedulerState,
    stop_requested: bool,
    builder: RenderPassBuilder,
    targets: RenderTargetManager<A>,
    clock: FrameClock,
    stats: FrameStats,

    /// The last iteration saw a zero-sized surface (minimized window).
    surface_empty: bool,
}

impl<A: TargetAllocator> FrameScheduler<A> {
    pub fn new(canvas: &CanvasConfig) -> Self {
        Self {
            state: SchedulerState::Idle,
            stop_requested: false,
            builder: RenderPassBuilder::new(canvas),
            targets: RenderTargetManager::new(canvas.sample_count, canvas.depth),
            clock: FrameClock::new(),
            stats: FrameStats::default(),
            surface_empty: false,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn builder(&self) -> &RenderPassBuilder {
        &self.builder
    }

    pub fn targets(&self) -> &RenderTargetManager<A> {
        &self.targets
    }

    pub fn start(&mut self) {
        self.stop_requested = false;
        if self.state == SchedulerState::Idle {
            self.state = SchedulerState::Running;
            log::info!("frame loop started ({})", self.builder.variant().label());
        }
    }

    /// Requests a stop. The current iteration, if any, completes normally.
    pub fn stop(&mut self) {
        if self.state == SchedulerState::Running {
            self.stop_requested = true;
        }
    }

    /// Releases the targets, resets timing and counters, then starts again.
    pub fn restart(&mut self, allocator: &mut A) {
        self.teardown(allocator);
        self.clock.reset();
        self.stats = FrameStats::default();
        self.start();
    }

    /// Called once after every iteration. Returns `true` if the next frame should be
    /// requested; a pending stop moves the scheduler to `Idle` instead.
    ///
    /// While the surface is zero-sized the scheduler stays `Running` but does not ask
    /// for another frame; the next resize does.
    pub fn rearm(&mut self) -> bool {
        match self.state {
            SchedulerState::Idle => false,
            SchedulerState::Running if self.stop_requested => {
                self.stop_requested = false;
                self.state = SchedulerState::Idle;
                log::info!(
                    "frame loop stopped: {} submitted, {} skipped",
                    self.stats.submitted,
                    self.stats.skipped
                );
                false
            }
            SchedulerState::Running => !self.surface_empty,
        }
    }

    /// Stops immediately and releases every render target.
    pub fn teardown(&mut self, allocator: &mut A) {
        self.state = SchedulerState::Idle;
        self.stop_requested = false;
        self.targets.release_all(allocator);
        self.surface_empty = false;
    }

    /// Runs one frame iteration.
    ///
    /// Transient failures skip the frame and are reported as `FrameOutcome::Skipped`.
    /// Errors are fatal for the loop.
    pub fn run_frame<B>(&mut self, backend: &mut B, scene: &SceneGraph) -> Result<FrameOutcome>
    where
        B: FrameBackend<Allocator = A, View = A::View>,
    {
        if self.state != SchedulerState::Running {
            return Ok(FrameOutcome::Idle);
        }

        let observed = backend.surface_size();
        self.surface_empty = observed.is_empty();
        match self.targets.reconcile(backend.allocator(), observed) {
            Ok(Reconcile::Reallocated { .. }) => self.stats.reallocations += 1,
            Ok(Reconcile::Unchanged) => {}
            Err(err) if err.is_transient() => {
                log::warn!("skipping frame: {err}");
                return Ok(self.skip(SkipReason::TargetAllocation));
            }
            Err(err) => return Err(err),
        }

        let frame = match backend.acquire() {
            Ok(frame) => frame,
            Err(SurfaceErrorAction::Reconfigured) => {
                return Ok(self.skip(SkipReason::SurfaceReconfigured));
            }
            Err(SurfaceErrorAction::SkipFrame) => {
                return Ok(self.skip(SkipReason::SurfaceNotReady));
            }
            Err(SurfaceErrorAction::Fatal) => {
                log::error!("surface acquisition failed fatally");
                return Err(RenderError::SurfaceUnavailable(
                    "surface acquisition failed fatally".into(),
                ));
            }
        };

        let canvas = *backend.canvas();
        let size = self.targets.size().unwrap_or(observed);

        let Some(binding) = self.builder.bind_views(
            B::frame_view(&frame),
            self.targets.color_view(),
            self.targets.depth_view(),
        ) else {
            log::warn!("skipping frame: render targets missing after reconcile");
            return Ok(self.skip(SkipReason::TargetAllocation));
        };

        let time = self.clock.tick();
        let commands = backend.encode(binding, &mut |pass: &mut dyn PassEncoder| {
            let mut ctx = FrameContext {
                pass,
                canvas: &canvas,
                size,
                time,
            };
            scene.render_all(&mut ctx);
        });
        backend.submit(frame, commands);

        self.stats.submitted += 1;
        log::trace!("frame {} submitted at {size}", time.frame_index);
        Ok(FrameOutcome::Submitted)
    }

    fn skip(&mut self, reason: SkipReason) -> FrameOutcome {
        self.stats.skipped += 1;
        log::debug!("frame skipped: {reason:?}");
        FrameOutcome::Skipped(reason)
    }
}

impl<A: TargetAllocator> std::fmt::Debug for FrameScheduler<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("state", &self.state)
            .field("stop_requested", &self.stop_requested)
            .field("variant", &self.builder.variant())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{RendererSettings, SampleCount};
    use crate::targets::TargetRequest;

    #[derive(Default)]
    struct Counting {
        live: usize,
    }

    impl TargetAllocator for Counting {
        type View = ();
        type Target = ();

        fn max_dimension(&self) -> u32 {
            4096
        }
        fn allocate(&mut self, _request: TargetRequest) -> crate::error::Result<()> {
            self.live += 1;
            Ok(())
        }
        fn release(&mut self, _target: ()) {
            self.live -= 1;
        }
        fn view(target: &()) -> &() {
            target
        }
    }

    fn scheduler() -> FrameScheduler<Counting> {
        let canvas = CanvasConfig::new(
            wgpu::TextureFormat::Bgra8UnormSrgb,
            RendererSettings {
                depth: true,
                sample_count: SampleCount::Four,
            },
        );
        FrameScheduler::new(&canvas)
    }

    #[test]
    fn starts_idle_and_rearms_only_while_running() {
        let mut s = scheduler();
        assert_eq!(s.state(), SchedulerState::Idle);
        assert!(!s.rearm());

        s.start();
        assert!(s.is_running());
        assert!(s.rearm());
        assert!(s.rearm());
    }

    #[test]
    fn stop_takes_effect_at_next_rearm() {
        let mut s = scheduler();
        s.start();
        s.stop();
        assert!(s.is_running());
        assert!(s.stop_requested());

        assert!(!s.rearm());
        assert_eq!(s.state(), SchedulerState::Idle);
        assert!(!s.stop_requested());
    }

    #[test]
    fn stop_while_idle_is_ignored() {
        let mut s = scheduler();
        s.stop();
        assert!(!s.stop_requested());
        s.start();
        assert!(s.rearm());
    }

    #[test]
    fn rearm_pauses_while_the_surface_is_empty() {
        let mut s = scheduler();
        s.start();
        s.surface_empty = true;
        assert!(!s.rearm());
        assert!(s.is_running());

        s.surface_empty = false;
        assert!(s.rearm());
    }

    #[test]
    fn teardown_and_restart_release_targets() {
        let mut s = scheduler();
        let mut alloc = Counting::default();
        s.start();
        s.targets
            .reconcile(&mut alloc, crate::targets::SurfaceSize::new(8, 8))
            .unwrap();
        assert_eq!(alloc.live, 2);

        s.restart(&mut alloc);
        assert_eq!(alloc.live, 0);
        assert!(s.is_running());
        assert_eq!(s.stats(), FrameStats::default());

        s.teardown(&mut alloc);
        assert_eq!(s.state(), SchedulerState::Idle);
    }
}
