use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl};
use crate::device::{GpuInit, GraphicsContext, RendererSettings, TextureAllocator};
use crate::frame::{FrameBackend, FrameScheduler};
use crate::scene::SceneGraph;
use crate::targets::SurfaceSize;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub gpu: GpuInit,
    pub settings: RendererSettings,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "cria".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            gpu: GpuInit::default(),
            settings: RendererSettings::default(),
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    /// Stops the frame loop after the current iteration. Targets stay allocated.
    pub fn stop(&mut self) {
        self.commands.push(Command::Stop);
    }

    /// Resumes a stopped frame loop.
    pub fn start(&mut self) {
        self.commands.push(Command::Start);
    }

    /// Tears everything down and re-initializes the graphics context and scene on the
    /// same window.
    pub fn restart(&mut self) {
        self.commands.push(Command::Restart);
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    fn drain(&mut self) -> std::vec::Drain<'_, Command> {
        self.commands.drain(..)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Command {
    Stop,
    Start,
    Restart,
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: GraphicsContext<'this>,
}

/// Everything tied to one graphics context. Rebuilt from scratch on restart.
struct Session {
    entry: WindowEntry,
    scheduler: FrameScheduler<TextureAllocator>,
    scene: SceneGraph,
}

impl Session {
    fn request_redraw(&self) {
        self.entry.with_window(|w| w.request_redraw());
    }

    /// Releases targets, drops the scene and the context, and hands the window back.
    fn close(self) -> Window {
        let Session {
            mut entry,
            mut scheduler,
            scene,
        } = self;

        entry.with_gpu_mut(|gpu| scheduler.teardown(gpu.allocator()));
        drop(scene);
        entry.into_heads().window
    }
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    app: A,

    session: Option<Session>,
    exit_requested: bool,

    /// First fatal error, reported by `Runtime::run` once the loop returns.
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            session: None,
            exit_requested: false,
            failure: None,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn fail(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        self.request_exit();
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Window> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        event_loop
            .create_window(attrs)
            .context("failed to create window")
    }

    fn open_session(&mut self, window: Window) -> Result<Session> {
        let size = SurfaceSize::from(window.inner_size());
        let gpu_init = self.config.gpu.clone();
        let settings = self.config.settings;

        let entry = WindowEntry::try_new(window, |w| {
            pollster::block_on(GraphicsContext::new(w, size, gpu_init, settings))
        })
        .context("graphics initialization failed")?;

        let mut scheduler = FrameScheduler::new(entry.borrow_gpu().canvas());
        let mut scene = SceneGraph::new();

        let app = &mut self.app;
        entry
            .with_gpu(|gpu| app.init(&gpu.setup_ctx(), &mut scene))
            .context("application setup failed")?;
        log::info!("scene ready: {scene:?}");

        scheduler.start();
        let session = Session {
            entry,
            scheduler,
            scene,
        };
        session.request_redraw();
        Ok(session)
    }

    fn restart(&mut self) -> Result<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };

        log::info!("restarting renderer");
        let window = session.close();
        self.session = Some(self.open_session(window)?);
        Ok(())
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.drain() {
            match cmd {
                Command::Stop => {
                    if let Some(session) = self.session.as_mut() {
                        session.scheduler.stop();
                    }
                }
                Command::Start => {
                    if let Some(session) = self.session.as_mut() {
                        let was_running = session.scheduler.is_running();
                        session.scheduler.start();
                        if !was_running {
                            session.request_redraw();
                        }
                    }
                }
                Command::Restart => {
                    if let Err(err) = self.restart() {
                        self.fail(err);
                    }
                }
                Command::Exit => self.request_exit(),
            }
        }

        if self.exit_requested {
            self.shutdown();
            event_loop.exit();
        }
    }

    fn shutdown(&mut self) {
        if let Some(session) = self.session.take() {
            let stats = session.scheduler.stats();
            log::info!(
                "shutting down: {} frames submitted, {} skipped, {} target reallocations",
                stats.submitted,
                stats.skipped,
                stats.reallocations
            );
            drop(session.close());
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let Session {
            entry,
            scheduler,
            scene,
        } = session;

        let result = entry.with_gpu_mut(|gpu| scheduler.run_frame(gpu, scene));
        let mut runtime_ctx = RuntimeCtx::default();

        match result {
            Ok(outcome) => {
                if self.app.on_frame(outcome, scheduler.stats(), &mut runtime_ctx) == AppControl::Exit {
                    runtime_ctx.exit();
                }
            }
            Err(err) => {
                self.fail(anyhow::Error::new(err).context("frame loop aborted"));
            }
        }

        self.apply_commands(event_loop, runtime_ctx);

        if let Some(session) = self.session.as_mut() {
            if session.scheduler.rearm() {
                session.request_redraw();
            }
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        let opened = self
            .create_window(event_loop)
            .and_then(|window| self.open_session(window));

        match opened {
            Ok(session) => self.session = Some(session),
            Err(err) => {
                self.fail(err.context("failed to start renderer"));
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            self.shutdown();
            event_loop.exit();
            return;
        }

        // Redraws are requested by the frame loop itself.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            self.shutdown();
            event_loop.exit();
            return;
        }

        let Some(session) = self.session.as_ref() else {
            return;
        };
        if session.entry.borrow_window().id() != window_id {
            return;
        }

        let mut runtime_ctx = RuntimeCtx::default();
        if self.app.on_window_event(&event, &mut runtime_ctx) == AppControl::Exit {
            runtime_ctx.exit();
        }
        self.apply_commands(event_loop, runtime_ctx);
        if self.exit_requested {
            return;
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };

        match &event {
            WindowEvent::CloseRequested => {
                self.request_exit();
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                session.entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                if session.scheduler.is_running() {
                    session.request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = session.entry.with_window(|w| w.inner_size());
                session.entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                if session.scheduler.is_running() {
                    session.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}
