//! Rainscape - a rainy scene renderer
//!
//! Fly through a small scene in the rain. WASD moves, Shift sprints, the
//! mouse looks around and the scroll wheel zooms. Q/E spin the centerpiece,
//! J/L orbit the light, `-` toggles night and `=` toggles wireframe.

use anyhow::Context as _;
use rainscape::config::AppConfig;
use rainscape::frame::{FrameContext, FrameState};
use rainscape::systems::{RenderSystem, SimulationSystem, WindowSystem};
use rainscape_core::Scene;
use rainscape_input::InputCollector;
use rainscape_render::RenderError;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

/// Everything that only exists while running
struct Running {
    window: WindowSystem,
    render: RenderSystem,
    frame: FrameContext,
}

/// Frame loop driven by winit
struct App {
    config: AppConfig,
    state: FrameState,
    running: Option<Running>,
    input: InputCollector,
    simulation: SimulationSystem,
    /// Startup or runtime failure reported by `main`
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            state: FrameState::Init,
            running: None,
            input: InputCollector::new(),
            simulation: SimulationSystem::new(),
            fatal: None,
        }
    }

    /// One-time setup; any failure aborts before the first frame
    fn start(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Running> {
        let scene = Scene::load(&self.config.scene.path)
            .with_context(|| format!("failed to load scene '{}'", self.config.scene.path))?;
        log::info!("Loaded scene '{}' with {} objects", scene.name, scene.object_count());

        let day = self.config.skybox.day.load().context("failed to load day skybox")?;
        let night = self.config.skybox.night.load().context("failed to load night skybox")?;

        let frame = FrameContext::new(&self.config, scene.camera_spawn)
            .context("invalid camera start")?;

        let mut window = WindowSystem::create(event_loop, &self.config.window)?;
        let render = RenderSystem::new(
            window.window().clone(),
            self.config.window.vsync,
            &scene,
            (&day, &night),
            self.config.renderer_settings(),
        )?;

        window.capture_cursor();
        window.request_redraw();

        Ok(Running { window, render, frame })
    }

    /// Enter ShuttingDown: drop GPU resources before the window, then stop the loop
    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        if self.state == FrameState::ShuttingDown {
            return;
        }
        log::info!("Shutting down");
        self.state = FrameState::ShuttingDown;
        if let Some(running) = self.running.take() {
            drop(running.render);
            drop(running.window);
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.fatal = Some(error);
        self.shut_down(event_loop);
    }

    /// input → controller → rain → both passes → present
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let snapshot = self.input.take_snapshot();
        let Some(running) = self.running.as_mut() else {
            return;
        };

        let outcome = self.simulation.update(&mut running.frame, &snapshot);
        if outcome.exit_requested {
            self.shut_down(event_loop);
            return;
        }

        running
            .window
            .update_title(running.frame.camera.position(), running.frame.toggles);

        let aspect = running.render.aspect_ratio();
        let view = running.frame.frame_view(aspect);
        match running.render.render_frame(&view) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => log::warn!("Surface lost, reconfigured"),
            Err(e) if e.is_fatal() => {
                self.fail(event_loop, anyhow::Error::new(e).context("rendering failed"));
                return;
            }
            Err(e) => log::warn!("Skipped frame: {}", e),
        }

        running.window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state != FrameState::Init {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                self.running = Some(running);
                self.state = FrameState::Running;
                self.simulation.reset_clock();
            }
            Err(e) => self.fail(event_loop, e.context("startup failed")),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.state != FrameState::Running {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shut_down(event_loop),

            WindowEvent::Resized(physical_size) => {
                if let Some(running) = &mut self.running {
                    running.render.resize(physical_size);
                }
            }

            WindowEvent::Focused(false) => self.input.release_all(),

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.input.process_keyboard(key, event.state, event.repeat);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => self.input.process_scroll(delta),

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.process_mouse_motion(delta.0, delta.1);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting Rainscape");
    if let Some(e) = config_error {
        log::warn!("{}. Using defaults.", e);
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
