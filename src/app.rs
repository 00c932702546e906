//! winit application shell
//!
//! Owns the window, the GPU context, and the per-frame input snapshot, and
//! drives whichever demo the user picked. Escape closes every demo.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context as _;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::input::InputState;
use crate::renderer::GpuContext;
use crate::settings::Settings;

/// One of the three demos, as picked on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoKind {
    Triangle,
    Scene,
    Marbles,
}

impl DemoKind {
    pub fn title(self) -> &'static str {
        match self {
            DemoKind::Triangle => "Flat Triangles",
            DemoKind::Scene => "Still Life",
            DemoKind::Marbles => "Random World of Circles",
        }
    }

    fn initial_size(self) -> LogicalSize<f64> {
        match self {
            DemoKind::Marbles => LogicalSize::new(480.0, 480.0),
            _ => LogicalSize::new(800.0, 600.0),
        }
    }
}

/// A runnable demo. The shell calls `frame` once per redraw with the input
/// snapshot and the elapsed time since the previous frame.
pub trait Demo {
    /// React to a surface resize (the context is already reconfigured).
    fn resize(&mut self, _gpu: &GpuContext) {}

    /// Advance and draw one frame.
    fn frame(
        &mut self,
        gpu: &mut GpuContext,
        input: &InputState,
        dt: f32,
    ) -> Result<(), wgpu::SurfaceError>;
}

/// Build the demo once the GPU context exists.
type DemoFactory = Box<dyn FnOnce(&GpuContext, &Settings) -> Box<dyn Demo>>;

struct Runner {
    window: Arc<Window>,
    gpu: GpuContext,
    demo: Box<dyn Demo>,
    input: InputState,
    last_frame: Instant,
}

struct App {
    kind: DemoKind,
    settings: Settings,
    factory: Option<DemoFactory>,
    runner: Option<Runner>,
    /// First failure during startup; reported after the loop exits
    startup_error: Option<anyhow::Error>,
}

impl App {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.kind.title())
            .with_inner_size(self.kind.initial_size());
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = GpuContext::new(window.clone(), self.settings.vsync)?;
        let factory = self.factory.take().context("demo already built")?;
        let demo = factory(&gpu, &self.settings);

        window.request_redraw();
        self.runner = Some(Runner {
            window,
            gpu,
            demo,
            input: InputState::default(),
            last_frame: Instant::now(),
        });
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.runner.is_some() {
            return;
        }
        if let Err(err) = self.start(event_loop) {
            self.startup_error = Some(err);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(runner) = &self.runner {
            runner.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(runner) = &mut self.runner else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                runner.gpu.resize(size.width, size.height);
                runner.demo.resize(&runner.gpu);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                    event_loop.exit();
                    return;
                }
                runner.input.key_event(&event);
            }

            WindowEvent::CursorMoved { position, .. } => {
                runner.input.cursor_moved(position.x as f32, position.y as f32);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                runner.input.scroll(&delta);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                log::debug!("mouse button {button:?} {state:?}");
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - runner.last_frame).as_secs_f32().min(0.1);
                runner.last_frame = now;

                match runner.demo.frame(&mut runner.gpu, &runner.input, dt) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let (w, h) = runner.gpu.size;
                        runner.gpu.resize(w, h);
                        runner.demo.resize(&runner.gpu);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory");
                        event_loop.exit();
                    }
                    Err(err) => log::warn!("render error: {err:?}"),
                }
                runner.input.end_frame();
            }

            _ => {}
        }
    }
}

/// Open a window for the chosen demo and run it until the user quits.
pub fn run(
    kind: DemoKind,
    settings: Settings,
    factory: impl FnOnce(&GpuContext, &Settings) -> Box<dyn Demo> + 'static,
) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App {
        kind,
        settings,
        factory: Some(Box::new(factory)),
        runner: None,
        startup_error: None,
    };

    event_loop
        .run_app(&mut app)
        .context("event loop terminated with error")?;

    match app.startup_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
