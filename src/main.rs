use anyhow::{Context, Result};
use fps_counter::FPSCounter;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use gl_two_triangles::config::{Config, USAGE};
use gl_two_triangles::renderer::{GlDevice, Present, Renderer};
use gl_two_triangles::snapshot::Snapshot;
use gl_two_triangles::surface::Surface;

struct Graphics {
    renderer: Renderer<GlDevice>,
    device: GlDevice,
    surface: Surface,
}

struct App {
    config: Config,
    graphics: Option<Graphics>,
    fps: FPSCounter,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config) -> Self {
        App {
            config,
            graphics: None,
            fps: FPSCounter::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (surface, device) = Surface::new(event_loop, &self.config)?;
        let renderer = Renderer::new(&device).context("failed to build renderer")?;
        let (width, height) = surface.size();
        renderer.resize(&device, width, height);
        surface.request_redraw();

        self.graphics = Some(Graphics {
            renderer,
            device,
            surface,
        });
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let graphics = match &self.graphics {
            Some(graphics) => graphics,
            None => return Ok(()),
        };

        // One frame only; any later redraw renders normally while exiting.
        match self.config.snapshot.take() {
            Some(path) => {
                event_loop.exit();
                graphics.renderer.draw(&graphics.device);
                let (width, height) = graphics.surface.size();
                let snapshot = Snapshot::capture(&graphics.device, width, height)?;
                graphics.surface.present()?;
                snapshot.save(path)?;
                snapshot.verify()?;
            }
            None => {
                graphics
                    .renderer
                    .render(&graphics.device, &graphics.surface)?;
                log::trace!("frames in the last second: {}", self.fps.tick());
            }
        }
        Ok(())
    }

    /// `main` returns the stored error, which reports it once on exit.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(graphics) = &self.graphics {
                    graphics.surface.resize(size.width, size.height);
                    graphics
                        .renderer
                        .resize(&graphics.device, size.width, size.height);
                    graphics.surface.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw(event_loop) {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_args(std::env::args().skip(1))?;
    if config.show_help {
        println!("{}", USAGE);
        return Ok(());
    }

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated with error")?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
