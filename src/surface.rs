use std::ffi::CString;
use std::num::NonZeroU32;
use std::ptr;

use anyhow::{anyhow, Context, Result};
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface as GlutinSurface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::config::Config;
use crate::renderer::{GlDevice, Present};

/// A double-buffered window with a current OpenGL context.
pub struct Surface {
    // Dropped in declaration order: surface and context before the window.
    gl_surface: GlutinSurface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl Surface {
    /// Opens the window, makes its context current on this thread and loads
    /// the GL entry points.
    pub fn new(event_loop: &ActiveEventLoop, config: &Config) -> Result<(Self, GlDevice)> {
        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(config.snapshot.is_none());

        // Fewest samples, so pixel centers carry the exact interpolated color.
        // glutin-winit only calls the picker with a non-empty iterator, and
        // the picker must return a config: it has no error path.
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, ConfigTemplateBuilder::new(), |configs| {
                configs
                    .min_by_key(|config| config.num_samples())
                    .expect("display offered no GL configs")
            })
            .map_err(|err| anyhow!("failed to create GL display: {}", err))?;
        let window = window.context("GL display was created without a window")?;

        let raw_window_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();

        let gl_display = gl_config.display();
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(raw_window_handle));
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .context("failed to create OpenGL 3.3 context")?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("failed to describe window surface")?;
        let gl_surface =
            unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
                .context("failed to create window surface")?;
        let context = not_current
            .make_current(&gl_surface)
            .context("failed to make GL context current")?;

        if let Err(err) =
            gl_surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN))
        {
            log::warn!("failed to enable vsync: {}", err);
        }

        let device = GlDevice::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(&symbol),
            Err(_) => ptr::null(),
        });
        device.log_info();

        let surface = Surface {
            gl_surface,
            context,
            window,
        };
        Ok((surface, device))
    }

    pub fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    /// Zero-sized (minimized) windows keep their previous surface size.
    pub fn resize(&self, width: u32, height: u32) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.gl_surface.resize(&self.context, width, height);
        }
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

impl Present for Surface {
    type Error = glutin::error::Error;

    fn present(&self) -> Result<(), Self::Error> {
        self.gl_surface.swap_buffers(&self.context)
    }
}
