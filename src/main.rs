use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version };
use glutin::display::{ Display, DisplayApiPreference };
use glutin::prelude::*;
use glutin::surface::{ Surface, SurfaceAttributesBuilder, WindowSurface };
use glutin_winit::GlWindow;
use raw_window_handle::{ HasDisplayHandle, HasWindowHandle, RawWindowHandle };
use std::ffi::CString;
use tracing::{ error, info };
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ ActiveEventLoop, EventLoop };
use winit::window::{ Window, WindowId };

use figure_walk::engine::config::AppConfig;
use figure_walk::engine::error::AppError;
use figure_walk::engine::logging::init_logging;
use figure_walk::Program;

struct App {
    config: AppConfig,
    window: Option<Window>,
    gl_context: Option<PossiblyCurrentContext>,
    gl_surface: Option<Surface<WindowSurface>>,
    program: Option<Program>,
    error: Option<AppError>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            gl_context: None,
            gl_surface: None,
            program: None,
            error: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let settings = &self.config.window;
        let window_attributes = Window::default_attributes()
            .with_title(settings.title.clone())
            .with_inner_size(PhysicalSize::new(settings.width, settings.height))
            .with_resizable(false);

        let window = event_loop
            .create_window(window_attributes)
            .map_err(|e| AppError::Context(e.to_string()))?;
        let raw_handle = window
            .window_handle()
            .map_err(|e| AppError::Context(e.to_string()))?
            .as_raw();
        let raw_display = event_loop
            .display_handle()
            .map_err(|e| AppError::Context(e.to_string()))?
            .as_raw();

        let display = unsafe {
            Display::new(raw_display, display_preference(raw_handle))
                .map_err(|e| AppError::Context(e.to_string()))?
        };
        let template = ConfigTemplateBuilder::new().with_depth_size(24).build();
        let gl_config = unsafe {
            display
                .find_configs(template)
                .map_err(|e| AppError::Context(e.to_string()))?
                .max_by_key(|config| config.num_samples())
                .ok_or_else(|| AppError::Context("display offered no GL configs".into()))?
        };

        let ctx_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(raw_handle));
        let not_current = unsafe {
            display
                .create_context(&gl_config, &ctx_attrs)
                .map_err(|e| AppError::Context(e.to_string()))?
        };

        let surface_attrs = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .map_err(|e| AppError::Context(e.to_string()))?;
        let surface = unsafe {
            display
                .create_window_surface(&gl_config, &surface_attrs)
                .map_err(|e| AppError::Context(e.to_string()))?
        };
        let ctx = not_current
            .make_current(&surface)
            .map_err(|e| AppError::Context(e.to_string()))?;

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                CString::new(s)
                    .map(|name| display.get_proc_address(&name))
                    .unwrap_or(std::ptr::null())
            })
        };

        let program = Program::new(gl, &self.config)?;
        info!("Window {}x{} ready", settings.width, settings.height);

        window.request_redraw();

        self.window = Some(window);
        self.gl_context = Some(ctx);
        self.gl_surface = Some(surface);
        self.program = Some(program);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init_graphics(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::RedrawRequested => {
                let (Some(window), Some(surface), Some(ctx), Some(program)) = (
                    &self.window,
                    &self.gl_surface,
                    &self.gl_context,
                    &mut self.program,
                ) else {
                    return;
                };

                let size = window.inner_size();
                let result = program
                    .render(size.width, size.height)
                    .and_then(|()| surface.swap_buffers(ctx).map_err(|e| AppError::Context(e.to_string())));
                if let Err(err) = result {
                    self.fail(event_loop, err);
                    return;
                }

                if program.exit_requested() {
                    event_loop.exit();
                } else {
                    window.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(program) = &mut self.program {
                    program.receive_key_event(&event);
                    if program.exit_requested() {
                        event_loop.exit();
                    }
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(program) = &mut self.program {
            program.cleanup();
        }
    }
}

#[cfg(target_os = "windows")]
fn display_preference(window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::WglThenEgl(Some(window))
}

#[cfg(target_os = "macos")]
fn display_preference(_window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(all(unix, not(target_os = "macos")))]
fn display_preference(_window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Egl
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = AppConfig::from_environment()?;
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);

    event_loop.run_app(&mut app)?;

    if let Some(program) = &mut app.program {
        program.cleanup();
    }
    match app.error.take() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
