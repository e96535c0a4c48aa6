use tracing::{ error, info, warn };
use winit::event::KeyEvent;

use crate::engine::clock::{ Clock, SystemClock };
use crate::engine::config::AppConfig;
use crate::engine::error::AppError;
use crate::engine::systems::frame_capture::FrameCapture;
use crate::engine::systems::keyboard_input_system::KeyboardInputSystem;
use crate::game::scene::Scene;
use crate::game::systems::render_system::RenderSystem;

/// Per-frame driver: draws the scene, applies input to the controlled
/// figure, and records the frame.
pub struct Program {
    gl: glow::Context,
    render_system: RenderSystem,
    scene: Scene,
    input: KeyboardInputSystem,
    capture: Option<FrameCapture>,
    clock: SystemClock,
    frame_count: u64,
    released: bool,
}

impl Program {
    pub fn new(gl: glow::Context, config: &AppConfig) -> Result<Self, AppError> {
        let render_system = RenderSystem::new(&gl)?;
        let scene = Scene::from_settings(&config.scene, config.animation.swing_speed);
        let input = KeyboardInputSystem::new(config.movement);

        let capture = if config.capture.enabled {
            Some(FrameCapture::create(&config.capture, config.window.width, config.window.height)?)
        } else {
            info!("Frame capture disabled");
            None
        };

        info!("Program initialized with {} figures", scene.characters().len());

        Ok(Self {
            gl,
            render_system,
            scene,
            input,
            capture,
            clock: SystemClock::new(),
            frame_count: 0,
            released: false,
        })
    }

    pub fn render(&mut self, width: u32, height: u32) -> Result<(), AppError> {
        self.render_system.render(&self.gl, &self.scene, width, height);

        if let Some(character) = self.scene.controlled_mut() {
            self.input.update(character, &self.clock);
        }

        if let Some(capture) = self.capture.as_mut() {
            capture.capture(&self.gl)?;
        }

        self.frame_count += 1;
        Ok(())
    }

    pub fn receive_key_event(&mut self, event: &KeyEvent) {
        self.input.receive_key_event(event);
    }

    pub fn exit_requested(&self) -> bool {
        self.input.exit_requested()
    }

    /// Finish the GIF and release GL objects. Later calls do nothing.
    pub fn cleanup(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if let Some(mut capture) = self.capture.take() {
            match capture.finish() {
                Ok(0) => warn!("No frames were captured, {} was not kept", capture.path().display()),
                Ok(_) => {}
                Err(err) => error!("Failed to finish {}: {}", capture.path().display(), err),
            }
        }
        self.render_system.cleanup(&self.gl);
        info!("Rendered {} frames in {:.1}s", self.frame_count, self.clock.now_seconds());
    }
}
