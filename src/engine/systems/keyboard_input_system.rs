use std::collections::HashSet;
use tracing::{ debug, info };
use winit::event::{ ElementState, KeyEvent };
use winit::keyboard::{ KeyCode, PhysicalKey };

use crate::engine::clock::Clock;
use crate::engine::components::character::Character;
use crate::engine::config::MovementSettings;
use crate::engine::utils::math::{ vec3_add, vec3_scale, Vec3 };

/// Turns held keys into per-frame root motion for one figure.
///
/// W/S walk along the figure's facing, A/D strafe, the arrow keys turn.
/// Steps are fixed per frame rather than per second.
pub struct KeyboardInputSystem {
    pressed_keys: HashSet<KeyCode>,
    exit_requested: bool,
    last_frame_seconds: Option<f64>,
    settings: MovementSettings,
}

impl KeyboardInputSystem {
    pub fn new(settings: MovementSettings) -> Self {
        Self {
            pressed_keys: HashSet::new(),
            exit_requested: false,
            last_frame_seconds: None,
            settings,
        }
    }

    pub fn receive_key_event(&mut self, key_event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = key_event.physical_key {
            match key_event.state {
                ElementState::Pressed => self.press(key_code),
                ElementState::Released => self.release(key_code),
            }
        }
    }

    pub fn press(&mut self, key_code: KeyCode) {
        if key_code == KeyCode::Escape {
            info!("Escape pressed, requesting exit");
            self.exit_requested = true;
            return;
        }
        if self.pressed_keys.insert(key_code) {
            debug!("Key pressed: {:?}", key_code);
        }
    }

    pub fn release(&mut self, key_code: KeyCode) {
        if self.pressed_keys.remove(&key_code) {
            debug!("Key released: {:?}", key_code);
        }
    }

    pub fn is_pressed(&self, key_code: KeyCode) -> bool {
        self.pressed_keys.contains(&key_code)
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Apply one frame of held-key motion to `character`, clamp it to the
    /// walkable square, then advance its swing. Returns whether it walked.
    pub fn update(&mut self, character: &mut Character, clock: &dyn Clock) -> bool {
        let mut position = character.position();
        let mut rotation = character.rotation();
        let (forward, right) = basis_vectors(rotation[1]);
        let step = self.settings.speed;
        let mut is_moving = false;

        if self.is_pressed(KeyCode::KeyW) {
            position = vec3_add(position, vec3_scale(forward, step));
            is_moving = true;
        }
        if self.is_pressed(KeyCode::KeyS) {
            position = vec3_add(position, vec3_scale(forward, -step));
            is_moving = true;
        }
        if self.is_pressed(KeyCode::KeyA) {
            position = vec3_add(position, vec3_scale(right, step));
            is_moving = true;
        }
        if self.is_pressed(KeyCode::KeyD) {
            position = vec3_add(position, vec3_scale(right, -step));
            is_moving = true;
        }

        // Turning in place does not start the walk cycle.
        if self.is_pressed(KeyCode::ArrowLeft) {
            rotation[1] += self.settings.rotation_speed;
        }
        if self.is_pressed(KeyCode::ArrowRight) {
            rotation[1] -= self.settings.rotation_speed;
        }

        let bounds = self.settings.bounds;
        position[0] = position[0].clamp(-bounds, bounds);
        position[2] = position[2].clamp(-bounds, bounds);

        character.set_position(position);
        character.set_rotation(rotation);

        let now = clock.now_seconds();
        let delta_time = now - self.last_frame_seconds.unwrap_or(now);
        self.last_frame_seconds = Some(now);

        character.update_swing(delta_time as f32, is_moving, clock);
        is_moving
    }
}

/// `(forward, right)` on the ground plane for a given yaw. A steps along
/// `right`, D against it.
pub fn basis_vectors(yaw: f32) -> (Vec3, Vec3) {
    let (s, c) = yaw.sin_cos();
    ([s, 0.0, c], [c, 0.0, -s])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::FixedClock;

    fn system() -> KeyboardInputSystem {
        KeyboardInputSystem::new(MovementSettings::default())
    }

    #[test]
    fn forward_key_walks_along_facing() {
        let clock = FixedClock::new(0.3);
        let mut input = system();
        let mut character = Character::new();
        input.press(KeyCode::KeyW);

        assert!(input.update(&mut character, &clock));
        assert_eq!(character.position(), [0.0, 0.0, 0.009]);
        assert!(character.animator().arm_swing() != 0.0);
    }

    #[test]
    fn strafe_follows_yaw() {
        let clock = FixedClock::new(0.0);
        let mut input = system();
        let mut character = Character::new();
        character.set_rotation([0.0, std::f32::consts::FRAC_PI_2, 0.0]);
        input.press(KeyCode::KeyA);
        input.update(&mut character, &clock);

        let position = character.position();
        assert!(position[0].abs() < 1e-6);
        assert!((position[2] + 0.009).abs() < 1e-6);
    }

    #[test]
    fn turning_alone_is_not_moving() {
        let clock = FixedClock::new(0.3);
        let mut input = system();
        let mut character = Character::new();
        input.press(KeyCode::ArrowLeft);

        assert!(!input.update(&mut character, &clock));
        assert_eq!(character.rotation()[1], 0.05);
        assert_eq!(character.animator().arm_swing(), 0.0);

        input.release(KeyCode::ArrowLeft);
        input.press(KeyCode::ArrowRight);
        input.update(&mut character, &clock);
        input.update(&mut character, &clock);
        assert!((character.rotation()[1] + 0.05).abs() < 1e-6);
    }

    #[test]
    fn releasing_keys_stops_the_swing() {
        let clock = FixedClock::new(0.3);
        let mut input = system();
        let mut character = Character::new();
        input.press(KeyCode::KeyS);
        input.update(&mut character, &clock);
        input.release(KeyCode::KeyS);

        assert!(!input.update(&mut character, &clock));
        assert_eq!(character.animator().arm_swing(), 0.0);
        assert_eq!(character.animator().leg_swing(), 0.0);
    }

    #[test]
    fn position_is_clamped_to_bounds() {
        let clock = FixedClock::new(0.0);
        let mut input = system();
        let mut character = Character::new();
        character.set_position([-8.995, 1.0, -20.0]);
        input.press(KeyCode::KeyD);
        input.update(&mut character, &clock);

        // D moves against `right`, which is -x at zero yaw.
        assert_eq!(character.position(), [-9.0, 1.0, -9.0]);
    }

    #[test]
    fn escape_requests_exit_without_tracking_key() {
        let mut input = system();
        assert!(!input.exit_requested());
        input.press(KeyCode::Escape);
        assert!(input.exit_requested());
        assert!(!input.is_pressed(KeyCode::Escape));
    }
}
