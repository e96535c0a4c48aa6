use crate::engine::clock::Clock;
use crate::engine::components::animator::SwingAnimator;
use crate::engine::components::skeleton::{ JointOffsets, HUMANOID_JOINTS };
use crate::engine::components::transform::Transform;
use crate::engine::utils::math::Vec3;

/// One humanoid figure: its root placement, its walk-cycle state, and the
/// shared joint layout.
#[derive(Clone, Debug)]
pub struct Character {
    transform: Transform,
    animator: SwingAnimator,
    joints: &'static JointOffsets,
}

impl Character {
    pub fn new() -> Self {
        Self::with_transform(Transform::identity())
    }

    pub fn with_transform(transform: Transform) -> Self {
        Self {
            transform,
            animator: SwingAnimator::new(),
            joints: &HUMANOID_JOINTS,
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.set_position(position);
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.transform.set_rotation(rotation);
    }

    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation()
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.set_scale(scale);
    }

    pub fn scale(&self) -> Vec3 {
        self.transform.scale()
    }

    pub fn update_swing(&mut self, delta_time: f32, is_moving: bool, clock: &dyn Clock) {
        self.animator.update_swing(delta_time, is_moving, clock);
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn animator(&self) -> &SwingAnimator {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut SwingAnimator {
        &mut self.animator
    }

    pub fn joints(&self) -> &JointOffsets {
        self.joints
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}
