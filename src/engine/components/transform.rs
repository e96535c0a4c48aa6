use crate::engine::utils::math::Vec3;
use serde::{ Serialize, Deserialize };

/// Root placement of a figure in world space.
///
/// Plain data: the setters do no validation or clamping. Keeping the figure
/// on the ground is up to whoever drives it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians. Only yaw (`y`) orients the figure.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
            ..Self::identity()
        }
    }

    /// Position at origin, unit scale, no rotation.
    pub fn identity() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn yaw(&self) -> f32 {
        self.rotation[1]
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
