use crate::engine::utils::math::{ mat4x4_look_at, mat4x4_perspective, Mat4x4, Vec3 };
use serde::{ Serialize, Deserialize };

/// Fixed look-at camera with a perspective lens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn view_matrix(&self) -> Mat4x4 {
        mat4x4_look_at(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self, width: u32, height: u32) -> Mat4x4 {
        let aspect_ratio = if height == 0 { 1.0 } else { (width as f32) / (height as f32) };
        mat4x4_perspective(self.fov_y_degrees.to_radians(), aspect_ratio, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: [0.0, 3.0, 15.0],
            target: [0.0, 1.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}
