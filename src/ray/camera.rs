use super::constants::*;
use glam::{Mat4, Vec3};

/// Right-handed perspective camera shared by all three layers.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Slow drift of the eye around its rest position.
    pub fn sway(&mut self, time: f64) {
        self.eye.x = (time * f64::from(CAMERA_SWAY_RATE_X)).sin() as f32 * CAMERA_SWAY;
        self.eye.y = (time * f64::from(CAMERA_SWAY_RATE_Y)).cos() as f32 * CAMERA_SWAY;
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
