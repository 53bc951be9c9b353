//! Orbit camera for the atom scene.
//!
//! The camera circles a fixed target (the nucleus at the origin) on a
//! yaw/pitch/distance parameterization. Mouse drag feeds `orbit`, the
//! scroll wheel feeds `zoom`, and the parameter panel writes `distance`
//! directly followed by `update_orbital`.

use glam::{Mat4, Vec3};

/// Perspective camera orbiting a target point.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    // Orbital parameters
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
}

/// Initial eye distance, on the +Z axis.
pub const START_DISTANCE: f32 = 155.0;

const MIN_DISTANCE: f32 = 20.0;
const MAX_DISTANCE: f32 = 2000.0;

impl OrbitCamera {
    pub fn new(aspect_ratio: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 70.0f32.to_radians(),
            aspect_ratio,
            near: 0.1,
            far: 10_000.0,
            distance: START_DISTANCE,
            yaw: 0.0,
            pitch: 0.0,
        };
        camera.update_orbital();
        camera
    }

    /// Recompute the eye position from the orbital parameters.
    pub fn update_orbital(&mut self) {
        self.position = self.target
            + Vec3::new(
                self.distance * self.pitch.cos() * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                self.distance * self.pitch.cos() * self.yaw.cos(),
            );
    }

    /// Rotate around the target.
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-1.5, 1.5);
        self.update_orbital();
    }

    /// Move toward or away from the target.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.update_orbital();
    }

    /// Put the camera back on the +Z axis at the start distance.
    pub fn reset(&mut self) {
        self.distance = START_DISTANCE;
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.target = Vec3::ZERO;
        self.update_orbital();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }
}

/// Camera uniform data for shaders. The raw view matrix rides along so the
/// particle shader can extract billboard axes.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &OrbitCamera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            position: [camera.position.x, camera.position.y, camera.position.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_positive_z() {
        let camera = OrbitCamera::new(16.0 / 9.0);
        assert!((camera.position.x).abs() < 1e-4);
        assert!((camera.position.y).abs() < 1e-4);
        assert!((camera.position.z - START_DISTANCE).abs() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = OrbitCamera::new(1.0);
        camera.zoom(1.0e6);
        assert!(camera.distance >= MIN_DISTANCE);
        camera.zoom(-1.0e6);
        assert!(camera.distance <= MAX_DISTANCE);
    }

    #[test]
    fn orbit_keeps_distance() {
        let mut camera = OrbitCamera::new(1.0);
        camera.orbit(0.7, -0.3);
        let d = (camera.position - camera.target).length();
        assert!((d - camera.distance).abs() < 1e-3);
    }
}
