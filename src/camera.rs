// src/camera.rs

use glam::{Mat4, Vec3};

use crate::config;

/// Pinhole-plus-thin-lens camera. Matrices are rebuilt (and inverted) only
/// when the viewport aspect changes; the trace kernel reconstructs world-space
/// rays from the two inverses, so only those are uploaded.
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fovy_rad: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aperture_radius: f32,
    pub focus_distance: f32,
}

/// Matrices for one viewport configuration.
pub struct CameraFrame {
    pub view: Mat4,
    pub proj: Mat4,
    /// Inverse view: camera space -> world space.
    pub to_world: Mat4,
    /// Inverse projection: clip space -> camera space.
    pub inverse_projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: config::CAMERA_EYE,
            target: config::CAMERA_TARGET,
            fovy_rad: config::CAMERA_FOVY,
            z_near: config::Z_NEAR,
            z_far: config::Z_FAR,
            aperture_radius: config::APERTURE_RADIUS,
            focus_distance: config::FOCUS_DISTANCE,
        }
    }
}

impl Camera {
    /// Build the left-handed look-at / perspective pair for `aspect` and
    /// invert both. The inversion happens here, once per (re)configuration,
    /// never per frame.
    pub fn frame_matrices(&self, aspect: f32) -> CameraFrame {
        let view = Mat4::look_at_lh(self.eye, self.target, Vec3::Y);
        let proj = Mat4::perspective_lh(self.fovy_rad, aspect, self.z_near, self.z_far);

        CameraFrame {
            to_world: view.inverse(),
            inverse_projection: proj.inverse(),
            view,
            proj,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mat4_close(a: Mat4, b: Mat4) {
        let a = a.to_cols_array();
        let b = b.to_cols_array();
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-4, "matrix mismatch: {x} vs {y}");
        }
    }

    #[test]
    fn stored_inverses_round_trip() {
        let camera = Camera::default();
        let aspect = config::WIDTH as f32 / config::HEIGHT as f32;
        let frame = camera.frame_matrices(aspect);

        assert_mat4_close(frame.to_world.inverse(), frame.view);
        assert_mat4_close(frame.inverse_projection.inverse(), frame.proj);
    }

    #[test]
    fn to_world_maps_origin_to_eye() {
        let camera = Camera::default();
        let frame = camera.frame_matrices(16.0 / 9.0);

        let origin = frame.to_world.transform_point3(Vec3::ZERO);
        assert!((origin - camera.eye).length() < 1e-4);
    }

    #[test]
    fn aspect_changes_the_projection() {
        let camera = Camera::default();
        let wide = camera.frame_matrices(16.0 / 9.0);
        let square = camera.frame_matrices(1.0);

        assert_ne!(wide.proj.to_cols_array(), square.proj.to_cols_array());
        // The view transform is aspect-independent.
        assert_eq!(wide.view.to_cols_array(), square.view.to_cols_array());
    }
}
