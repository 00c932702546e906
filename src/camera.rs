//! Free-fly first-person camera
//!
//! Yaw/pitch Euler angles with a recomputed basis, WASD translation in the
//! look plane, Q/E for vertical movement, mouse look, and scroll zoom on the
//! field of view.

use glam::{Mat4, Vec3};

const PITCH_LIMIT: f32 = 89.0;
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 45.0;

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    /// Degrees; -90 looks down -z
    yaw: f32,
    /// Degrees, clamped to +/-89
    pitch: f32,
    /// Movement speed in world units per second
    pub move_speed: f32,
    /// Mouse look sensitivity in degrees per pixel
    pub sensitivity: f32,
    /// Vertical field of view in degrees, narrowed by scrolling
    pub zoom: f32,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: -90.0,
            pitch: 0.0,
            move_speed: 2.5,
            sensitivity: 0.1,
            zoom: 45.0,
        };
        camera.update_vectors();
        camera
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Translate along the camera basis. Arguments are signed amounts in
    /// world units (already scaled by dt and speed by the caller, or use
    /// [`Camera::move_speed`] directly).
    pub fn translate(&mut self, forward: f32, strafe: f32, vertical: f32) {
        self.position += self.front * forward;
        self.position += self.right * strafe;
        self.position += self.world_up * vertical;
    }

    /// Apply a mouse delta in pixels.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Apply scroll wheel movement: scrolling up narrows the field of view.
    pub fn zoom_by(&mut self, scroll: f32) {
        self.zoom = (self.zoom - scroll).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let camera = Camera::new(Vec3::ZERO);
        assert!((camera.front() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn view_matrix_maps_camera_position_to_origin() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        let eye = camera.view_matrix().transform_point3(camera.position);
        assert!(eye.length() < 1e-4);
    }

    #[test]
    fn pitch_clamps_at_the_poles() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.look(0.0, -100_000.0);
        // pitch pinned just below straight up, front still normalized
        assert!(camera.front().y > 0.99);
        assert!((camera.front().length() - 1.0).abs() < 1e-5);

        camera.look(0.0, 100_000.0);
        assert!(camera.front().y < -0.99);
    }

    #[test]
    fn zoom_clamps_to_its_range() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.zoom_by(100.0);
        assert_eq!(camera.zoom, 1.0);
        camera.zoom_by(-100.0);
        assert_eq!(camera.zoom, 45.0);
    }

    #[test]
    fn forward_translation_follows_the_front_vector() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.translate(2.0, 0.0, 0.0);
        assert!((camera.position - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
    }
}
