//! Perspective camera fixed on the page plane.
//!
//! The camera sits at (0, 0, DISTANCE) looking down -Z. Its vertical fov is
//! chosen so that the frustum slice at z = 0 is exactly `viewport_height`
//! world units tall, which makes one world unit equal one CSS pixel for
//! geometry on that plane. Everything else (near/far, aspect) is conventional.

use glam::{Mat4, Vec3, Vec4};

use crate::picking::Ray;

pub const DISTANCE: f32 = 600.0;
const NEAR: f32 = 100.0;
const FAR: f32 = 2000.0;

#[derive(Debug)]
pub struct Camera {
    width: f32,
    height: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Re-derive aspect and fov from a new viewport size.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Vertical fov that makes the z = 0 plane pixel-true.
    pub fn fov_y(&self) -> f32 {
        2.0 * ((self.height / 2.0) / DISTANCE).atan()
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, DISTANCE)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y(), self.aspect(), NEAR, FAR)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), Vec3::ZERO, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// World-space ray through a point given in normalized device coordinates
    /// (x, y ∈ [-1, 1], y up). Unprojects the near- and far-plane points and
    /// takes the direction between them.
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let inv = self.view_projection().inverse();
        let near = inv * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        Ray {
            origin: near,
            direction: (far - near).normalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_updates_aspect() {
        let mut cam = Camera::new(1920.0, 1080.0);
        assert!((cam.aspect() - 1920.0 / 1080.0).abs() < 1e-6);
        cam.set_viewport(800.0, 800.0);
        assert_eq!(cam.aspect(), 1.0);
    }

    #[test]
    fn fov_makes_image_plane_pixel_true() {
        // Half the viewport height must subtend half the fov at DISTANCE.
        let cam = Camera::new(1280.0, 800.0);
        let half = (cam.fov_y() / 2.0).tan() * DISTANCE;
        assert!((half - 400.0).abs() < 1e-3);
    }

    #[test]
    fn projection_tracks_resize() {
        let mut cam = Camera::new(1000.0, 500.0);
        let before = cam.projection();
        cam.set_viewport(500.0, 1000.0);
        let after = cam.projection();
        assert_ne!(before, after);
        // x_scale / y_scale of a GL projection equals 1/aspect.
        let ratio = after.col(0).x / after.col(1).y;
        assert!((ratio - 1.0 / cam.aspect()).abs() < 1e-5);
    }

    #[test]
    fn center_ray_goes_straight_down_z() {
        let cam = Camera::new(1024.0, 768.0);
        let ray = cam.ray_from_ndc(0.0, 0.0);
        assert!(ray.direction.x.abs() < 1e-5);
        assert!(ray.direction.y.abs() < 1e-5);
        assert!(ray.direction.z < 0.0);
    }

    #[test]
    fn corner_ray_hits_viewport_corner_at_image_plane() {
        let cam = Camera::new(1280.0, 800.0);
        let ray = cam.ray_from_ndc(1.0, 1.0);
        // Walk the ray to z = 0 and check it lands on the pixel-true corner.
        let t = -ray.origin.z / ray.direction.z;
        let hit = ray.origin + ray.direction * t;
        assert!((hit.x - 640.0).abs() < 1e-2);
        assert!((hit.y - 400.0).abs() < 1e-2);
    }
}
