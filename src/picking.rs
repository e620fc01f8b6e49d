//! Ray casting against the scene's planes.
//!
//! Every plane lives axis-aligned in the z = 0 plane, so intersection reduces
//! to one ray/plane solve plus a rectangle containment test — no triangle
//! walking needed. UVs follow the plane mesh convention: (0,0) bottom-left,
//! (1,1) top-right.

use glam::{Vec2, Vec3};

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// A hit-testable rectangle: world-space center plus extent.
#[derive(Debug, Clone, Copy)]
pub struct Quad {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance along the ray to the intersection point.
    pub distance: f32,
    /// Texture coordinate of the intersection, each component in [0, 1].
    pub uv: Vec2,
}

impl Quad {
    /// Intersect a ray with this quad. Returns `None` for misses, rays
    /// parallel to the plane, hits behind the origin, and zero-area quads
    /// (whose UVs would be undefined).
    pub fn raycast(&self, ray: &Ray) -> Option<Hit> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        if ray.direction.z.abs() < f32::EPSILON {
            return None;
        }
        let t = -ray.origin.z / ray.direction.z;
        if t <= 0.0 {
            return None;
        }
        let point = ray.origin + ray.direction * t;
        let local_x = point.x - (self.center.x - self.width / 2.0);
        let local_y = point.y - (self.center.y - self.height / 2.0);
        if local_x < 0.0 || local_x > self.width || local_y < 0.0 || local_y > self.height {
            return None;
        }
        Some(Hit {
            distance: t,
            uv: Vec2::new(local_x / self.width, local_y / self.height),
        })
    }
}

/// Test the ray against every quad and return the index and hit of the
/// nearest intersection, if any. Ties keep the earliest quad, matching
/// document order.
pub fn nearest_hit(ray: &Ray, quads: impl IntoIterator<Item = Quad>) -> Option<(usize, Hit)> {
    let mut best: Option<(usize, Hit)> = None;
    for (i, quad) in quads.into_iter().enumerate() {
        if let Some(hit) = quad.raycast(ray) {
            let closer = best.map_or(true, |(_, b)| hit.distance < b.distance);
            if closer {
                best = Some((i, hit));
            }
        }
    }
    best
}

/// Convert pointer pixel coordinates to normalized device coordinates
/// (x right, y up, both in [-1, 1]).
pub fn pointer_to_ndc(px: f32, py: f32, width: f32, height: f32) -> (f32, f32) {
    ((px / width) * 2.0 - 1.0, -(py / height) * 2.0 + 1.0)
}
