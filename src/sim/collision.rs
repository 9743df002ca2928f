//! Sphere vs. box collision
//!
//! Bodies are spheres, the level is axis-aligned boxes. Resolution pushes
//! the sphere out along the contact normal.

use glam::Vec3;

use super::level::StaticBox;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the box surface
    pub point: Vec3,
    /// Surface normal at contact (pointing toward the sphere center)
    pub normal: Vec3,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a sphere and a static box
pub fn sphere_box_collision(center: Vec3, radius: f32, aabb: &StaticBox) -> CollisionResult {
    let closest = aabb.closest_point(center);
    let offset = center - closest;
    let dist_sq = offset.length_squared();

    if dist_sq > radius * radius {
        return CollisionResult::miss();
    }

    if dist_sq > f32::EPSILON {
        let dist = dist_sq.sqrt();
        return CollisionResult {
            hit: true,
            point: closest,
            normal: offset / dist,
            penetration: radius - dist,
        };
    }

    // Center is inside the box: exit through the nearest face
    let half = aabb.half_extents();
    let local = center - aabb.center;
    let depth = half - local.abs();
    let (axis, face_depth) = if depth.x <= depth.y && depth.x <= depth.z {
        (Vec3::X, depth.x)
    } else if depth.y <= depth.z {
        (Vec3::Y, depth.y)
    } else {
        (Vec3::Z, depth.z)
    };
    let sign = if local.dot(axis) < 0.0 { -1.0 } else { 1.0 };
    let normal = axis * sign;

    CollisionResult {
        hit: true,
        point: center + normal * face_depth,
        normal,
        penetration: face_depth + radius,
    }
}

/// Remove the velocity component pointing into a surface
#[inline]
pub fn slide(velocity: Vec3, normal: Vec3) -> Vec3 {
    let into = velocity.dot(normal);
    if into < 0.0 {
        velocity - normal * into
    } else {
        velocity
    }
}
