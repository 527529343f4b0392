//! Analytic correction functions for the obstacle primitives.
//!
//! Each function returns a displacement, not a force: adding it to the query
//! point moves the point onto the primitive's surface (plus margin) along the
//! shortest separating direction. Points outside the primitive get `Vec3::ZERO`.

use glam::Vec3;

use crate::math::length_and_direction;

/// Infinite horizontal ground plane at world height 0.
///
/// The plane sits at `y = 0` regardless of where its actor is placed; only the
/// margin moves the contact surface.
pub fn plane_correction(point: Vec3, margin: f32) -> Vec3 {
    if point.y < margin {
        Vec3::new(0.0, margin - point.y, 0.0)
    } else {
        Vec3::ZERO
    }
}

/// Sphere of `radius` centered at `center`, inflated by `margin`.
///
/// A query exactly at the center has no push-out direction and yields zero.
pub fn sphere_correction(point: Vec3, center: Vec3, radius: f32, margin: f32) -> Vec3 {
    let radius = radius + margin;
    match length_and_direction(point - center) {
        Some((distance, direction)) if distance < radius => direction * (radius - distance),
        _ => Vec3::ZERO,
    }
}
