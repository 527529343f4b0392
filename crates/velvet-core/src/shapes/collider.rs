use glam::{Mat4, Vec3};

use crate::math::Transform;
use crate::shapes::primitives::{plane_correction, sphere_correction};
use crate::shapes::Shape;

/// A kinematic obstacle the cloth collides against.
///
/// The host moves the obstacle by feeding its world transform with
/// [`Collider::set_transform`] at any time. The solver calls
/// [`Collider::refresh`] exactly once per fixed tick, which promotes that
/// transform to `current` and derives the obstacle velocity by backward
/// difference. Correction queries only ever read `current`.
#[derive(Clone, Debug)]
pub struct Collider {
    shape: Shape,
    /// Transform most recently fed by the host; not yet visible to queries.
    target: Transform,
    current: Transform,
    last: Transform,
    velocity: Vec3,
}

impl Collider {
    pub fn new(shape: Shape, transform: Transform) -> Self {
        Self {
            shape,
            target: transform,
            current: transform,
            last: transform,
            velocity: Vec3::ZERO,
        }
    }

    pub fn plane() -> Self {
        Self::new(Shape::Plane, Transform::IDENTITY)
    }

    /// Sphere obstacle of the given radius (stored as uniform scale).
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self::new(Shape::Sphere, Transform::from_position_scale(center, radius))
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Feed the obstacle's latest world transform.
    pub fn set_transform(&mut self, transform: Transform) {
        self.target = transform;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.target.position = position;
    }

    /// Promote the fed transform to current and recompute the velocity.
    ///
    /// Without obstacle movement between two refreshes the velocity is zero.
    pub fn refresh(&mut self, fixed_dt: f32) {
        self.last = self.current;
        self.current = self.target;
        self.velocity = if fixed_dt > 0.0 {
            (self.current.position - self.last.position) / fixed_dt
        } else {
            Vec3::ZERO
        };
    }

    pub fn transform(&self) -> &Transform {
        &self.current
    }

    pub fn last_transform(&self) -> &Transform {
        &self.last
    }

    pub fn matrix(&self) -> Mat4 {
        self.current.matrix()
    }

    /// Surface velocity used for contact friction.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Displacement that moves `point` out of the obstacle, or zero.
    pub fn compute_correction(&self, point: Vec3, margin: f32) -> Vec3 {
        match self.shape {
            Shape::Plane => plane_correction(point, margin),
            Shape::Sphere => {
                sphere_correction(point, self.current.position, self.current.scale.x, margin)
            }
        }
    }
}
