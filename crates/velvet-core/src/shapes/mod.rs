/// Obstacle primitives the cloth collides against.
///
/// Contains the analytic plane and sphere correction functions and the
/// per-obstacle `Collider` that tracks the obstacle's transform over time.
pub mod primitives;
pub mod collider;

/// Shape of an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Infinite ground plane at world height 0.
    Plane,
    /// Sphere whose radius is the actor's uniform scale (x component).
    Sphere,
}
