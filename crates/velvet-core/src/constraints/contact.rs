use glam::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::math::length_and_direction;
use crate::particle::ParticleSet;
use crate::shapes::collider::Collider;

/// Contact parameters shared by every obstacle during one solve pass.
#[derive(Clone, Copy, Debug)]
pub struct ContactParams {
    /// Clearance kept from every obstacle surface.
    pub margin: f32,
    /// Coulomb friction coefficient (0 = frictionless).
    pub friction: f32,
    /// Substep length.
    pub dt: f32,
}

/// Friction displacement for a contact that was just corrected by `correction`.
///
/// `rel_vel` is the particle's implied velocity relative to the obstacle
/// surface. Its tangential part, as a displacement over `dt`, is removed up to
/// `friction * |correction|`: deeper penetration clamps harder.
pub fn friction_displacement(correction: Vec3, rel_vel: Vec3, friction: f32, dt: f32) -> Vec3 {
    if friction <= 0.0 || dt <= 0.0 {
        return Vec3::ZERO;
    }
    let Some((depth, normal)) = length_and_direction(correction) else {
        return Vec3::ZERO;
    };

    let vn = rel_vel.dot(normal);
    let vt = rel_vel - normal * vn;
    match length_and_direction(vt) {
        Some((vt_len, tangent)) => {
            let max_friction = friction * depth;
            let friction_mag = (vt_len * dt).min(max_friction);
            -tangent * friction_mag
        }
        None => Vec3::ZERO,
    }
}

/// Push one predicted position out of every collider, in collider order.
///
/// `position` is the particle's position at the start of the substep and is
/// only used to estimate its velocity for friction.
pub fn resolve_point(
    mut predicted: Vec3,
    position: Vec3,
    colliders: &[Collider],
    params: &ContactParams,
) -> Vec3 {
    for collider in colliders {
        let correction = collider.compute_correction(predicted, params.margin);
        if correction == Vec3::ZERO {
            continue;
        }
        predicted += correction;

        let rel_vel = (predicted - position) / params.dt - collider.velocity();
        predicted += friction_displacement(correction, rel_vel, params.friction, params.dt);
    }
    predicted
}

/// Resolve obstacle contacts for every free particle.
///
/// Corrections are positional and bypass the Lagrange multiplier bookkeeping.
/// Pinned particles are never moved. Each particle only reads and writes its
/// own slot, so the result does not depend on evaluation order.
pub fn solve_collisions(particles: &mut ParticleSet, colliders: &[Collider], params: &ContactParams) {
    if colliders.is_empty() {
        return;
    }

    let ParticleSet {
        position,
        predicted,
        inv_mass,
        ..
    } = particles;

    #[cfg(feature = "parallel")]
    {
        predicted
            .par_iter_mut()
            .zip(position.par_iter())
            .zip(inv_mass.par_iter())
            .filter(|(_, w)| **w > 0.0)
            .for_each(|((p, x), _)| *p = resolve_point(*p, *x, colliders, params));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for ((p, x), w) in predicted.iter_mut().zip(position.iter()).zip(inv_mass.iter()) {
            if *w > 0.0 {
                *p = resolve_point(*p, *x, colliders, params);
            }
        }
    }
}
