use glam::{Vec2, Vec3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::SimulationParameters;
use crate::constraints::bending::{
    reset_lambdas as reset_bending_lambdas, set_compliance, solve_bending_constraints,
    BendingConstraint,
};
use crate::constraints::contact::{solve_collisions, ContactParams};
use crate::constraints::distance::{reset_lambdas, solve_distance_constraints, DistanceConstraint};
use crate::error::ClothError;
use crate::particle::ParticleSet;
use crate::render::{self, ClothVertex};
use crate::shapes::collider::Collider;
use crate::topology::ClothTopology;

/// Sub-stepped XPBD cloth solver.
///
/// Owns the particle buffer and the constraint lists built from a
/// [`ClothTopology`]. All mutation goes through [`ClothSolver::step`] and the
/// pinning methods; readers only ever see positions from a completed tick.
pub struct ClothSolver {
    particles: ParticleSet,
    distance_constraints: Vec<DistanceConstraint>,
    bending_constraints: Vec<BendingConstraint>,
    topology: ClothTopology,
    normals: Vec<Vec3>,
    ticks: u64,
}

impl ClothSolver {
    pub fn new(topology: ClothTopology) -> Self {
        let mut particles = ParticleSet::from_positions(topology.positions());
        for &i in topology.pinned() {
            particles.pin(i);
        }

        log::debug!(
            "cloth solver created: resolution {}, {} particles, {} pinned",
            topology.resolution(),
            particles.count,
            topology.pinned().len()
        );

        Self {
            distance_constraints: topology.distance_constraints().to_vec(),
            bending_constraints: topology.bending_constraints().to_vec(),
            normals: Vec::with_capacity(particles.count),
            particles,
            topology,
            ticks: 0,
        }
    }

    /// Build a solver over a default-layout grid of the given resolution.
    pub fn with_resolution(resolution: u32) -> Result<Self, ClothError> {
        Ok(Self::new(ClothTopology::new(resolution)?))
    }

    /// Advance the simulation by one fixed tick.
    ///
    /// The parameters are sanitized and copied once up front; every collider
    /// is refreshed once before any contact query. A non-positive or
    /// non-finite `fixed_dt` leaves the state untouched.
    pub fn step(&mut self, fixed_dt: f32, params: &SimulationParameters, colliders: &mut [Collider]) {
        if !(fixed_dt.is_finite() && fixed_dt > 0.0) {
            log::trace!("skipping tick with dt {fixed_dt}");
            return;
        }
        let params = params.sanitized();

        for collider in colliders.iter_mut() {
            collider.refresh(fixed_dt);
        }
        set_compliance(&mut self.bending_constraints, params.bend_compliance);

        let dt_sub = fixed_dt / params.num_substeps as f32;
        let contact = ContactParams {
            margin: params.collision_margin,
            friction: params.friction,
            dt: dt_sub,
        };

        for _substep in 0..params.num_substeps {
            reset_lambdas(&mut self.distance_constraints);
            reset_bending_lambdas(&mut self.bending_constraints);

            self.predict(dt_sub, params.gravity);

            for _iter in 0..params.num_iterations {
                solve_distance_constraints(&mut self.distance_constraints, &mut self.particles, dt_sub);
                solve_bending_constraints(&mut self.bending_constraints, &mut self.particles, dt_sub);
                solve_collisions(&mut self.particles, colliders, &contact);
            }

            self.update_velocities(dt_sub, params.damping);
        }

        self.ticks += 1;
        log::trace!(
            "tick {}: {} substeps x {} iterations, {} colliders",
            self.ticks,
            params.num_substeps,
            params.num_iterations,
            colliders.len()
        );
    }

    /// Explicit prediction under gravity. Pinned particles stay put.
    fn predict(&mut self, dt: f32, gravity: Vec3) {
        let ParticleSet {
            position,
            predicted,
            velocity,
            inv_mass,
            ..
        } = &mut self.particles;
        let gravity_step = gravity * dt * dt;

        let predict_one = |p: &mut Vec3, x: Vec3, v: Vec3, w: f32| {
            *p = if w > 0.0 { x + v * dt + gravity_step } else { x };
        };

        #[cfg(feature = "parallel")]
        {
            predicted
                .par_iter_mut()
                .zip(position.par_iter())
                .zip(velocity.par_iter())
                .zip(inv_mass.par_iter())
                .for_each(|(((p, x), v), w)| predict_one(p, *x, *v, *w));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for (((p, x), v), w) in predicted
                .iter_mut()
                .zip(position.iter())
                .zip(velocity.iter())
                .zip(inv_mass.iter())
            {
                predict_one(p, *x, *v, *w);
            }
        }
    }

    /// Derive velocities from the position change, damp, and commit.
    fn update_velocities(&mut self, dt: f32, damping: f32) {
        let ParticleSet {
            position,
            predicted,
            velocity,
            ..
        } = &mut self.particles;
        // Scales speed down, never flips direction.
        let damp = (1.0 - damping * dt).clamp(0.0, 1.0);

        let update_one = |x: &mut Vec3, v: &mut Vec3, p: Vec3| {
            *v = (p - *x) / dt * damp;
            *x = p;
        };

        #[cfg(feature = "parallel")]
        {
            position
                .par_iter_mut()
                .zip(velocity.par_iter_mut())
                .zip(predicted.par_iter())
                .for_each(|((x, v), p)| update_one(x, v, *p));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for ((x, v), p) in position.iter_mut().zip(velocity.iter_mut()).zip(predicted.iter()) {
                update_one(x, v, *p);
            }
        }
    }

    /// Pin particle `index` at its current position.
    pub fn pin(&mut self, index: usize) -> Result<(), ClothError> {
        self.check_index(index)?;
        self.particles.pin(index);
        Ok(())
    }

    pub fn unpin(&mut self, index: usize) -> Result<(), ClothError> {
        self.check_index(index)?;
        self.particles.unpin(index);
        Ok(())
    }

    pub fn is_pinned(&self, index: usize) -> bool {
        index < self.particles.count && self.particles.is_pinned(index)
    }

    fn check_index(&self, index: usize) -> Result<(), ClothError> {
        if index < self.particles.count {
            Ok(())
        } else {
            Err(ClothError::ParticleOutOfBounds {
                index,
                count: self.particles.count,
            })
        }
    }

    /// Particle positions after the last completed tick, one per grid vertex.
    pub fn positions(&self) -> &[Vec3] {
        &self.particles.position
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.particles.velocity
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.count
    }

    pub fn distance_constraints(&self) -> &[DistanceConstraint] {
        &self.distance_constraints
    }

    pub fn bending_constraints(&self) -> &[BendingConstraint] {
        &self.bending_constraints
    }

    pub fn topology(&self) -> &ClothTopology {
        &self.topology
    }

    pub fn uvs(&self) -> &[Vec2] {
        self.topology.uvs()
    }

    pub fn indices(&self) -> &[u32] {
        self.topology.indices()
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Mean particle height, handy for watching the cloth settle.
    pub fn average_height(&self) -> f32 {
        if self.particles.count == 0 {
            return 0.0;
        }
        self.particles.position.iter().map(|p| p.y).sum::<f32>() / self.particles.count as f32
    }

    /// Fill `out` with render-ready vertices for the current positions.
    pub fn write_vertices(&mut self, out: &mut Vec<ClothVertex>) {
        render::compute_vertex_normals(&self.particles.position, self.topology.indices(), &mut self.normals);
        render::write_vertices(&self.particles.position, &self.normals, self.topology.uvs(), out);
    }

    /// Put every particle back at its rest position with zero velocity.
    ///
    /// Pins set through [`ClothSolver::pin`] are kept.
    pub fn reset(&mut self) {
        let rest = self.topology.positions();
        self.particles.position.copy_from_slice(rest);
        self.particles.predicted.copy_from_slice(rest);
        self.particles.velocity.fill(Vec3::ZERO);
        reset_lambdas(&mut self.distance_constraints);
        reset_bending_lambdas(&mut self.bending_constraints);
        self.ticks = 0;
    }
}
