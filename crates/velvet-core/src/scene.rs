//! Ready-made "simple cloth" scenario: a hanging cloth, an infinite ground
//! plane and a sphere swinging back and forth underneath it.
//!
//! The scene also plays the host's role for the solver: it owns the
//! parameters and colliders, feeds the sphere's transform every tick and turns
//! variable frame times into whole fixed ticks.

use glam::Vec3;

use crate::config::SimulationParameters;
use crate::error::ClothError;
use crate::shapes::collider::Collider;
use crate::solver::ClothSolver;
use crate::topology::{ClothLayout, ClothTopology};

pub const DEFAULT_FIXED_DT: f32 = 1.0 / 60.0;
pub const DEFAULT_RESOLUTION: u32 = 16;
pub const SPHERE_RADIUS: f32 = 0.6;
pub const CLOTH_ORIGIN: Vec3 = Vec3::new(0.0, 2.5, 0.0);

/// Upper bound on fixed ticks run by one `advance` call.
const MAX_TICKS_PER_ADVANCE: u32 = 8;

pub struct SimpleClothScene {
    pub solver: ClothSolver,
    pub params: SimulationParameters,
    colliders: Vec<Collider>,
    pub paused: bool,
    fixed_dt: f32,
    elapsed: f32,
    accumulator: f32,
    sphere: usize,
}

impl SimpleClothScene {
    pub fn new() -> Result<Self, ClothError> {
        Self::with_resolution(DEFAULT_RESOLUTION)
    }

    pub fn with_resolution(resolution: u32) -> Result<Self, ClothError> {
        let layout = ClothLayout {
            origin: CLOTH_ORIGIN,
            ..ClothLayout::default()
        };
        let solver = ClothSolver::new(ClothTopology::with_layout(resolution, &layout)?);

        let colliders = vec![
            Collider::plane(),
            Collider::sphere(sphere_position(0.0), SPHERE_RADIUS),
        ];

        Ok(Self {
            solver,
            params: SimulationParameters::default(),
            colliders,
            paused: false,
            fixed_dt: DEFAULT_FIXED_DT,
            elapsed: 0.0,
            accumulator: 0.0,
            sphere: 1,
        })
    }

    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Change the fixed tick length. Non-positive values are ignored.
    pub fn set_fixed_dt(&mut self, fixed_dt: f32) {
        if fixed_dt.is_finite() && fixed_dt > 0.0 {
            self.fixed_dt = fixed_dt;
        }
    }

    /// Simulated time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Obstacles in contact order: ground plane, swinging sphere, then any
    /// added with [`SimpleClothScene::add_collider`].
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Append an obstacle after the built-in ones; returns its index.
    pub fn add_collider(&mut self, collider: Collider) -> usize {
        self.colliders.push(collider);
        self.colliders.len() - 1
    }

    pub fn sphere(&self) -> &Collider {
        &self.colliders[self.sphere]
    }

    /// Run one fixed tick: move the sphere, then step the cloth.
    pub fn tick(&mut self) {
        self.elapsed += self.fixed_dt;
        self.colliders[self.sphere].set_position(sphere_position(self.elapsed));
        self.solver.step(self.fixed_dt, &self.params, &mut self.colliders);
    }

    /// Consume `frame_dt` seconds of wall time in whole fixed ticks.
    ///
    /// Leftover time is carried to the next call. Returns the number of ticks
    /// run. While paused no time accumulates.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if self.paused || !(frame_dt.is_finite() && frame_dt > 0.0) {
            return 0;
        }

        self.accumulator += frame_dt;
        let mut ticks = 0;
        while self.accumulator >= self.fixed_dt && ticks < MAX_TICKS_PER_ADVANCE {
            self.tick();
            self.accumulator -= self.fixed_dt;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_ADVANCE && self.accumulator >= self.fixed_dt {
            log::warn!("dropping {:.3}s of simulation time", self.accumulator);
            self.accumulator = 0.0;
        }
        ticks
    }
}

/// Sphere path: sliding back and forth along Z, resting on the ground.
pub fn sphere_position(time: f32) -> Vec3 {
    Vec3::new(0.0, SPHERE_RADIUS, -(time * 2.0).cos())
}
