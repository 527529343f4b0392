use std::sync::{Arc, PoisonError, RwLock};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Smallest and largest substep / iteration counts accepted by the solver.
pub const MIN_STEPS: u32 = 1;
pub const MAX_STEPS: u32 = 20;

/// Upper end of the bend compliance slider. Larger values are accepted.
pub const BEND_COMPLIANCE_SOFT_MAX: f32 = 100.0;

/// Live-editable simulation parameters.
///
/// The solver copies this struct once at the start of every fixed tick, so a
/// change made while a tick runs only takes effect on the next one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    pub num_substeps: u32,
    pub num_iterations: u32,
    pub gravity: Vec3,
    /// Velocity damping rate, applied as `1 - damping * dt_sub` per substep.
    pub damping: f32,
    /// Compliance of the diagonal bending constraints (0 = rigid).
    pub bend_compliance: f32,
    /// Clearance kept between particles and obstacle surfaces.
    pub collision_margin: f32,
    /// Coulomb-style friction coefficient for obstacle contacts.
    pub friction: f32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            num_substeps: 3,
            num_iterations: 3,
            gravity: Vec3::new(0.0, -9.8, 0.0),
            damping: 0.25,
            bend_compliance: 10.0,
            collision_margin: 0.06,
            friction: 0.1,
        }
    }
}

impl SimulationParameters {
    pub fn with_substeps(mut self, num_substeps: u32) -> Self {
        self.num_substeps = num_substeps;
        self
    }

    pub fn with_iterations(mut self, num_iterations: u32) -> Self {
        self.num_iterations = num_iterations;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_bend_compliance(mut self, bend_compliance: f32) -> Self {
        self.bend_compliance = bend_compliance;
        self
    }

    pub fn with_collision_margin(mut self, collision_margin: f32) -> Self {
        self.collision_margin = collision_margin;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Check every field against the accepted range.
    ///
    /// Reports the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_STEPS..=MAX_STEPS).contains(&self.num_substeps) {
            return Err(ConfigError::InvalidSubsteps {
                value: self.num_substeps,
                min: MIN_STEPS,
                max: MAX_STEPS,
            });
        }
        if !(MIN_STEPS..=MAX_STEPS).contains(&self.num_iterations) {
            return Err(ConfigError::InvalidIterations {
                value: self.num_iterations,
                min: MIN_STEPS,
                max: MAX_STEPS,
            });
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFiniteGravity);
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ConfigError::InvalidDamping(self.damping));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(ConfigError::InvalidFriction(self.friction));
        }
        if !(0.0..=1.0).contains(&self.collision_margin) {
            return Err(ConfigError::InvalidMargin(self.collision_margin));
        }
        if !(self.bend_compliance.is_finite() && self.bend_compliance >= 0.0) {
            return Err(ConfigError::InvalidBendCompliance(self.bend_compliance));
        }
        Ok(())
    }

    /// Return a copy clamped into the accepted range.
    ///
    /// NaN scalars fall back to the default value of that field. A clamped
    /// set is logged once per call.
    pub fn sanitized(&self) -> Self {
        if let Err(err) = self.validate() {
            log::warn!("clamping simulation parameters: {err}");
        } else {
            return *self;
        }

        let defaults = Self::default();
        let unit = |value: f32, fallback: f32| {
            if value.is_nan() {
                fallback
            } else {
                value.clamp(0.0, 1.0)
            }
        };

        Self {
            num_substeps: self.num_substeps.clamp(MIN_STEPS, MAX_STEPS),
            num_iterations: self.num_iterations.clamp(MIN_STEPS, MAX_STEPS),
            gravity: if self.gravity.is_finite() {
                self.gravity
            } else {
                defaults.gravity
            },
            damping: unit(self.damping, defaults.damping),
            bend_compliance: if self.bend_compliance.is_nan() {
                defaults.bend_compliance
            } else {
                self.bend_compliance.clamp(0.0, f32::MAX)
            },
            collision_margin: unit(self.collision_margin, defaults.collision_margin),
            friction: unit(self.friction, defaults.friction),
        }
    }
}

/// Parameter set shared between a UI thread and the thread running the
/// fixed-step loop.
///
/// Readers take a full copy with [`SharedParameters::snapshot`] before the
/// tick starts, so no field can change between substeps.
#[derive(Clone, Debug, Default)]
pub struct SharedParameters {
    inner: Arc<RwLock<SimulationParameters>>,
}

impl SharedParameters {
    pub fn new(params: SimulationParameters) -> Self {
        Self {
            inner: Arc::new(RwLock::new(params)),
        }
    }

    /// Sanitized copy of the current parameters.
    pub fn snapshot(&self) -> SimulationParameters {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.sanitized()
    }

    /// Edit the parameters in place.
    pub fn update<F: FnOnce(&mut SimulationParameters)>(&self, edit: F) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        edit(&mut guard);
    }

    pub fn replace(&self, params: SimulationParameters) {
        self.update(|p| *p = params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters_are_valid() {
        assert_eq!(SimulationParameters::default().validate(), Ok(()));
    }

    #[test]
    fn test_sanitized_is_identity_for_valid_sets() {
        let params = SimulationParameters::default().with_friction(0.7);
        assert_eq!(params.sanitized(), params);
    }

    #[test]
    fn test_nan_damping_falls_back_to_default() {
        let params = SimulationParameters::default().with_damping(f32::NAN);
        assert_eq!(params.sanitized().damping, 0.25);
    }
}
