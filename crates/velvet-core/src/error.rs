//! Error types for cloth construction and parameter validation.
//!
//! The solver loop itself never fails: degenerate geometry is skipped in place.
//! Errors only surface at the boundaries, when a host builds a cloth, pins a
//! particle or hands over a parameter set.

use thiserror::Error;

/// A parameter set that falls outside the range the solver accepts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("substep count must be in [{min}, {max}], got {value}")]
    InvalidSubsteps { value: u32, min: u32, max: u32 },
    #[error("iteration count must be in [{min}, {max}], got {value}")]
    InvalidIterations { value: u32, min: u32, max: u32 },
    #[error("damping must be in [0, 1], got {0}")]
    InvalidDamping(f32),
    #[error("friction must be in [0, 1], got {0}")]
    InvalidFriction(f32),
    #[error("collision margin must be in [0, 1], got {0}")]
    InvalidMargin(f32),
    #[error("bend compliance must be finite and non-negative, got {0}")]
    InvalidBendCompliance(f32),
    #[error("gravity must be finite")]
    NonFiniteGravity,
}

/// Errors raised while building or editing a cloth.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClothError {
    #[error("grid resolution must be in [1, 4096], got {0}")]
    InvalidResolution(u32),
    #[error("particle index {index} out of bounds (count: {count})")]
    ParticleOutOfBounds { index: usize, count: usize },
    #[error("obstacle index {index} out of bounds (count: {count})")]
    ObstacleOutOfBounds { index: usize, count: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
