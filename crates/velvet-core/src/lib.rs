//! Real-time XPBD cloth simulation.
//!
//! A square cloth grid is integrated under gravity with inextensible
//! structural edges, compliant diagonal bending links and collisions against
//! analytic plane and sphere obstacles. Each fixed tick is split into
//! substeps; each substep predicts, iterates the constraint and contact
//! projections, then derives damped velocities.

pub mod config;
pub mod constraints;
pub mod error;
pub mod math;
pub mod particle;
pub mod render;
pub mod scene;
pub mod shapes;
pub mod solver;
pub mod topology;

pub use config::{SharedParameters, SimulationParameters};
pub use error::{ClothError, ConfigError};
pub use math::Transform;
pub use render::ClothVertex;
pub use scene::SimpleClothScene;
pub use shapes::collider::Collider;
pub use shapes::Shape;
pub use solver::ClothSolver;
pub use topology::{ClothLayout, ClothTopology, Orientation};
