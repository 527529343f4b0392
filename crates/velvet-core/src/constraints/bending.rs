use crate::constraints::distance::project_distance;
use crate::particle::ParticleSet;

/// Diagonal bending constraint for cloth simulation.
///
/// Links the two opposite corners of a grid cell, i.e. the far vertices of the
/// two triangles that share the cell's other diagonal:
///
/// ```text
///   i---+
///   | \ |
///   +---j
/// ```
///
/// Stretching this diagonal is what folding the cell out of plane requires,
/// so its compliance sets the cloth's bending stiffness independently of the
/// inextensible structural edges. Higher compliance values produce softer
/// bending; zero compliance produces a rigid cell.
#[derive(Clone, Debug, PartialEq)]
pub struct BendingConstraint {
    /// Corner particle A.
    pub i: u32,
    /// Opposite corner particle B.
    pub j: u32,
    /// Rest length of the diagonal.
    pub rest_length: f32,
    /// XPBD compliance, copied from the simulation parameters every tick.
    pub compliance: f32,
    /// Lagrange multiplier accumulator, reset each substep.
    pub lambda: f32,
}

impl BendingConstraint {
    pub fn new(i: u32, j: u32, rest_length: f32, compliance: f32) -> Self {
        Self {
            i,
            j,
            rest_length,
            compliance: compliance.max(0.0),
            lambda: 0.0,
        }
    }
}

/// Set the compliance of every bending constraint.
pub fn set_compliance(constraints: &mut [BendingConstraint], compliance: f32) {
    let compliance = compliance.max(0.0);
    for c in constraints.iter_mut() {
        c.compliance = compliance;
    }
}

/// Solve all bending constraints once, in construction order.
///
/// Uses the same XPBD distance projection as the structural edges.
pub fn solve_bending_constraints(
    constraints: &mut [BendingConstraint],
    particles: &mut ParticleSet,
    dt: f32,
) {
    let dt_sq = dt * dt;
    for c in constraints.iter_mut() {
        project_distance(
            particles,
            c.i as usize,
            c.j as usize,
            c.rest_length,
            c.compliance,
            &mut c.lambda,
            dt_sq,
        );
    }
}

/// Zero every multiplier before the first iteration of a substep.
pub fn reset_lambdas(constraints: &mut [BendingConstraint]) {
    for c in constraints.iter_mut() {
        c.lambda = 0.0;
    }
}
