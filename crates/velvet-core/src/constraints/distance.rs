use crate::math::EPSILON;
use crate::particle::ParticleSet;

/// Compliance of the structural edges: inextensible.
pub const STRUCTURAL_COMPLIANCE: f32 = 0.0;

/// Structural edge between two neighbouring grid particles.
///
/// Solved as an XPBD distance constraint (Macklin et al. 2016): `compliance`
/// is the inverse stiffness, and `lambda` carries the multiplier accumulated
/// over the iterations of one substep.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceConstraint {
    pub i: u32,
    pub j: u32,
    /// Edge length in the rest layout.
    pub rest_length: f32,
    pub compliance: f32,
    pub lambda: f32,
}

impl DistanceConstraint {
    /// Negative compliance is clamped to zero.
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

/// Project one distance constraint onto the predicted positions.
///
/// With `C = |p_i - p_j| - rest_length` and `alpha = compliance / dt^2`,
/// the multiplier step is `-(C + alpha * lambda) / (w_i + w_j + alpha)` and
/// each end moves along the edge by its share of the inverse mass.
///
/// The result lands in `particles.predicted` immediately, so the next
/// constraint in the pass already sees it. Zero-length and fully pinned pairs
/// are left alone, as are links whose `alpha` overflows.
pub(crate) fn project_distance(
    particles: &mut ParticleSet,
    i: usize,
    j: usize,
    rest_length: f32,
    compliance: f32,
    lambda: &mut f32,
    dt_sq: f32,
) {
    let w_i = particles.inv_mass[i];
    let w_j = particles.inv_mass[j];
    let w_sum = w_i + w_j;
    if w_sum < EPSILON {
        return;
    }

    let diff = particles.predicted[i] - particles.predicted[j];
    let dist = diff.length();
    if dist < EPSILON {
        return;
    }

    let stretch = dist - rest_length;
    let gradient = diff / dist;

    let alpha = compliance / dt_sq;
    // Compliance too large to represent: the link exerts no force.
    if !alpha.is_finite() {
        return;
    }
    let d_lambda = -(stretch + alpha * *lambda) / (w_sum + alpha);
    *lambda += d_lambda;

    // Pinned ends are skipped outright so their positions stay bit-exact.
    let step = gradient * d_lambda;
    if w_i > 0.0 {
        particles.predicted[i] += step * w_i;
    }
    if w_j > 0.0 {
        particles.predicted[j] -= step * w_j;
    }
}

/// One Gauss-Seidel sweep over `constraints`, in construction order.
pub fn solve_distance_constraints(
    constraints: &mut [DistanceConstraint],
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

/// Zero every multiplier. Runs at the start of each substep.
pub fn reset_lambdas(constraints: &mut [DistanceConstraint]) {
    for c in constraints.iter_mut() {
        c.lambda = 0.0;
    }
}
