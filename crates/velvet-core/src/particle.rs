use glam::Vec3;

/// Inverse mass of every free cloth particle.
pub const FREE_INV_MASS: f32 = 1.0;

/// SoA particle storage
pub struct ParticleSet {
    pub count: usize,
    /// Authoritative positions, read by the renderer between ticks.
    pub position: Vec<Vec3>,
    /// Working positions during a substep
    pub predicted: Vec<Vec3>,
    pub velocity: Vec<Vec3>,
    /// 0.0 = pinned (infinite mass)
    pub inv_mass: Vec<f32>,
}

impl ParticleSet {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![Vec3::ZERO; count],
            predicted: vec![Vec3::ZERO; count],
            velocity: vec![Vec3::ZERO; count],
            inv_mass: vec![FREE_INV_MASS; count],
        }
    }

    /// Create a particle set resting at `positions`.
    pub fn from_positions(positions: &[Vec3]) -> Self {
        let mut particles = Self::new(positions.len());
        particles.position.copy_from_slice(positions);
        particles.predicted.copy_from_slice(positions);
        particles
    }

    #[inline]
    pub fn is_pinned(&self, i: usize) -> bool {
        self.inv_mass[i] == 0.0
    }

    /// Fix particle `i` in place. Its velocity is cleared.
    pub fn pin(&mut self, i: usize) {
        self.inv_mass[i] = 0.0;
        self.velocity[i] = Vec3::ZERO;
        self.predicted[i] = self.position[i];
    }

    pub fn unpin(&mut self, i: usize) {
        self.inv_mass[i] = FREE_INV_MASS;
    }
}
