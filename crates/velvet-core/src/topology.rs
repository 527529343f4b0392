use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::constraints::bending::BendingConstraint;
use crate::constraints::distance::{DistanceConstraint, STRUCTURAL_COMPLIANCE};
use crate::error::ClothError;

/// Largest accepted grid resolution. Keeps every particle and triangle index
/// representable as `u32`.
pub const MAX_RESOLUTION: u32 = 4096;

/// Plane the cloth is laid out in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Hanging in the XY plane, rows running down from the origin.
    #[default]
    Vertical,
    /// Lying flat in the XZ plane, rows running towards +Z.
    Horizontal,
}

/// Placement of a freshly built cloth.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothLayout {
    /// Edge length of the square cloth.
    pub size: f32,
    /// World position of the first row's midpoint.
    pub origin: Vec3,
    pub orientation: Orientation,
    /// Pin the two corners of the first row so the cloth hangs.
    pub pin_top_corners: bool,
}

impl Default for ClothLayout {
    fn default() -> Self {
        Self {
            size: 2.0,
            origin: Vec3::ZERO,
            orientation: Orientation::Vertical,
            pin_top_corners: true,
        }
    }
}

/// Regular `(n+1) x (n+1)` cloth grid and its constraints.
///
/// Particles are stored row by row starting at the layout origin: particle
/// `(x, y)` has index `y * (n + 1) + x`. The grid is immutable once
/// built; rest lengths are measured from these initial positions.
#[derive(Clone, Debug)]
pub struct ClothTopology {
    resolution: u32,
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
    pinned: Vec<usize>,
    distance_constraints: Vec<DistanceConstraint>,
    bending_constraints: Vec<BendingConstraint>,
}

impl ClothTopology {
    /// Build a cloth with the default layout.
    pub fn new(resolution: u32) -> Result<Self, ClothError> {
        Self::with_layout(resolution, &ClothLayout::default())
    }

    pub fn with_layout(resolution: u32, layout: &ClothLayout) -> Result<Self, ClothError> {
        if !(1..=MAX_RESOLUTION).contains(&resolution) {
            return Err(ClothError::InvalidResolution(resolution));
        }
        let n = resolution;
        let inv_n = 1.0 / n as f32;

        let mut positions = Vec::with_capacity(((n + 1) * (n + 1)) as usize);
        let mut uvs = Vec::with_capacity(positions.capacity());
        for y in 0..=n {
            for x in 0..=n {
                let u = x as f32 * inv_n;
                let v = y as f32 * inv_n;
                let local = match layout.orientation {
                    Orientation::Vertical => Vec3::new(u - 0.5, -v, 0.0),
                    Orientation::Horizontal => Vec3::new(u - 0.5, 0.0, v),
                };
                positions.push(layout.origin + layout.size * local);
                uvs.push(Vec2::new(u, v));
            }
        }

        Ok(Self::from_positions(n, positions, uvs, layout.pin_top_corners))
    }

    /// Build the constraint set over an arbitrary initial grid layout.
    ///
    /// `positions` must hold `(n+1)^2` points in row-major order. Whatever
    /// shape they describe becomes the rest state.
    fn from_positions(n: u32, positions: Vec<Vec3>, uvs: Vec<Vec2>, pin_top_corners: bool) -> Self {
        let index = |x: u32, y: u32| y * (n + 1) + x;
        let rest = |a: u32, b: u32| positions[a as usize].distance(positions[b as usize]);

        // Horizontal then vertical neighbor edges.
        let mut distance_constraints = Vec::with_capacity((2 * n * (n + 1)) as usize);
        for y in 0..=n {
            for x in 0..n {
                let (a, b) = (index(x, y), index(x + 1, y));
                distance_constraints.push(DistanceConstraint::new(a, b, rest(a, b), STRUCTURAL_COMPLIANCE));
            }
        }
        for y in 0..n {
            for x in 0..=n {
                let (a, b) = (index(x, y), index(x, y + 1));
                distance_constraints.push(DistanceConstraint::new(a, b, rest(a, b), STRUCTURAL_COMPLIANCE));
            }
        }

        // Both diagonals of every cell. Compliance is set from the
        // simulation parameters at the start of every tick.
        let mut bending_constraints = Vec::with_capacity((2 * n * n) as usize);
        let mut indices = Vec::with_capacity((6 * n * n) as usize);
        for y in 0..n {
            for x in 0..n {
                let top_left = index(x, y);
                let top_right = index(x + 1, y);
                let bottom_left = index(x, y + 1);
                let bottom_right = index(x + 1, y + 1);

                bending_constraints.push(BendingConstraint::new(
                    top_left,
                    bottom_right,
                    rest(top_left, bottom_right),
                    0.0,
                ));
                bending_constraints.push(BendingConstraint::new(
                    top_right,
                    bottom_left,
                    rest(top_right, bottom_left),
                    0.0,
                ));

                indices.extend_from_slice(&[top_left, bottom_left, top_right]);
                indices.extend_from_slice(&[top_right, bottom_left, bottom_right]);
            }
        }

        let pinned = if pin_top_corners {
            vec![index(0, 0) as usize, index(n, 0) as usize]
        } else {
            Vec::new()
        };

        log::debug!(
            "cloth topology: {} particles, {} structural, {} bending constraints",
            positions.len(),
            distance_constraints.len(),
            bending_constraints.len()
        );

        Self {
            resolution: n,
            positions,
            uvs,
            indices,
            pinned,
            distance_constraints,
            bending_constraints,
        }
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Number of particles along one edge, `resolution + 1`.
    pub fn side(&self) -> usize {
        self.resolution as usize + 1
    }

    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }

    /// Index of grid particle `(x, y)`.
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.side() + x
    }

    /// Initial (rest) positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    /// Triangle list, two triangles per grid cell, facing +Z (vertical) or +Y
    /// (horizontal).
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Particles pinned by the layout.
    pub fn pinned(&self) -> &[usize] {
        &self.pinned
    }

    pub fn distance_constraints(&self) -> &[DistanceConstraint] {
        &self.distance_constraints
    }

    pub fn bending_constraints(&self) -> &[BendingConstraint] {
        &self.bending_constraints
    }
}
