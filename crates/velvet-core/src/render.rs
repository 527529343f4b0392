//! Vertex data handed to the renderer after each tick.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::math::length_and_direction;

/// GPU-compatible cloth vertex: 32 bytes, position / normal / uv.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ClothVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Recompute area-weighted vertex normals from the triangle list.
///
/// Each triangle's unnormalized face normal is accumulated at its three
/// corners. Vertices whose accumulated normal vanishes get `Vec3::Z`, the
/// normal of the undeformed cloth.
pub fn compute_vertex_normals(positions: &[Vec3], indices: &[u32], normals: &mut Vec<Vec3>) {
    normals.clear();
    normals.resize(positions.len(), Vec3::ZERO);

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    for n in normals.iter_mut() {
        *n = length_and_direction(*n).map_or(Vec3::Z, |(_, dir)| dir);
    }
}

/// Interleave positions, normals and uvs into `out`, replacing its contents.
pub fn write_vertices(positions: &[Vec3], normals: &[Vec3], uvs: &[Vec2], out: &mut Vec<ClothVertex>) {
    out.clear();
    out.extend(
        positions
            .iter()
            .zip(normals)
            .zip(uvs)
            .map(|((p, n), uv)| ClothVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
            }),
    );
}
