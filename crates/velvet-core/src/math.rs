use glam::{Mat4, Quat, Vec3};

/// Lengths below this are treated as zero when normalizing.
pub const EPSILON: f32 = 1e-10;

/// World transform of an obstacle actor: translation, rotation, scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Translation with a uniform scale, the usual shape of a sphere obstacle.
    pub fn from_position_scale(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::splat(scale),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Split `v` into its length and unit direction, or `None` when too short.
#[inline]
pub fn length_and_direction(v: Vec3) -> Option<(f32, Vec3)> {
    let len = v.length();
    if len > EPSILON {
        Some((len, v / len))
    } else {
        None
    }
}
