//! Layer transforms.

use crate::util::{Quat, Vec3};

/// Local transform of a layer: rotation, uniform scale, flip and translation.
///
/// Older manifests store a flat 4x4 matrix instead; those are not decomposed
/// and load as [`Transform::IDENTITY`].
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    pub rotation: Quat,
    pub scale: f32,
    /// Mirror descriptor, empty for no flip.
    pub flip: String,
    pub translation: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        scale: 1.0,
        flip: String::new(),
        translation: Vec3::ZERO,
    };

    /// Pure translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, ..Self::IDENTITY }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Affine matrix for this transform. The flip descriptor is not applied.
    pub fn matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.translation,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
