//! Math type re-exports and Quill-specific value types.
//!
//! Vectors and quaternions come from `glam`; the bounding box and the
//! RGB color are defined here because their layout is dictated by the
//! payload and manifest formats.

pub use glam::{Quat, Vec3, Vec4};

use bytemuck::{Pod, Zeroable};
use std::fmt;

/// Axis-aligned bounding box.
///
/// Serialized as `MinX, MaxX, MinY, MaxY, MinZ, MaxZ` in both the manifest
/// and the payload, which is why the accessors below exist alongside the
/// `min`/`max` vectors.
#[derive(Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Reset state: inverted bounds so the first extend establishes real ones.
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create a bounding box from min and max points.
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a bounding box from the serialized six-float order.
    #[inline]
    pub fn from_array(v: [f32; 6]) -> Self {
        Self {
            min: Vec3::new(v[0], v[2], v[4]),
            max: Vec3::new(v[1], v[3], v[5]),
        }
    }

    /// Six floats in `MinX, MaxX, MinY, MaxY, MinZ, MaxZ` order.
    #[inline]
    pub fn to_array(&self) -> [f32; 6] {
        [
            self.min.x, self.max.x,
            self.min.y, self.max.y,
            self.min.z, self.max.z,
        ]
    }

    /// Create a bounding box from a single point.
    #[inline]
    pub fn from_point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    /// Put the box back into its empty state.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    /// Check if this box is empty on any axis.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Componentwise merge with another box.
    #[inline]
    pub fn extended(self, other: impl Into<BoundingBox>) -> Self {
        let other = other.into();
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Expand this box to include a point.
    #[inline]
    pub fn extend_point(&mut self, p: Vec3) {
        *self = self.extended(p);
    }

    /// Expand this box to include another box.
    #[inline]
    pub fn extend_box(&mut self, other: &Self) {
        *self = self.extended(*other);
    }

    /// Fold a set of points, starting from [`BoundingBox::EMPTY`].
    pub fn of_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().fold(Self::EMPTY, Self::extended)
    }

    /// Fold a set of boxes, starting from [`BoundingBox::EMPTY`].
    pub fn of_boxes<'a>(boxes: impl IntoIterator<Item = &'a BoundingBox>) -> Self {
        boxes.into_iter().fold(Self::EMPTY, |acc, b| acc.extended(*b))
    }

    /// Get the center of the box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size (extents) of the box.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

impl From<Vec3> for BoundingBox {
    fn from(p: Vec3) -> Self {
        Self::from_point(p)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoundingBox({:?} - {:?})", self.min, self.max)
    }
}

/// Linear RGB color, components in unit range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[f32; 3]> for Color {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}
