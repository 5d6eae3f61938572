//! Stroke vertex record.

use bytemuck::{Pod, Zeroable};

use crate::util::{Color, Vec3};

/// One sample along a stroke path.
///
/// The field order is the payload record order: 14 little-endian floats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub color: Color,
    pub opacity: f32,
    pub width: f32,
}

impl Vertex {
    /// Number of floats in a serialized vertex.
    pub const FLOAT_COUNT: usize = 14;

    /// Serialized size in bytes.
    pub const RECORD_SIZE: usize = Self::FLOAT_COUNT * 4;

    /// Create a vertex at `position` with neutral attributes.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            normal: Vec3::Z,
            tangent: Vec3::X,
            color: Color::BLACK,
            opacity: 1.0,
            width: 0.01,
        }
    }

    /// Build a vertex from its serialized float sequence.
    pub fn from_floats(f: &[f32; Self::FLOAT_COUNT]) -> Self {
        Self {
            position: Vec3::new(f[0], f[1], f[2]),
            normal: Vec3::new(f[3], f[4], f[5]),
            tangent: Vec3::new(f[6], f[7], f[8]),
            color: Color::new(f[9], f[10], f[11]),
            opacity: f[12],
            width: f[13],
        }
    }

    /// Serialized float sequence, in record order.
    pub fn to_floats(&self) -> [f32; Self::FLOAT_COUNT] {
        let p = self.position;
        let n = self.normal;
        let t = self.tangent;
        let c = self.color;
        [
            p.x, p.y, p.z,
            n.x, n.y, n.z,
            t.x, t.y, t.z,
            c.r, c.g, c.b,
            self.opacity, self.width,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), Vertex::RECORD_SIZE);
        assert_eq!(Vertex::RECORD_SIZE, 56);
    }

    #[test]
    fn test_vertex_float_order() {
        let floats: [f32; 14] = std::array::from_fn(|i| i as f32);
        let v = Vertex::from_floats(&floats);
        assert_eq!(v.position, Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(v.tangent, Vec3::new(6.0, 7.0, 8.0));
        assert_eq!(v.color, Color::new(9.0, 10.0, 11.0));
        assert_eq!(v.opacity, 12.0);
        assert_eq!(v.width, 13.0);
        assert_eq!(v.to_floats(), floats);

        // Same order as the in-memory POD layout.
        assert_eq!(bytemuck::cast::<Vertex, [f32; 14]>(v), floats);
    }
}
