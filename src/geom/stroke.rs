//! Brush strokes.

use crate::util::{BoundingBox, NamedEnum};
use super::Vertex;

/// Brush used to draw a stroke.
///
/// Capped variants are not separate types: they are encoded by zero-width
/// first and last vertices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BrushType {
    Cylinder,
    #[default]
    Ellipse,
    Ribbon,
    Cube,
    Line,
    /// Payload code not recognized by this library, kept as read.
    Unknown(i16),
}

impl BrushType {
    /// Code of the name fallback, which has no payload code of its own.
    pub const UNKNOWN_CODE: i16 = -1;

    /// Decode a payload code; anything outside the known range is `Unknown`.
    pub fn from_code(code: i16) -> Self {
        match code {
            0 => Self::Cylinder,
            1 => Self::Ellipse,
            2 => Self::Ribbon,
            3 => Self::Cube,
            4 => Self::Line,
            other => Self::Unknown(other),
        }
    }

    /// Payload code of this brush.
    pub fn code(self) -> i16 {
        match self {
            Self::Cylinder => 0,
            Self::Ellipse => 1,
            Self::Ribbon => 2,
            Self::Cube => 3,
            Self::Line => 4,
            Self::Unknown(code) => code,
        }
    }
}

impl NamedEnum for BrushType {
    const FALLBACK: Self = Self::Unknown(Self::UNKNOWN_CODE);

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Cylinder" => Some(Self::Cylinder),
            "Ellipse" => Some(Self::Ellipse),
            "Ribbon" => Some(Self::Ribbon),
            "Cube" => Some(Self::Cube),
            "Line" => Some(Self::Line),
            "Unknown" => Some(Self::FALLBACK),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Cylinder => "Cylinder",
            Self::Ellipse => "Ellipse",
            Self::Ribbon => "Ribbon",
            Self::Cube => "Cube",
            Self::Line => "Line",
            Self::Unknown(_) => "Unknown",
        }
    }
}

/// One continuous brush path.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Authoring identifier. Real files contain out-of-range values,
    /// so this is carried as-is and never validated.
    pub id: u32,
    pub brush_type: BrushType,
    pub disable_rotational_opacity: bool,
    pub bounding_box: BoundingBox,
    pub vertices: Vec<Vertex>,
    /// Unidentified 32-bit field following the id.
    pub reserved: i32,
    /// Unidentified flag byte following the rotational-opacity flag.
    pub reserved_flag: u8,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            id: 0,
            brush_type: BrushType::Ellipse,
            disable_rotational_opacity: true,
            bounding_box: BoundingBox::EMPTY,
            vertices: Vec::new(),
            reserved: 0,
            reserved_flag: 0,
        }
    }
}

impl Stroke {
    /// Create a stroke from vertices, computing its bounding box.
    pub fn new(id: u32, brush_type: BrushType, vertices: Vec<Vertex>) -> Self {
        let mut stroke = Self { id, brush_type, vertices, ..Default::default() };
        stroke.update_bounding_box();
        stroke
    }

    /// Recompute the bounding box from vertex positions.
    pub fn update_bounding_box(&mut self) {
        self.bounding_box = BoundingBox::of_points(self.vertices.iter().map(|v| v.position));
    }
}
