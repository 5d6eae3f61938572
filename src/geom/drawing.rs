//! Drawings: offset-addressed bundles of strokes.

use std::fmt;

use crate::util::BoundingBox;
use super::Stroke;

/// Byte offset of a drawing's payload in the `.qbin` stream.
///
/// The manifest stores it as hexadecimal text and the payload codec as a
/// position; this type is the only place the two meet.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DataFileOffset(i64);

impl DataFileOffset {
    /// No payload materialized yet.
    pub const NONE: Self = Self(-1);

    /// Wrap a stream position.
    #[inline]
    pub const fn at(pos: u64) -> Self {
        Self(pos as i64)
    }

    /// Raw value, `-1` for [`DataFileOffset::NONE`].
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Stream position, or `None` for the sentinel (or any negative value).
    #[inline]
    pub fn position(self) -> Option<u64> {
        u64::try_from(self.0).ok()
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 < 0
    }

    /// Parse the manifest's hexadecimal text.
    ///
    /// Accepts up to 16 hex digits; the value is read as a two's-complement
    /// 64-bit integer so `FFFFFFFFFFFFFFFF` is the sentinel. Anything that
    /// does not parse yields [`DataFileOffset::NONE`].
    pub fn parse_hex(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() || text.starts_with(['+', '-']) {
            return Self::NONE;
        }
        u64::from_str_radix(text, 16)
            .map(|v| Self(v as i64))
            .unwrap_or(Self::NONE)
    }

    /// Upper-case hexadecimal text for the manifest.
    pub fn to_hex(self) -> String {
        format!("{:X}", self.0 as u64)
    }
}

impl Default for DataFileOffset {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Debug for DataFileOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position() {
            Some(pos) => write!(f, "DataFileOffset(0x{:X})", pos),
            None => write!(f, "DataFileOffset(NONE)"),
        }
    }
}

/// Decoded payload of a drawing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawingData {
    pub strokes: Vec<Stroke>,
}

impl DrawingData {
    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    /// Total vertices across all strokes.
    pub fn vertex_count(&self) -> usize {
        self.strokes.iter().map(|s| s.vertices.len()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

/// One keyframe pose of a paint layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Drawing {
    pub bounding_box: BoundingBox,
    pub data_file_offset: DataFileOffset,
    pub data: DrawingData,
}

impl Drawing {
    /// Create a drawing that has not been written yet, computing its bounds.
    pub fn new(data: DrawingData) -> Self {
        let mut drawing = Self { data, ..Default::default() };
        drawing.update_bounding_box(false);
        drawing
    }

    /// Recompute the bounding box from stroke boxes.
    ///
    /// With `recurse`, every stroke box is first recomputed from its vertices.
    pub fn update_bounding_box(&mut self, recurse: bool) {
        if recurse {
            for stroke in &mut self.data.strokes {
                stroke.update_bounding_box();
            }
        }
        self.bounding_box = BoundingBox::of_boxes(self.data.strokes.iter().map(|s| &s.bounding_box));
    }
}
