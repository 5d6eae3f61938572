//! Qbin format constants.

use crate::geom::Vertex;

/// Size of the file header: stroke-id counter plus padding.
pub const HEADER_SIZE: usize = 8;

/// Size of a stroke record before its vertices.
///
/// id (4) + reserved (4) + bounding box (24) + brush (2) + flags (2) +
/// vertex count (4).
pub const STROKE_HEADER_SIZE: usize = 40;

/// Size of a serialized vertex.
pub const VERTEX_SIZE: usize = Vertex::RECORD_SIZE;

/// Size of the stroke count that opens every drawing payload.
pub const DRAWING_HEADER_SIZE: usize = 4;

/// Serialized size of a drawing payload with the given strokes.
pub fn drawing_size(strokes: &[crate::geom::Stroke]) -> usize {
    DRAWING_HEADER_SIZE
        + strokes
            .iter()
            .map(|s| STROKE_HEADER_SIZE + s.vertices.len() * VERTEX_SIZE)
            .sum::<usize>()
}
