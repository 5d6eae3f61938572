//! Qbin binary payload format.
//!
//! The `.qbin` file holds the stroke geometry of every drawing. Drawings are
//! addressed by byte offset from the manifest; the file has no index of its
//! own.
//!
//! ## File Structure
//!
//! ```text
//! +-----------------------+
//! | Last stroke id        |  4 bytes (u32 LE)
//! | Padding               |  4 bytes
//! +-----------------------+
//! | Drawing payload ...   |  at the offset recorded in the manifest
//! +-----------------------+
//!
//! Drawing:  stroke count (i32) + strokes
//! Stroke:   id (u32) | reserved (i32) | bbox (6 x f32) | brush (i16)
//!           | disable rotational opacity (u8) | reserved (u8)
//!           | vertex count (i32) + vertices
//! Vertex:   position, normal, tangent, color (3 x f32 each),
//!           opacity (f32), width (f32)
//! ```

mod format;
mod reader;
mod writer;

pub use format::*;
pub use reader::*;
pub use writer::*;
