//! Geometry model: vertices, strokes and drawings.
//!
//! Plain value types; the only logic is bounding-box maintenance.

mod vertex;
mod stroke;
mod drawing;

pub use vertex::*;
pub use stroke::*;
pub use drawing::*;
