//! # Quill
//!
//! Reader and writer for Quill scene projects.
//!
//! A project is a directory with a JSON manifest (`Quill.json`) describing
//! the layer tree, and a binary payload (`Quill.qbin`) holding the stroke
//! geometry of every drawing. The manifest references payload records by
//! byte offset.
//!
//! ## Modules
//!
//! - [`util`] - Errors, bounding boxes, colors and math re-exports
//! - [`geom`] - Vertices, strokes and drawings
//! - [`scene`] - Sequence, layer tree, transforms and animation
//! - [`qbin`] - Low-level payload codec
//! - [`manifest`] - Manifest tree codec
//! - [`project`] - Directory load/save linking the two codecs
//!
//! ## Example
//!
//! ```ignore
//! let mut seq = quill::load("MyScene")?;
//!
//! for (name, paint) in seq.paint_layers() {
//!     println!("{}: {} drawings", name, paint.drawings.len());
//! }
//!
//! quill::save(&mut seq, "MyScene_copy")?;
//! ```

pub mod util;
pub mod geom;
pub mod scene;
pub mod qbin;
pub mod manifest;
pub mod project;

// Re-export commonly used types
pub use util::{Error, Result};
pub use scene::Sequence;
pub use project::{load, load_opts, save, save_opts, LoadOptions, SaveOptions};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{BoundingBox, Color, Error, Result, Quat, Vec3, Vec4};
    pub use crate::geom::*;
    pub use crate::scene::*;
    pub use crate::manifest::ManifestLayout;
    pub use crate::project::{load, load_opts, save, save_opts, LoadOptions, SaveOptions};
}
