//! Manifest (`Quill.json`) codec.
//!
//! The manifest describes the layer tree and sequence metadata; stroke
//! geometry lives in the payload and is referenced by hexadecimal offset.
//!
//! Reading is tolerant: absent, `null` or unrecognized fields take
//! documented defaults, unsupported layer types are dropped from their
//! parent, and legacy matrix transforms load as identity. Only text that is
//! not a JSON object fails, and that failure is reported as `None`.

mod node;
mod format;
mod reader;
mod writer;
mod state;

pub use format::ManifestLayout;
pub use reader::parse_document;
pub use writer::{sequence_document, write_document};
pub use state::state_document;
