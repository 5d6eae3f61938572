//! Error types for the Quill library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Quill project operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Project directory or one of its required files does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Manifest text could not be parsed into a document object
    #[error("Malformed manifest: {0}")]
    MalformedManifest(PathBuf),

    /// Payload stream is truncated in the middle of a record
    #[error("Unexpected end of file at position {0}")]
    UnexpectedEof(u64),

    /// Invalid record in the payload stream
    #[error("Invalid file structure: {0}")]
    InvalidStructure(String),

    /// A paint layer frame points outside its drawing list
    #[error("Layer '{layer}': frame {frame} references drawing {index} (count: {count})")]
    FrameOutOfRange {
        layer: String,
        frame: usize,
        index: i32,
        count: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }

    /// Map an I/O error raised while reading at `pos`.
    ///
    /// End-of-stream becomes [`Error::UnexpectedEof`] so truncated payloads
    /// are reported with the offending position.
    pub(crate) fn from_read(err: std::io::Error, pos: u64) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof(pos)
        } else {
            Self::Io(err)
        }
    }
}

/// Result type alias for Quill operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::UnexpectedEof(64);
        assert!(e.to_string().contains("64"));

        let e = Error::FrameOutOfRange {
            layer: "Paint".into(),
            frame: 3,
            index: 2,
            count: 2,
        };
        let msg = e.to_string();
        assert!(msg.contains("Paint"));
        assert!(msg.contains("drawing 2"));
    }

    #[test]
    fn test_error_from_read() {
        let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        assert!(matches!(Error::from_read(eof, 12), Error::UnexpectedEof(12)));

        let other = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(Error::from_read(other, 12), Error::Io(_)));
    }
}
