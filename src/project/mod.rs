//! Project directory load and save.
//!
//! A project is a directory holding `Quill.json` (the manifest) and
//! `Quill.qbin` (the payload). The two are linked only by the hexadecimal
//! offsets the manifest stores for each drawing, so the order of the passes
//! matters:
//!
//! - **Load**: parse the manifest, then seek to every drawing's offset in
//!   the payload and decode its strokes in place.
//! - **Save**: write the payload first, re-minting every offset, then write
//!   the manifest that references them.
//!
//! Each operation runs against one exclusive stream handle.

use std::fs;
use std::io::{Read, Seek, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::manifest::{self, ManifestLayout};
use crate::qbin::{QbinReader, QbinWriter};
use crate::scene::Sequence;
use crate::util::{Error, Result};

/// Manifest file name inside a project directory.
pub const MANIFEST_FILE: &str = "Quill.json";
/// Payload file name inside a project directory.
pub const PAYLOAD_FILE: &str = "Quill.qbin";
/// Tool-state file name inside a project directory.
pub const STATE_FILE: &str = "State.json";

// ============================================================================
// Options
// ============================================================================

/// Options for [`load_opts`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Map the payload into memory instead of buffered reads.
    /// Ignored without the `mmap` feature.
    pub use_mmap: bool,
    /// Reject paint layers whose frames index missing drawings.
    pub validate_frames: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            use_mmap: true,
            validate_frames: true,
        }
    }
}

/// Options for [`save_opts`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveOptions {
    pub layout: ManifestLayout,
    /// Write the `State.json` placeholder next to the manifest.
    pub write_state: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            layout: ManifestLayout::default(),
            write_state: true,
        }
    }
}

// ============================================================================
// Load
// ============================================================================

/// Load a project directory with default options.
pub fn load(path: impl AsRef<Path>) -> Result<Sequence> {
    load_opts(path, &LoadOptions::default())
}

/// Load a project directory.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_opts(path: impl AsRef<Path>, opts: &LoadOptions) -> Result<Sequence> {
    let dir = path.as_ref();
    if !dir.is_dir() {
        return Err(Error::NotFound(dir.to_path_buf()));
    }
    let manifest_path = dir.join(MANIFEST_FILE);
    let payload_path = dir.join(PAYLOAD_FILE);
    for file in [&manifest_path, &payload_path] {
        if !file.is_file() {
            return Err(Error::NotFound(file.clone()));
        }
    }

    let text = fs::read_to_string(&manifest_path)?;
    let mut seq = manifest::parse_document(&text)
        .ok_or_else(|| Error::MalformedManifest(manifest_path.clone()))?;

    if opts.validate_frames {
        seq.validate_frames()?;
    }

    #[cfg(feature = "mmap")]
    if opts.use_mmap {
        read_payload_from(&mut seq, QbinReader::open_mmap(&payload_path)?)?;
        debug!("loaded {} paint layers", seq.paint_layers().len());
        return Ok(seq);
    }

    read_payload_from(&mut seq, QbinReader::open(&payload_path)?)?;
    debug!("loaded {} paint layers", seq.paint_layers().len());
    Ok(seq)
}

/// Fill every drawing of `seq` from a payload stream.
///
/// Reads the header into [`Sequence::last_stroke_id`], then decodes each
/// drawing at its recorded offset. Drawings without an offset keep their
/// current data.
pub fn read_payload<R: Read + Seek>(seq: &mut Sequence, stream: R) -> Result<()> {
    read_payload_from(seq, QbinReader::new(stream))
}

pub(crate) fn read_payload_from<R: Read + Seek>(seq: &mut Sequence, mut reader: QbinReader<R>) -> Result<()> {
    seq.last_stroke_id = reader.read_header()?;

    seq.root_layer_mut().try_for_each_paint_mut(&mut |name, paint| {
        for (i, drawing) in paint.drawings.iter_mut().enumerate() {
            let Some(offset) = drawing.data_file_offset.position() else {
                trace!("layer '{}': drawing {} has no payload offset, skipped", name, i);
                continue;
            };
            drawing.data = reader.read_drawing_data_at(offset)?;
        }
        Ok(())
    })
}

// ============================================================================
// Save
// ============================================================================

/// Save a project directory with default options.
///
/// Every drawing's offset is rewritten to its new payload position.
pub fn save(seq: &mut Sequence, path: impl AsRef<Path>) -> Result<()> {
    save_opts(seq, path, &SaveOptions::default())
}

/// Save a project directory, creating it if needed.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save_opts(seq: &mut Sequence, path: impl AsRef<Path>, opts: &SaveOptions) -> Result<()> {
    let dir = path.as_ref();
    seq.validate_frames()?;
    fs::create_dir_all(dir)?;

    // Payload first: the manifest can only reference final offsets.
    let writer = QbinWriter::create(dir.join(PAYLOAD_FILE))?;
    let file = write_payload_to(seq, writer)?;
    file.get_ref().sync_all()?;

    let text = manifest::write_document(seq, opts.layout)?;
    fs::write(dir.join(MANIFEST_FILE), text)?;

    if opts.write_state {
        let state = manifest::state_document();
        fs::write(dir.join(STATE_FILE), serde_json::to_string_pretty(&state)?)?;
    }
    debug!("saved {} paint layers", seq.paint_layers().len());
    Ok(())
}

/// Write the payload of `seq` to a stream, rewriting every drawing offset.
///
/// Returns the stream once everything has been flushed to it.
pub fn write_payload<W: Write>(seq: &mut Sequence, stream: W) -> Result<W> {
    write_payload_to(seq, QbinWriter::new(stream))
}

fn write_payload_to<W: Write>(seq: &mut Sequence, mut writer: QbinWriter<W>) -> Result<W> {
    writer.write_header(seq.last_stroke_id)?;
    seq.root_layer_mut().try_for_each_paint_mut(&mut |name, paint| {
        for drawing in &mut paint.drawings {
            drawing.data_file_offset = writer.write_drawing_data(&drawing.data)?;
        }
        trace!("layer '{}': wrote {} drawings", name, paint.drawings.len());
        Ok(())
    })?;
    writer.finish()
}
