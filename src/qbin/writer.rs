//! Qbin payload writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::geom::{DataFileOffset, DrawingData, Stroke, Vertex};
use crate::util::{BoundingBox, Error, Result};

/// Append-only payload writer.
///
/// Every drawing is written at the current end of the stream and its
/// position is handed back as the drawing's new offset, so offsets are
/// re-minted on every save.
pub struct QbinWriter<W: Write> {
    writer: W,
    pos: u64,
}

impl QbinWriter<BufWriter<File>> {
    /// Create (or truncate) a payload file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        Ok(Self::new(BufWriter::with_capacity(1024 * 1024, file)))
    }
}

impl<W: Write> QbinWriter<W> {
    /// Wrap a stream; its current position is taken as offset 0.
    pub fn new(writer: W) -> Self {
        Self { writer, pos: 0 }
    }

    /// Get the current write position.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Write the 8-byte file header.
    pub fn write_header(&mut self, last_stroke_id: u32) -> Result<()> {
        if self.pos != 0 {
            return Err(Error::invalid(format!("header must be written at offset 0, stream is at {}", self.pos)));
        }
        self.write_u32(last_stroke_id)?;
        self.write_u32(0)
    }

    /// Append a drawing's stroke list and return the offset it was written at.
    pub fn write_drawing_data(&mut self, data: &DrawingData) -> Result<DataFileOffset> {
        let offset = DataFileOffset::at(self.pos);
        let count = i32::try_from(data.strokes.len())
            .map_err(|_| Error::invalid("too many strokes in one drawing"))?;
        self.write_i32(count)?;
        for stroke in &data.strokes {
            self.write_stroke(stroke)?;
        }
        Ok(offset)
    }

    fn write_stroke(&mut self, stroke: &Stroke) -> Result<()> {
        self.write_u32(stroke.id)?;
        self.write_i32(stroke.reserved)?;
        self.write_bounding_box(&stroke.bounding_box)?;
        self.write_i16(stroke.brush_type.code())?;
        self.write_u8(stroke.disable_rotational_opacity as u8)?;
        self.write_u8(stroke.reserved_flag)?;

        let count = i32::try_from(stroke.vertices.len())
            .map_err(|_| Error::invalid(format!("too many vertices in stroke {}", stroke.id)))?;
        self.write_i32(count)?;
        for vertex in &stroke.vertices {
            self.write_vertex(vertex)?;
        }
        Ok(())
    }

    fn write_bounding_box(&mut self, bbox: &BoundingBox) -> Result<()> {
        for v in bbox.to_array() {
            self.write_f32(v)?;
        }
        Ok(())
    }

    fn write_vertex(&mut self, vertex: &Vertex) -> Result<()> {
        for v in vertex.to_floats() {
            self.write_f32(v)?;
        }
        Ok(())
    }

    /// Flush the buffer to the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the stream.
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }

    // ========================================================================
    // Primitive writes
    // ========================================================================

    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.writer.write_u32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.writer.write_i32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    fn write_i16(&mut self, value: i16) -> Result<()> {
        self.writer.write_i16::<LittleEndian>(value)?;
        self.pos += 2;
        Ok(())
    }

    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.writer.write_u8(value)?;
        self.pos += 1;
        Ok(())
    }

    fn write_f32(&mut self, value: f32) -> Result<()> {
        self.writer.write_f32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }
}
