//! Qbin payload reader.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::geom::{BrushType, DrawingData, Stroke, Vertex};
use crate::util::{BoundingBox, Error, Result};

/// Sequential, offset-addressed reader over one payload stream.
///
/// The reader owns its stream: seeks from different threads on one handle
/// would corrupt the position, so parallel readers must each open their own.
pub struct QbinReader<R> {
    inner: R,
    pos: u64,
}

impl QbinReader<BufReader<File>> {
    /// Open a payload file with buffered reads.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

#[cfg(feature = "mmap")]
impl QbinReader<std::io::Cursor<memmap2::Mmap>> {
    /// Open a payload file through a read-only memory map.
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
        // Safety: the map is read-only and owned by this reader; the file is
        // not modified by this library while a load is in progress.
        let mmap = unsafe { memmap2::Mmap::map(&file) }?;
        Ok(Self::new(std::io::Cursor::new(mmap)))
    }
}

impl<R: Read + Seek> QbinReader<R> {
    /// Wrap a stream positioned at its start.
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    /// Current stream position.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Consume the reader, returning the stream.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read the 8-byte file header and return the last stroke id.
    pub fn read_header(&mut self) -> Result<u32> {
        self.seek(0)?;
        let last_stroke_id = self.read_u32()?;
        let _padding = self.read_u32()?;
        Ok(last_stroke_id)
    }

    /// Seek to `offset` and decode one drawing's stroke list.
    pub fn read_drawing_data_at(&mut self, offset: u64) -> Result<DrawingData> {
        self.seek(offset)?;
        self.read_drawing_data()
    }

    /// Decode one drawing's stroke list at the current position.
    pub fn read_drawing_data(&mut self) -> Result<DrawingData> {
        let start = self.pos;
        let count = self.read_i32()?;
        let count = usize::try_from(count)
            .map_err(|_| Error::invalid(format!("negative stroke count {} at {}", count, start)))?;

        let mut strokes = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            strokes.push(self.read_stroke()?);
        }
        Ok(DrawingData::new(strokes))
    }

    fn read_stroke(&mut self) -> Result<Stroke> {
        let start = self.pos;
        let id = self.read_u32()?;
        let reserved = self.read_i32()?;
        let bounding_box = self.read_bounding_box()?;
        let brush_type = BrushType::from_code(self.read_i16()?);
        let disable_rotational_opacity = self.read_u8()? != 0;
        let reserved_flag = self.read_u8()?;

        let count = self.read_i32()?;
        let count = usize::try_from(count)
            .map_err(|_| Error::invalid(format!("negative vertex count {} in stroke at {}", count, start)))?;

        let mut vertices = Vec::with_capacity(count.min(65536));
        for _ in 0..count {
            vertices.push(self.read_vertex()?);
        }

        Ok(Stroke {
            id,
            brush_type,
            disable_rotational_opacity,
            bounding_box,
            vertices,
            reserved,
            reserved_flag,
        })
    }

    fn read_bounding_box(&mut self) -> Result<BoundingBox> {
        let mut v = [0f32; 6];
        self.read_f32_into(&mut v)?;
        Ok(BoundingBox::from_array(v))
    }

    fn read_vertex(&mut self) -> Result<Vertex> {
        let mut v = [0f32; Vertex::FLOAT_COUNT];
        self.read_f32_into(&mut v)?;
        Ok(Vertex::from_floats(&v))
    }

    // ========================================================================
    // Primitive reads
    // ========================================================================

    fn seek(&mut self, pos: u64) -> Result<()> {
        self.pos = self.inner.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    fn read_u32(&mut self) -> Result<u32> {
        let v = self.inner.read_u32::<LittleEndian>().map_err(|e| Error::from_read(e, self.pos))?;
        self.pos += 4;
        Ok(v)
    }

    fn read_i32(&mut self) -> Result<i32> {
        let v = self.inner.read_i32::<LittleEndian>().map_err(|e| Error::from_read(e, self.pos))?;
        self.pos += 4;
        Ok(v)
    }

    fn read_i16(&mut self) -> Result<i16> {
        let v = self.inner.read_i16::<LittleEndian>().map_err(|e| Error::from_read(e, self.pos))?;
        self.pos += 2;
        Ok(v)
    }

    fn read_u8(&mut self) -> Result<u8> {
        let v = self.inner.read_u8().map_err(|e| Error::from_read(e, self.pos))?;
        self.pos += 1;
        Ok(v)
    }

    fn read_f32_into(&mut self, dst: &mut [f32]) -> Result<()> {
        self.inner
            .read_f32_into::<LittleEndian>(dst)
            .map_err(|e| Error::from_read(e, self.pos))?;
        self.pos += 4 * dst.len() as u64;
        Ok(())
    }
}
