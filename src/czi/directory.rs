//! Sub-block directory structures and methods
//!
//! The directory segment is the index of a CZI file: one entry per stored
//! sub-block, each carrying the pixel type, compression, file position and
//! a list of dimension entries that place the block on the X/Y/C/Z/... axes.
//! Every structural question the extractor asks (which channel, which focal
//! plane, full resolution or pyramid copy) is answered from here without
//! touching pixel data.

use std::fmt;
use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, trace};

use crate::czi::constants::dimensions;
use crate::czi::errors::{CziError, CziResult};
use crate::io::seekable::SeekableReader;
use crate::utils::czi_code_translators;

/// Placement of a sub-block along one dimension
#[derive(Debug, Clone, Copy)]
pub struct DimensionEntry {
    /// Dimension identifier (X, Y, C, Z, T, ...)
    pub dimension: char,
    /// First coordinate covered by the block on this axis
    pub start: i32,
    /// Extent of the block in the full-resolution coordinate space
    pub size: u32,
    /// Physical start coordinate (unused by this tool, kept for display)
    pub start_coordinate: f32,
    /// Extent of the data actually stored (differs from `size` for pyramids)
    pub stored_size: u32,
}

impl DimensionEntry {
    /// Reads a single 20-byte dimension entry
    pub fn read(reader: &mut dyn SeekableReader) -> CziResult<Self> {
        let mut raw = [0u8; 4];
        reader.read_exact(&mut raw)?;
        let dimension = raw[0] as char;

        let start = reader.read_i32::<LittleEndian>()?;
        let size = reader.read_u32::<LittleEndian>()?;
        let start_coordinate = reader.read_f32::<LittleEndian>()?;
        let stored_size = reader.read_u32::<LittleEndian>()?;

        trace!("Dimension entry: {}, start={}, size={}, stored={}",
               dimension, start, size, stored_size);

        Ok(DimensionEntry {
            dimension,
            start,
            size,
            start_coordinate,
            stored_size,
        })
    }
}

/// One `DV` schema entry of the sub-block directory
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Pixel type code of the stored data
    pub pixel_type: u32,
    /// Absolute offset of the sub-block segment
    pub file_position: u64,
    /// File part for multi-file sets
    pub file_part: u32,
    /// Compression code of the stored data
    pub compression: u32,
    /// Zero for full-resolution blocks, non-zero for pyramid copies
    pub pyramid_type: u8,
    /// Dimension entries describing the block's placement
    pub dimension_entries: Vec<DimensionEntry>,
}

impl DirectoryEntry {
    /// Reads a directory entry at the reader's current position
    ///
    /// The same layout appears twice in a CZI file: inside the directory
    /// segment and embedded in each sub-block segment, so the sub-block
    /// reader reuses this parser to find where pixel data begins.
    pub fn read(reader: &mut dyn SeekableReader) -> CziResult<Self> {
        let mut schema = [0u8; 2];
        reader.read_exact(&mut schema)?;
        if &schema != b"DV" {
            return Err(CziError::GenericError(format!(
                "Unsupported directory entry schema: {:?}", schema)));
        }

        let pixel_type = reader.read_u32::<LittleEndian>()?;
        let file_position = reader.read_u64::<LittleEndian>()?;
        let file_part = reader.read_u32::<LittleEndian>()?;
        let compression = reader.read_u32::<LittleEndian>()?;
        let pyramid_type = reader.read_u8()?;

        // Five spare bytes complete the fixed part of the entry
        let mut spare = [0u8; 5];
        reader.read_exact(&mut spare)?;

        let dimension_count = reader.read_u32::<LittleEndian>()?;

        let mut dimension_entries = Vec::with_capacity(dimension_count as usize);
        for _ in 0..dimension_count {
            dimension_entries.push(DimensionEntry::read(reader)?);
        }

        debug!("Directory entry: pixel_type={}, compression={}, position={}, {} dimensions",
               pixel_type, compression, file_position, dimension_entries.len());

        Ok(DirectoryEntry {
            pixel_type,
            file_position,
            file_part,
            compression,
            pyramid_type,
            dimension_entries,
        })
    }

    /// Size of this entry as serialized on disk
    ///
    /// Needed to locate the pixel data inside a sub-block segment, which
    /// starts at `max(256, 16 + entry_size)` bytes into the segment payload.
    pub fn serialized_size(&self) -> u64 {
        crate::czi::constants::layout::DIRECTORY_ENTRY_FIXED_SIZE
            + self.dimension_entries.len() as u64
            * crate::czi::constants::layout::DIMENSION_ENTRY_SIZE
    }

    /// Looks up the dimension entry for the given axis
    pub fn dimension(&self, id: char) -> Option<&DimensionEntry> {
        self.dimension_entries.iter().find(|e| e.dimension == id)
    }

    /// Start index on the given axis, defaulting to 0 when the axis is absent
    ///
    /// Blocks written without a C entry sit on channel 0; the same default
    /// applies to Z for genuinely 2D acquisitions.
    pub fn dimension_start(&self, id: char) -> i32 {
        self.dimension(id).map(|e| e.start).unwrap_or(0)
    }

    /// Pixel width of the stored data
    pub fn stored_width(&self) -> u32 {
        self.dimension(dimensions::X).map(|e| e.stored_size).unwrap_or(0)
    }

    /// Pixel height of the stored data
    pub fn stored_height(&self) -> u32 {
        self.dimension(dimensions::Y).map(|e| e.stored_size).unwrap_or(0)
    }

    /// Whether this block stores full-resolution data
    ///
    /// Pyramid copies either carry a non-zero pyramid type or store fewer
    /// pixels than they cover on the X/Y axes.
    pub fn is_full_resolution(&self) -> bool {
        if self.pyramid_type != 0 {
            return false;
        }

        [dimensions::X, dimensions::Y].iter().all(|&axis| {
            self.dimension(axis)
                .map(|e| e.stored_size == e.size)
                .unwrap_or(false)
        })
    }
}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub-block at {}: {} ({}), {}x{}",
               self.file_position,
               czi_code_translators::pixel_type_code_to_name(self.pixel_type),
               czi_code_translators::compression_code_to_name(self.compression),
               self.stored_width(), self.stored_height())?;

        for entry in &self.dimension_entries {
            write!(f, ", {}={}", entry.dimension, entry.start)?;
        }

        Ok(())
    }
}
