//! ZISRAW segment header and file header parsing
//!
//! A CZI file is a flat sequence of segments. Every segment starts with the
//! same 32-byte header: a 16-byte ASCII id padded with NULs, the allocated
//! size and the used size. The segment payload follows immediately after.
//! All integers in the container are little-endian.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use log::debug;

use crate::czi::constants::{layout, segment_ids, SUPPORTED_MAJOR_VERSION};
use crate::czi::errors::{CziError, CziResult};
use crate::io::seekable::SeekableReader;
use crate::utils::string_utils;

/// Header common to every segment in the container
#[derive(Debug, Clone)]
pub struct SegmentHeader {
    /// ASCII segment id with NUL padding stripped
    pub id: String,
    /// Bytes reserved for the segment payload
    pub allocated_size: u64,
    /// Bytes of the payload actually in use
    pub used_size: u64,
}

impl SegmentHeader {
    /// Reads a segment header at the reader's current position
    pub fn read(reader: &mut dyn SeekableReader) -> CziResult<Self> {
        let mut raw_id = [0u8; layout::SEGMENT_ID_SIZE];
        reader.read_exact(&mut raw_id)?;

        let id = string_utils::ascii_id(&raw_id);
        let allocated_size = reader.read_u64::<LittleEndian>()?;
        let used_size = reader.read_u64::<LittleEndian>()?;

        debug!("Segment header: id={}, allocated={}, used={}", id, allocated_size, used_size);

        Ok(SegmentHeader {
            id,
            allocated_size,
            used_size,
        })
    }

    /// Reads a segment header and verifies it carries the expected id
    ///
    /// # Arguments
    /// * `reader` - The seekable reader to use
    /// * `expected` - Segment id the caller requires at this position
    pub fn read_expecting(reader: &mut dyn SeekableReader, expected: &str) -> CziResult<Self> {
        let header = Self::read(reader)?;
        if header.id != expected {
            return Err(CziError::InvalidSegmentId(header.id));
        }
        Ok(header)
    }

    /// Payload size to trust when walking the file
    ///
    /// Writers are allowed to over-allocate segments; the used size is
    /// authoritative whenever it is non-zero.
    pub fn payload_size(&self) -> u64 {
        if self.used_size != 0 {
            self.used_size
        } else {
            self.allocated_size
        }
    }
}

/// Contents of the ZISRAWFILE segment at offset 0
#[derive(Debug, Clone)]
pub struct FileHeader {
    /// Major format version, must be 1
    pub major: u32,
    /// Minor format version
    pub minor: u32,
    /// Identifies the file set this part belongs to
    pub primary_file_guid: [u8; 16],
    /// Identifies this particular file
    pub file_guid: [u8; 16],
    /// Part number in a multi-file set
    pub file_part: u32,
    /// Absolute offset of the sub-block directory segment
    pub directory_position: u64,
    /// Absolute offset of the metadata segment
    pub metadata_position: u64,
    /// Non-zero while a writer has an update in flight
    pub update_pending: u32,
    /// Absolute offset of the attachment directory segment
    pub attachment_directory_position: u64,
}

impl FileHeader {
    /// Reads the file header segment, which must sit at offset 0
    ///
    /// # Arguments
    /// * `reader` - The seekable reader, positioned at the start of the file
    ///
    /// # Returns
    /// The parsed file header, or an error if the segment id or the
    /// format version is not one this reader understands
    pub fn read(reader: &mut dyn SeekableReader) -> CziResult<Self> {
        SegmentHeader::read_expecting(reader, segment_ids::FILE_HEADER)?;

        let major = reader.read_u32::<LittleEndian>()?;
        let minor = reader.read_u32::<LittleEndian>()?;

        if major != SUPPORTED_MAJOR_VERSION {
            return Err(CziError::UnsupportedVersion(major));
        }

        // Two reserved u32 fields sit between the version and the GUIDs
        reader.read_u32::<LittleEndian>()?;
        reader.read_u32::<LittleEndian>()?;

        let mut primary_file_guid = [0u8; 16];
        reader.read_exact(&mut primary_file_guid)?;
        let mut file_guid = [0u8; 16];
        reader.read_exact(&mut file_guid)?;

        let file_part = reader.read_u32::<LittleEndian>()?;
        let directory_position = reader.read_u64::<LittleEndian>()?;
        let metadata_position = reader.read_u64::<LittleEndian>()?;
        let update_pending = reader.read_u32::<LittleEndian>()?;
        let attachment_directory_position = reader.read_u64::<LittleEndian>()?;

        debug!("File header: version {}.{}, directory at {}, metadata at {}",
               major, minor, directory_position, metadata_position);

        Ok(FileHeader {
            major,
            minor,
            primary_file_guid,
            file_guid,
            file_part,
            directory_position,
            metadata_position,
            update_pending,
            attachment_directory_position,
        })
    }
}
