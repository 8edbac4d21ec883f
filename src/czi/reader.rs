//! CZI file reader implementation
//!
//! This module implements the reader that walks a ZISRAW container's
//! segment chain: the file header at offset 0, the metadata segment, the
//! sub-block directory, and on demand the individual sub-block segments
//! holding pixel data.

use std::cmp;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, info, warn};

use crate::compression::CompressionFactory;
use crate::czi::constants::{layout, segment_ids};
use crate::czi::directory::DirectoryEntry;
use crate::czi::errors::{CziError, CziResult};
use crate::czi::metadata::{self, ImageDimensions};
use crate::czi::segment::{FileHeader, SegmentHeader};
use crate::czi::types::Czi;
use crate::czi::validation;
use crate::io::seekable::SeekableReader;
use crate::utils::logger::Logger;
use crate::utils::string_utils;

/// Reader for CZI (ZISRAW) containers
pub struct CziReader<'a> {
    /// Logger instance
    logger: &'a Logger,
    /// Current file path
    current_file: Option<String>,
}

impl<'a> CziReader<'a> {
    /// Creates a new CZI reader
    pub fn new(logger: &'a Logger) -> Self {
        CziReader {
            logger,
            current_file: None,
        }
    }

    /// Creates a file reader for the current file
    ///
    /// This is an internal utility to open the current file for reading.
    /// It's used by methods that need a second handle on the file content,
    /// such as sub-block payload reads.
    pub(crate) fn create_reader(&self) -> CziResult<File> {
        match &self.current_file {
            Some(path) => {
                let file = File::open(path)?;
                Ok(file)
            }
            None => Err(CziError::GenericError("No file path specified".to_string()))
        }
    }

    /// Loads a CZI file from the given path
    ///
    /// This is the main entry point for opening a container. It reads the
    /// structural segments only; pixel data is fetched later per sub-block.
    ///
    /// # Arguments
    /// * `filepath` - Path to the CZI file to load
    ///
    /// # Returns
    /// A Czi structure with the header, dimensions and directory
    pub fn load(&mut self, filepath: &str) -> CziResult<Czi> {
        info!("Loading CZI file: {}", filepath);
        self.current_file = Some(filepath.to_string());

        let path = Path::new(filepath);
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(1024 * 1024, file); // 1MB buffer

        self.read(&mut reader)
    }

    /// Reads a CZI container from the given reader
    ///
    /// This method handles the structural walk of a container:
    /// 1. Parse the file header segment at offset 0
    /// 2. Follow the metadata position and parse the dimension sizes
    /// 3. Follow the directory position and parse all sub-block entries
    ///
    /// # Arguments
    /// * `reader` - Any struct implementing the SeekableReader trait
    ///
    /// # Returns
    /// A Czi structure describing the container's contents
    pub fn read(&mut self, reader: &mut dyn SeekableReader) -> CziResult<Czi> {
        debug!("CziReader::read starting");

        reader.seek(SeekFrom::Start(0))?;
        let header = FileHeader::read(reader)?;

        if header.update_pending != 0 {
            warn!("File has a pending update; contents may be inconsistent");
        }

        let file_size = validation::get_file_size(reader)?;
        validation::validate_segment_offset(header.metadata_position, file_size, "metadata")?;
        validation::validate_segment_offset(header.directory_position, file_size, "directory")?;

        let dimensions = self.read_metadata(reader, header.metadata_position)?;
        let directory = self.read_directory(reader, header.directory_position)?;

        info!("Read CZI structure: {} sub-blocks, C={} Z={} Y={} X={}",
              directory.len(), dimensions.size_c, dimensions.size_z,
              dimensions.size_y, dimensions.size_x);

        Ok(Czi::new(header, dimensions, directory))
    }

    /// Reads the metadata segment and resolves the dimension sizes
    ///
    /// # Arguments
    /// * `reader` - The seekable reader to use
    /// * `offset` - Offset of the metadata segment
    fn read_metadata(&self, reader: &mut dyn SeekableReader, offset: u64) -> CziResult<ImageDimensions> {
        reader.seek(SeekFrom::Start(offset))?;
        SegmentHeader::read_expecting(reader, segment_ids::METADATA)?;

        let xml_size = reader.read_u32::<LittleEndian>()?;
        let _attachment_size = reader.read_u32::<LittleEndian>()?;

        // The rest of the fixed 256-byte metadata header is spare
        let data_start = offset + layout::SEGMENT_HEADER_SIZE + layout::METADATA_HEADER_SIZE;
        reader.seek(SeekFrom::Start(data_start))?;

        let mut xml_bytes = vec![0u8; xml_size as usize];
        reader.read_exact(&mut xml_bytes)?;

        // Writers pad the declared XML size with NULs on occasion
        string_utils::trim_trailing_nulls(&mut xml_bytes);

        let xml = String::from_utf8_lossy(&xml_bytes);
        debug!("Metadata document: {} bytes of XML", xml_size);

        metadata::parse_dimensions(&xml)
    }

    /// Reads the sub-block directory segment
    ///
    /// # Arguments
    /// * `reader` - The seekable reader to use
    /// * `offset` - Offset of the directory segment
    ///
    /// # Returns
    /// All directory entries, in directory order
    fn read_directory(&self, reader: &mut dyn SeekableReader, offset: u64) -> CziResult<Vec<DirectoryEntry>> {
        reader.seek(SeekFrom::Start(offset))?;
        SegmentHeader::read_expecting(reader, segment_ids::DIRECTORY)?;

        let entry_count = reader.read_u32::<LittleEndian>()?;
        debug!("Sub-block directory entry count: {}", entry_count);

        reader.seek(SeekFrom::Current(layout::DIRECTORY_RESERVED as i64))?;

        let mut entries = Vec::with_capacity(entry_count as usize);
        for number in 0..entry_count {
            match DirectoryEntry::read(reader) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    // A malformed tail entry should not discard the ones
                    // already parsed; the extractor can often still work
                    warn!("Error reading directory entry {}: {}", number, e);
                    break;
                }
            }
        }

        info!("Read {} sub-block directory entries", entries.len());
        Ok(entries)
    }

    /// Reads and decompresses the pixel payload of one sub-block
    ///
    /// Seeks to the sub-block segment named by the directory entry, skips
    /// past the embedded copy of the entry to the pixel data, reads it and
    /// runs it through the compression handler for the entry's scheme.
    ///
    /// # Arguments
    /// * `entry` - Directory entry naming the sub-block to read
    ///
    /// # Returns
    /// The decompressed pixel data
    pub fn read_subblock_data(&self, entry: &DirectoryEntry) -> CziResult<Vec<u8>> {
        let mut file = self.create_reader()?;
        self.read_subblock_data_from(&mut file, entry)
    }

    /// Reads a sub-block payload from the supplied reader
    ///
    /// # Arguments
    /// * `reader` - The seekable reader to use
    /// * `entry` - Directory entry naming the sub-block to read
    pub fn read_subblock_data_from(&self, reader: &mut dyn SeekableReader,
                                   entry: &DirectoryEntry) -> CziResult<Vec<u8>> {
        reader.seek(SeekFrom::Start(entry.file_position))?;
        SegmentHeader::read_expecting(reader, segment_ids::SUBBLOCK)?;

        let metadata_size = reader.read_u32::<LittleEndian>()?;
        let _attachment_size = reader.read_u32::<LittleEndian>()?;
        let data_size = reader.read_u64::<LittleEndian>()?;

        let embedded = DirectoryEntry::read(reader)?;

        // Pixel data starts at a fixed minimum offset into the segment data
        // so small entries are padded; large entries push the data out
        let data_offset = cmp::max(
            layout::SUBBLOCK_DATA_MIN_OFFSET,
            16 + embedded.serialized_size(),
        );
        let data_start = entry.file_position
            + layout::SEGMENT_HEADER_SIZE
            + data_offset
            + metadata_size as u64;

        debug!("Sub-block at {}: data {} bytes at offset {} (metadata {} bytes)",
               entry.file_position, data_size, data_start, metadata_size);

        reader.seek(SeekFrom::Start(data_start))?;
        let mut data = vec![0u8; data_size as usize];
        reader.read_exact(&mut data)?;

        let handler = CompressionFactory::create_handler(entry.compression)?;
        let decompressed = handler.decompress(&data)?;

        self.logger.log(&format!(
            "Read sub-block at {}: {} bytes compressed, {} bytes decoded",
            entry.file_position, data_size, decompressed.len()))?;

        Ok(decompressed)
    }

    /// Gets the file path if available
    pub fn get_file_path(&self) -> Option<&str> {
        self.current_file.as_deref()
    }
}
