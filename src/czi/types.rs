//! Core CZI data structures

use std::fmt;

use crate::czi::constants::{dimensions, pixel_types};
use crate::czi::directory::DirectoryEntry;
use crate::czi::errors::{CziError, CziResult};
use crate::czi::metadata::ImageDimensions;
use crate::czi::segment::FileHeader;

/// Pixel types the extractor can export
///
/// Fluorescence channel data is grayscale in practice; everything else in
/// the pixel-type table is rejected with a typed error naming the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelType {
    /// 8-bit unsigned grayscale
    Gray8,
    /// 16-bit unsigned grayscale, little-endian
    Gray16,
}

impl PixelType {
    /// Maps a directory entry pixel-type code to a supported pixel type
    pub fn from_code(code: u32) -> CziResult<Self> {
        match code {
            pixel_types::GRAY8 => Ok(PixelType::Gray8),
            pixel_types::GRAY16 => Ok(PixelType::Gray16),
            other => Err(CziError::UnsupportedPixelType(other)),
        }
    }

    /// Bytes one pixel occupies
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            PixelType::Gray8 => 1,
            PixelType::Gray16 => 2,
        }
    }

    /// Bits per sample for the output encoders
    pub fn bits_per_sample(&self) -> u16 {
        match self {
            PixelType::Gray8 => 8,
            PixelType::Gray16 => 16,
        }
    }
}

/// Represents an opened CZI container
///
/// Holds everything the extractor needs to plan its work: the file header,
/// the parsed dimension metadata and the sub-block directory. Pixel data
/// stays on disk until a sub-block is actually requested.
#[derive(Debug)]
pub struct Czi {
    /// The file header segment
    pub header: FileHeader,
    /// Dimension sizes from the metadata document
    pub dimensions: ImageDimensions,
    /// All sub-block directory entries, in directory order
    pub directory: Vec<DirectoryEntry>,
}

impl Czi {
    /// Creates a container structure from its parsed parts
    pub fn new(header: FileHeader, dimensions: ImageDimensions, directory: Vec<DirectoryEntry>) -> Self {
        Czi {
            header,
            dimensions,
            directory,
        }
    }

    /// Full-resolution plane sub-blocks, in directory order
    ///
    /// Pyramid copies never participate in channel selection; the original
    /// acquisition planes are the blocks whose stored extent matches their
    /// logical extent.
    pub fn plane_entries(&self) -> Vec<&DirectoryEntry> {
        self.directory.iter()
            .filter(|entry| entry.is_full_resolution())
            .collect()
    }

    /// Distinct C-axis start indices across the plane sub-blocks
    pub fn channel_starts(&self) -> Vec<i32> {
        let mut starts: Vec<i32> = self.plane_entries().iter()
            .map(|entry| entry.dimension_start(dimensions::C))
            .collect();
        starts.sort_unstable();
        starts.dedup();
        starts
    }

    /// Number of sub-blocks in the directory
    pub fn subblock_count(&self) -> usize {
        self.directory.len()
    }
}

impl fmt::Display for Czi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CZI File:")?;
        writeln!(f, "  Version: {}.{}", self.header.major, self.header.minor)?;
        writeln!(f, "  Dimensions (CZYX): {} x {} x {} x {}",
                 self.dimensions.size_c, self.dimensions.size_z,
                 self.dimensions.size_y, self.dimensions.size_x)?;
        writeln!(f, "  Sub-blocks: {}", self.directory.len())?;

        for entry in &self.directory {
            writeln!(f, "    {}", entry)?;
        }

        Ok(())
    }
}
