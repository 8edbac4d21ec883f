//! ZISRAW format constants
//!
//! This module defines constants used throughout the CZI processing code,
//! making the code more readable and maintainable by replacing magic numbers
//! with descriptive names.

/// Segment ids as they appear in the 16-byte segment header
pub mod segment_ids {
    /// File header segment, always at offset 0
    pub const FILE_HEADER: &str = "ZISRAWFILE";

    /// XML metadata segment
    pub const METADATA: &str = "ZISRAWMETADATA";

    /// Sub-block directory segment
    pub const DIRECTORY: &str = "ZISRAWDIRECTORY";

    /// Image sub-block segment
    pub const SUBBLOCK: &str = "ZISRAWSUBBLOCK";

    /// Attachment directory segment (not read by this tool)
    pub const ATTACHMENT_DIRECTORY: &str = "ZISRAWATTDIR";

    /// Marker for deallocated segments
    pub const DELETED: &str = "DELETED";
}

/// Fixed sizes of the ZISRAW on-disk structures
pub mod layout {
    /// Segment header: 16-byte id + allocated size + used size
    pub const SEGMENT_HEADER_SIZE: u64 = 32;

    /// Length of the raw segment id field
    pub const SEGMENT_ID_SIZE: usize = 16;

    /// Fixed header in front of the metadata XML document
    pub const METADATA_HEADER_SIZE: u64 = 256;

    /// Reserved bytes after the directory entry count
    pub const DIRECTORY_RESERVED: u64 = 124;

    /// Fixed portion of a DV directory entry before its dimension entries
    pub const DIRECTORY_ENTRY_FIXED_SIZE: u64 = 32;

    /// Size of one dimension entry
    pub const DIMENSION_ENTRY_SIZE: u64 = 20;

    /// A sub-block's pixel data starts at max(this, 16 + entry size)
    /// from the beginning of the segment data
    pub const SUBBLOCK_DATA_MIN_OFFSET: u64 = 256;
}

/// The ZISRAW major version this reader understands
pub const SUPPORTED_MAJOR_VERSION: u32 = 1;

/// Pixel type codes stored in directory entries
pub mod pixel_types {
    pub const GRAY8: u32 = 0;                 // 8-bit unsigned grayscale
    pub const GRAY16: u32 = 1;                // 16-bit unsigned grayscale
    pub const GRAY32_FLOAT: u32 = 2;          // 32-bit float grayscale
    pub const BGR24: u32 = 3;                 // 8-bit BGR triplets
    pub const BGR48: u32 = 4;                 // 16-bit BGR triplets
    pub const BGRA32: u32 = 8;                // 8-bit BGRA
    pub const GRAY64_COMPLEX_FLOAT: u32 = 9;  // complex float grayscale
    pub const BGR192_COMPLEX_FLOAT: u32 = 10; // complex float BGR
    pub const GRAY32: u32 = 11;               // 32-bit integer grayscale
    pub const GRAY64: u32 = 12;               // 64-bit float grayscale
}

/// Sub-block compression codes
pub mod compression {
    pub const UNCOMPRESSED: u32 = 0;  // Raw pixel data
    pub const JPEG: u32 = 1;          // JPEG file payload (legacy)
    pub const LZW: u32 = 2;           // LZW (legacy, rarely written)
    pub const JPEG_XR: u32 = 4;       // JPEG-XR file payload
    pub const ZSTD0: u32 = 5;         // Plain zstd stream
    pub const ZSTD1: u32 = 6;         // zstd stream with a small header
}

/// Dimension identifiers used in dimension entries
pub mod dimensions {
    pub const X: char = 'X';  // Pixel column
    pub const Y: char = 'Y';  // Pixel row
    pub const C: char = 'C';  // Channel
    pub const Z: char = 'Z';  // Focal plane
    pub const T: char = 'T';  // Time point
    pub const S: char = 'S';  // Scene
    pub const M: char = 'M';  // Mosaic tile
}
