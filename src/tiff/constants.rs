//! TIFF format constants
//!
//! The subset of the TIFF specification the grayscale writer uses.

/// TIFF header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// "II" byte order marker for little-endian
    pub const LITTLE_ENDIAN_MARKER: [u8; 2] = [0x49, 0x49];
}

/// Field types as defined in the TIFF spec
pub mod field_types {
    pub const SHORT: u16 = 3;  // 16-bit unsigned integer
    pub const LONG: u16 = 4;   // 32-bit unsigned integer
}

/// Standard TIFF tags
pub mod tags {
    pub const NEW_SUBFILE_TYPE: u16 = 254;           // Subfile data descriptor
    pub const IMAGE_WIDTH: u16 = 256;                // Width of the image in pixels
    pub const IMAGE_LENGTH: u16 = 257;               // Height of the image in pixels
    pub const BITS_PER_SAMPLE: u16 = 258;            // Bits per component
    pub const COMPRESSION: u16 = 259;                // Compression scheme
    pub const PHOTOMETRIC_INTERPRETATION: u16 = 262; // Color space of image data
    pub const STRIP_OFFSETS: u16 = 273;              // Offsets to the data strips
    pub const SAMPLES_PER_PIXEL: u16 = 277;          // Number of components per pixel
    pub const ROWS_PER_STRIP: u16 = 278;             // Rows per strip of data
    pub const STRIP_BYTE_COUNTS: u16 = 279;          // Byte counts for strips
    pub const SAMPLE_FORMAT: u16 = 339;              // Interpretation of sample data
}

/// Compression types
pub mod compression {
    pub const NONE: u16 = 1;  // No compression
}

/// Photometric interpretation values
pub mod photometric {
    pub const BLACK_IS_ZERO: u16 = 1;  // Minimum value is black
}

/// Sample format values
pub mod sample_format {
    pub const UNSIGNED: u16 = 1;  // Unsigned integer data
}

/// Subfile type bit flags
pub mod new_subfile_type {
    pub const SINGLE_PAGE: u32 = 2;  // One page of many
}
