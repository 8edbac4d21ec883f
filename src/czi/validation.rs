//! CZI validation utilities
//!
//! This module provides validation functions for CZI files to ensure data
//! integrity and prevent errors when processing potentially malformed files.

use std::io::{Seek, SeekFrom};

use log::warn;

use crate::czi::constants::layout;
use crate::czi::errors::{CziError, CziResult};
use crate::io::seekable::SeekableReader;

/// Validates a segment offset against the file size
///
/// Segment positions recorded in the file header must point past the file
/// header segment itself and stay inside the file.
///
/// # Arguments
/// * `offset` - The offset to validate
/// * `file_size` - The file size for validation
/// * `name` - Name of the segment for error messages
pub fn validate_segment_offset(offset: u64, file_size: u64, name: &str) -> CziResult<()> {
    if offset < layout::SEGMENT_HEADER_SIZE || offset >= file_size {
        return Err(CziError::GenericError(format!(
            "Invalid {} segment offset: {} (file size: {})",
            name, offset, file_size
        )));
    }

    Ok(())
}

/// Gets the file size for validation purposes
///
/// # Arguments
/// * `reader` - The seekable reader to use
///
/// # Returns
/// The file size, or u64::MAX if it couldn't be determined
pub fn get_file_size(reader: &mut dyn SeekableReader) -> CziResult<u64> {
    let current_position = reader.seek(SeekFrom::Current(0))?;
    let file_size = match reader.seek(SeekFrom::End(0)) {
        Ok(size) => {
            reader.seek(SeekFrom::Start(current_position))?;
            size
        }
        Err(e) => {
            warn!("Could not determine file size: {}", e);
            reader.seek(SeekFrom::Start(current_position))?;
            u64::MAX
        }
    };

    Ok(file_size)
}

/// Validates that a decoded plane has the byte length its dimensions imply
///
/// A mismatch means the payload was truncated or mis-described; writing it
/// out anyway would produce a silently corrupt image.
///
/// # Arguments
/// * `actual` - Decoded payload length in bytes
/// * `width` - Plane width in pixels
/// * `height` - Plane height in pixels
/// * `bytes_per_pixel` - Bytes per pixel of the pixel type
pub fn validate_plane_length(actual: usize, width: u32, height: u32, bytes_per_pixel: u32) -> CziResult<()> {
    let expected = width as u64 * height as u64 * bytes_per_pixel as u64;
    if actual as u64 != expected {
        return Err(CziError::GenericError(format!(
            "Plane data is {} bytes, expected {} for {}x{} at {} bytes/pixel",
            actual, expected, width, height, bytes_per_pixel
        )));
    }

    Ok(())
}
