//! Extracted plane data structures
//!
//! These structures carry decoded pixel data between the extractor and the
//! output writers: a single 2D plane, or an ordered stack of planes for 3D
//! acquisitions.

use crate::czi::errors::{CziError, CziResult};
use crate::czi::types::PixelType;
use crate::czi::validation;

/// One decoded 2D channel plane
///
/// Data is row-major, top-left origin; 16-bit samples are little-endian
/// byte pairs as stored in the container.
#[derive(Debug, Clone)]
pub struct ChannelPlane {
    /// Width in pixels (columns)
    pub width: u32,
    /// Height in pixels (rows)
    pub height: u32,
    /// Pixel type of the data
    pub pixel_type: PixelType,
    /// Raw sample bytes in row-major order
    pub data: Vec<u8>,
}

impl ChannelPlane {
    /// Creates a plane, validating that the data length matches the
    /// dimensions and pixel type
    pub fn new(width: u32, height: u32, pixel_type: PixelType, data: Vec<u8>) -> CziResult<Self> {
        validation::validate_plane_length(data.len(), width, height, pixel_type.bytes_per_pixel())?;

        Ok(ChannelPlane {
            width,
            height,
            pixel_type,
            data,
        })
    }

    /// Get a specific 8-bit value from the plane
    ///
    /// # Arguments
    /// * `x` - Column index
    /// * `y` - Row index
    ///
    /// # Returns
    /// The value at the specified position, or None if out of bounds
    /// or the plane is not 8-bit
    pub fn get_u8(&self, x: u32, y: u32) -> Option<u8> {
        if self.pixel_type != PixelType::Gray8 || x >= self.width || y >= self.height {
            return None;
        }

        let idx = (y * self.width + x) as usize;
        self.data.get(idx).copied()
    }

    /// The plane's samples as native u16 values
    ///
    /// Only meaningful for 16-bit planes; the PNG encoder needs native
    /// samples rather than the on-disk byte pairs.
    pub fn to_u16_samples(&self) -> Vec<u16> {
        self.data.chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect()
    }
}

/// An ordered stack of focal planes for one channel
///
/// A 2D image is a stack of one plane. All planes share dimensions and
/// pixel type; the constructor enforces this.
#[derive(Debug)]
pub struct ChannelStack {
    planes: Vec<ChannelPlane>,
}

impl ChannelStack {
    /// Creates a stack from planes already in Z order
    pub fn new(planes: Vec<ChannelPlane>) -> CziResult<Self> {
        let Some(first) = planes.first() else {
            return Err(CziError::GenericError("Channel stack has no planes".to_string()));
        };

        for plane in &planes[1..] {
            if plane.width != first.width
                || plane.height != first.height
                || plane.pixel_type != first.pixel_type {
                return Err(CziError::GenericError(format!(
                    "Inconsistent planes in stack: {}x{} vs {}x{}",
                    plane.width, plane.height, first.width, first.height)));
            }
        }

        Ok(ChannelStack { planes })
    }

    /// Splits one contiguous block of pixel data into a stack of planes
    ///
    /// Channels stored as separate blocks can pack a whole focal stack
    /// into a single sub-block; the payload is then `plane_count` planes
    /// laid out back to back.
    pub fn from_block_data(width: u32, height: u32, pixel_type: PixelType,
                           data: Vec<u8>, plane_count: u32) -> CziResult<Self> {
        if plane_count == 0 {
            return Err(CziError::GenericError("Plane count of zero".to_string()));
        }

        let plane_bytes = width as usize * height as usize
            * pixel_type.bytes_per_pixel() as usize;
        let expected = plane_bytes * plane_count as usize;
        if data.len() != expected {
            return Err(CziError::GenericError(format!(
                "Block data is {} bytes, expected {} for {} planes of {}x{}",
                data.len(), expected, plane_count, width, height)));
        }

        let planes = data.chunks_exact(plane_bytes)
            .map(|chunk| ChannelPlane::new(width, height, pixel_type, chunk.to_vec()))
            .collect::<CziResult<Vec<_>>>()?;

        Self::new(planes)
    }

    /// Whether the stack holds a single focal plane
    pub fn is_2d(&self) -> bool {
        self.planes.len() == 1
    }

    /// Number of focal planes
    pub fn depth(&self) -> usize {
        self.planes.len()
    }

    /// All planes in Z order
    pub fn planes(&self) -> &[ChannelPlane] {
        &self.planes
    }

    /// A single plane by zero-based index
    pub fn plane(&self, index: usize) -> Option<&ChannelPlane> {
        self.planes.get(index)
    }

    /// Pixel type shared by every plane
    pub fn pixel_type(&self) -> PixelType {
        self.planes[0].pixel_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_validates_data_length() {
        assert!(ChannelPlane::new(4, 2, PixelType::Gray8, vec![0; 8]).is_ok());
        assert!(ChannelPlane::new(4, 2, PixelType::Gray8, vec![0; 7]).is_err());
        assert!(ChannelPlane::new(4, 2, PixelType::Gray16, vec![0; 16]).is_ok());
    }

    #[test]
    fn u16_samples_are_little_endian() {
        let plane = ChannelPlane::new(2, 1, PixelType::Gray16,
                                      vec![0x01, 0x02, 0x03, 0x04]).unwrap();
        assert_eq!(plane.to_u16_samples(), vec![0x0201, 0x0403]);
    }

    #[test]
    fn stack_rejects_mixed_dimensions() {
        let a = ChannelPlane::new(2, 2, PixelType::Gray8, vec![0; 4]).unwrap();
        let b = ChannelPlane::new(2, 3, PixelType::Gray8, vec![0; 6]).unwrap();
        assert!(ChannelStack::new(vec![a, b]).is_err());
    }

    #[test]
    fn block_data_splits_into_planes() {
        let data: Vec<u8> = (0..12).collect();
        let stack = ChannelStack::from_block_data(2, 2, PixelType::Gray8, data, 3).unwrap();
        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.plane(1).unwrap().data, vec![4, 5, 6, 7]);
    }
}
