//! PNG export strategy
//!
//! Writes channel planes through the image crate. PNG has no multi-page
//! form, so a full 3D stack becomes one file per focal plane with 1-based
//! `_Z<n>` suffixes.

use std::path::PathBuf;

use image::{ImageBuffer, Luma};
use log::info;

use crate::czi::errors::{CziError, CziResult};
use crate::czi::types::PixelType;
use crate::extractor::{ChannelPlane, ChannelStack};
use crate::utils::logger::Logger;

use super::naming::OutputNaming;
use super::strategy::{resolve_slice_index, ExportStrategy};
use super::SliceSelection;

/// PNG format export implementation
pub struct PngExportStrategy<'a> {
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> PngExportStrategy<'a> {
    /// Create a new PNG export strategy
    pub fn new(logger: &'a Logger) -> Self {
        PngExportStrategy { logger }
    }

    /// Write one plane as a PNG file
    fn write_plane(&self, plane: &ChannelPlane, path: &PathBuf) -> CziResult<()> {
        self.logger.log(&format!("Writing PNG to {}", path.display()))?;

        match plane.pixel_type {
            PixelType::Gray8 => {
                let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(plane.width, plane.height, plane.data.clone())
                        .ok_or_else(|| CziError::GenericError(
                            "Plane data does not fit its dimensions".to_string()))?;
                buffer.save(path)
                    .map_err(|e| CziError::GenericError(format!("Failed to save PNG: {}", e)))
            }
            PixelType::Gray16 => {
                let buffer: ImageBuffer<Luma<u16>, Vec<u16>> =
                    ImageBuffer::from_raw(plane.width, plane.height, plane.to_u16_samples())
                        .ok_or_else(|| CziError::GenericError(
                            "Plane data does not fit its dimensions".to_string()))?;
                buffer.save(path)
                    .map_err(|e| CziError::GenericError(format!("Failed to save PNG: {}", e)))
            }
        }
    }
}

impl<'a> ExportStrategy for PngExportStrategy<'a> {
    fn export(&self, stack: &ChannelStack, slice: SliceSelection,
              naming: &OutputNaming) -> CziResult<Vec<PathBuf>> {
        if stack.is_2d() {
            let path = naming.flat_path(self.extension());
            self.write_plane(&stack.planes()[0], &path)?;
            return Ok(vec![path]);
        }

        match slice {
            SliceSelection::All => {
                info!("Writing {} slice files for the stack", stack.depth());

                let mut written = Vec::with_capacity(stack.depth());
                for (z, plane) in stack.planes().iter().enumerate() {
                    // Slice file names start at Z1
                    let path = naming.slice_path(z as u32 + 1, self.extension());
                    self.write_plane(plane, &path)?;
                    written.push(path);
                }
                Ok(written)
            }
            SliceSelection::Single(n) => {
                let index = resolve_slice_index(n, stack.depth())?;
                let path = naming.slice_path(n, self.extension());
                self.write_plane(&stack.planes()[index], &path)?;
                Ok(vec![path])
            }
        }
    }

    fn extension(&self) -> &'static str {
        "png"
    }
}
