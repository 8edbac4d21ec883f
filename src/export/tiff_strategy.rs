//! TIF export strategy
//!
//! Writes channel planes through the in-crate grayscale TIFF writer.
//! A 2D image becomes a single-page file, a full stack becomes one
//! multi-page file, and a slice selection picks one plane out of a stack.

use std::path::PathBuf;

use log::info;

use crate::czi::errors::CziResult;
use crate::extractor::{ChannelPlane, ChannelStack};
use crate::tiff::TiffBuilder;
use crate::utils::logger::Logger;

use super::naming::OutputNaming;
use super::strategy::{resolve_slice_index, ExportStrategy};
use super::SliceSelection;

/// TIF format export implementation
pub struct TiffExportStrategy<'a> {
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> TiffExportStrategy<'a> {
    /// Create a new TIF export strategy
    pub fn new(logger: &'a Logger) -> Self {
        TiffExportStrategy { logger }
    }

    /// Write one plane as a single-page file
    fn write_single(&self, plane: &ChannelPlane, path: &PathBuf) -> CziResult<()> {
        let mut builder = TiffBuilder::new(self.logger);
        builder.add_gray_page(plane.width, plane.height,
                              plane.pixel_type.bits_per_sample(),
                              plane.data.clone(), false);
        builder.write(path.to_string_lossy().as_ref())
    }
}

impl<'a> ExportStrategy for TiffExportStrategy<'a> {
    fn export(&self, stack: &ChannelStack, slice: SliceSelection,
              naming: &OutputNaming) -> CziResult<Vec<PathBuf>> {
        // 2D images ignore the slice selection entirely
        if stack.is_2d() {
            let path = naming.flat_path(self.extension());
            self.write_single(&stack.planes()[0], &path)?;
            return Ok(vec![path]);
        }

        match slice {
            SliceSelection::All => {
                let path = naming.flat_path(self.extension());
                info!("Writing {}-page stack to {}", stack.depth(), path.display());

                let mut builder = TiffBuilder::new(self.logger);
                for plane in stack.planes() {
                    builder.add_gray_page(plane.width, plane.height,
                                          plane.pixel_type.bits_per_sample(),
                                          plane.data.clone(), true);
                }
                builder.write(path.to_string_lossy().as_ref())?;

                Ok(vec![path])
            }
            SliceSelection::Single(n) => {
                let index = resolve_slice_index(n, stack.depth())?;
                let path = naming.slice_path(n, self.extension());
                self.write_single(&stack.planes()[index], &path)?;
                Ok(vec![path])
            }
        }
    }

    fn extension(&self) -> &'static str {
        "tif"
    }
}
