//! Export strategy definitions
//!
//! This module defines the strategy pattern for the output formats,
//! allowing new formats to be added without touching the batch pipeline.

use std::path::PathBuf;

use crate::czi::errors::{CziError, CziResult};
use crate::extractor::ChannelStack;
use crate::utils::logger::Logger;

use super::naming::OutputNaming;
use super::{OutputFormat, SliceSelection};

/// Strategy for writing an extracted channel in one output format
pub trait ExportStrategy {
    /// Write a channel stack according to the slice selection
    ///
    /// # Arguments
    /// * `stack` - The extracted focal-plane stack
    /// * `slice` - Which planes to write; ignored for 2D stacks
    /// * `naming` - Output file naming for this (image, channel) pair
    ///
    /// # Returns
    /// The paths written, in write order
    fn export(&self, stack: &ChannelStack, slice: SliceSelection,
              naming: &OutputNaming) -> CziResult<Vec<PathBuf>>;

    /// File extension this strategy writes
    fn extension(&self) -> &'static str;
}

/// Resolves the 1-based slice number against a stack depth
///
/// Shared by the format strategies so both report range violations the
/// same way.
pub(super) fn resolve_slice_index(slice: u32, depth: usize) -> CziResult<usize> {
    if slice == 0 || slice as usize > depth {
        return Err(CziError::GenericError(format!(
            "Slice {} out of range, stack has {} plane(s)", slice, depth)));
    }
    Ok(slice as usize - 1)
}

/// Factory for creating export strategies
pub struct ExportStrategyFactory;

impl ExportStrategyFactory {
    /// Create the strategy for an output format
    ///
    /// # Arguments
    /// * `format` - The configured output format
    /// * `logger` - Logger for recording operations
    pub fn create_strategy<'a>(format: OutputFormat, logger: &'a Logger)
                               -> Box<dyn ExportStrategy + 'a> {
        match format {
            OutputFormat::Tif => Box::new(super::TiffExportStrategy::new(logger)),
            OutputFormat::Png => Box::new(super::PngExportStrategy::new(logger)),
        }
    }
}
