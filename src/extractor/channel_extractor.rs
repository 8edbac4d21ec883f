//! Channel extraction implementation
//!
//! This module implements the per-image extraction step: open a container,
//! resolve its channel layout, pull the sub-blocks of the requested channel
//! and assemble them into an ordered focal-plane stack.

use log::{debug, info, warn};

use crate::czi::constants::dimensions;
use crate::czi::directory::DirectoryEntry;
use crate::czi::errors::{CziError, CziResult};
use crate::czi::reader::CziReader;
use crate::czi::types::{Czi, PixelType};
use crate::utils::logger::Logger;

use super::layout::{detect_channel_layout, ChannelLayout};
use super::plane::{ChannelPlane, ChannelStack};

/// Extracts single-channel plane stacks from CZI files
pub struct ChannelExtractor<'a> {
    /// Logger for recording operations
    logger: &'a Logger,
    /// Reader for walking the container
    reader: CziReader<'a>,
}

impl<'a> ChannelExtractor<'a> {
    /// Create a new channel extractor
    ///
    /// # Arguments
    /// * `logger` - Logger for recording operations
    pub fn new(logger: &'a Logger) -> Self {
        ChannelExtractor {
            logger,
            reader: CziReader::new(logger),
        }
    }

    /// Extract one channel of a CZI file as a plane stack
    ///
    /// # Arguments
    /// * `filepath` - Path to the CZI file
    /// * `channel_nr` - Zero-based channel index from the manifest
    ///
    /// # Returns
    /// The channel's focal planes in Z order, or an error when the
    /// channel does not exist or the container cannot be decoded
    pub fn extract_channel(&mut self, filepath: &str, channel_nr: u32) -> CziResult<ChannelStack> {
        info!("Extracting channel {} from {}", channel_nr, filepath);

        let czi = self.reader.load(filepath)?;
        self.extract_from(&czi, channel_nr)
    }

    /// Extract a channel from an already-opened container
    ///
    /// # Arguments
    /// * `czi` - The opened container structure
    /// * `channel_nr` - Zero-based channel index
    pub fn extract_from(&mut self, czi: &Czi, channel_nr: u32) -> CziResult<ChannelStack> {
        let dims = czi.dimensions;

        if channel_nr >= dims.size_c {
            return Err(CziError::ChannelUnavailable {
                requested: channel_nr,
                available: dims.size_c,
            });
        }

        let layout = detect_channel_layout(czi)?;
        debug!("Channel layout: {:?}", layout);

        match layout {
            ChannelLayout::DimensionAxis => self.extract_by_axis(czi, channel_nr),
            ChannelLayout::Blocked => self.extract_by_block(czi, channel_nr),
        }
    }

    /// Extraction for containers with a C dimension axis
    ///
    /// Selects every full-resolution sub-block whose C start equals the
    /// requested channel and orders them along Z.
    fn extract_by_axis(&mut self, czi: &Czi, channel_nr: u32) -> CziResult<ChannelStack> {
        let mut selected: Vec<&DirectoryEntry> = czi.plane_entries()
            .into_iter()
            .filter(|entry| entry.dimension_start(dimensions::C) == channel_nr as i32)
            .collect();

        if selected.is_empty() {
            return Err(CziError::GenericError(format!(
                "No sub-blocks found for channel {}", channel_nr)));
        }

        selected.sort_by_key(|entry| entry.dimension_start(dimensions::Z));

        if selected.len() as u32 != czi.dimensions.size_z {
            warn!("Channel {} has {} plane blocks but metadata reports SizeZ={}",
                  channel_nr, selected.len(), czi.dimensions.size_z);
        }

        let mut planes = Vec::with_capacity(selected.len());
        for entry in selected {
            planes.push(self.read_plane(entry)?);
        }

        self.logger.log(&format!("Extracted {} plane(s) for channel {}",
                                 planes.len(), channel_nr))?;

        ChannelStack::new(planes)
    }

    /// Extraction for containers with blocked channel storage
    ///
    /// The Nth full-resolution block holds the Nth channel. A 3D blocked
    /// channel packs its whole focal stack into the one block, so the
    /// payload is split along Z afterwards.
    fn extract_by_block(&mut self, czi: &Czi, channel_nr: u32) -> CziResult<ChannelStack> {
        let planes = czi.plane_entries();
        let entry = planes.get(channel_nr as usize).copied().ok_or_else(|| {
            CziError::GenericError(format!(
                "No block at position {} for blocked channel storage", channel_nr))
        })?;

        let pixel_type = PixelType::from_code(entry.pixel_type)?;
        let data = self.reader.read_subblock_data(entry)?;

        let width = entry.stored_width();
        let height = entry.stored_height();
        let plane_bytes = czi.dimensions.plane_bytes(pixel_type.bytes_per_pixel());

        if czi.dimensions.size_z > 1 && data.len() as u64 == plane_bytes * czi.dimensions.size_z as u64 {
            debug!("Blocked channel {} carries a {}-plane focal stack",
                   channel_nr, czi.dimensions.size_z);
            return ChannelStack::from_block_data(width, height, pixel_type,
                                                 data, czi.dimensions.size_z);
        }

        let plane = ChannelPlane::new(width, height, pixel_type, data)?;
        ChannelStack::new(vec![plane])
    }

    /// Reads and validates a single plane sub-block
    fn read_plane(&mut self, entry: &DirectoryEntry) -> CziResult<ChannelPlane> {
        let pixel_type = PixelType::from_code(entry.pixel_type)?;
        let data = self.reader.read_subblock_data(entry)?;

        ChannelPlane::new(entry.stored_width(), entry.stored_height(), pixel_type, data)
    }
}
