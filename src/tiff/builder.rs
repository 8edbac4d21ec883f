//! TIFF file construction
//!
//! This module assembles grayscale TIFF pages and hands them to the
//! writer. Each page is a complete baseline IFD plus one data strip.

use std::collections::HashMap;

use log::{debug, info};

use crate::czi::errors::CziResult;
use crate::tiff::constants::{compression, field_types, new_subfile_type, photometric, sample_format, tags};
use crate::tiff::ifd::{Ifd, IfdEntry};
use crate::tiff::writer;
use crate::utils::logger::Logger;

/// Builder for creating grayscale TIFF files
pub struct TiffBuilder<'a> {
    logger: &'a Logger,
    pub ifds: Vec<Ifd>,
    strip_data: HashMap<usize, Vec<u8>>,
}

impl<'a> TiffBuilder<'a> {
    /// Create a new TIFF builder
    pub fn new(logger: &'a Logger) -> Self {
        debug!("Creating new TiffBuilder");
        TiffBuilder {
            logger,
            ifds: Vec::new(),
            strip_data: HashMap::new(),
        }
    }

    /// Add one grayscale page with its pixel data
    ///
    /// Sets up the complete baseline tag set for an uncompressed
    /// single-strip grayscale image. Multi-page files flag every page as
    /// one of many so viewers treat the output as a stack.
    ///
    /// # Arguments
    /// * `width` - Page width in pixels
    /// * `height` - Page height in pixels
    /// * `bits_per_sample` - 8 or 16
    /// * `strip` - Row-major sample bytes, little-endian for 16-bit
    /// * `paged` - Whether this page is part of a multi-page stack
    ///
    /// # Returns
    /// The index of the new page
    pub fn add_gray_page(&mut self, width: u32, height: u32, bits_per_sample: u16,
                         strip: Vec<u8>, paged: bool) -> usize {
        let page_index = self.ifds.len();
        info!("Adding grayscale page #{}: {}x{}, {} bits",
              page_index, width, height, bits_per_sample);

        let mut ifd = Ifd::new();

        if paged {
            ifd.add_entry(IfdEntry::new(
                tags::NEW_SUBFILE_TYPE,
                field_types::LONG,
                1,
                new_subfile_type::SINGLE_PAGE));
        }

        ifd.add_entry(IfdEntry::new(
            tags::IMAGE_WIDTH,
            field_types::LONG,
            1,
            width));

        ifd.add_entry(IfdEntry::new(
            tags::IMAGE_LENGTH,
            field_types::LONG,
            1,
            height));

        ifd.add_entry(IfdEntry::new(
            tags::BITS_PER_SAMPLE,
            field_types::SHORT,
            1,
            bits_per_sample as u32));

        ifd.add_entry(IfdEntry::new(
            tags::COMPRESSION,
            field_types::SHORT,
            1,
            compression::NONE as u32));

        // BlackIsZero: 0 is black, the maximum sample value is white
        ifd.add_entry(IfdEntry::new(
            tags::PHOTOMETRIC_INTERPRETATION,
            field_types::SHORT,
            1,
            photometric::BLACK_IS_ZERO as u32));

        // Offset is a placeholder; the writer patches it once the data
        // position is known
        ifd.add_entry(IfdEntry::new(
            tags::STRIP_OFFSETS,
            field_types::LONG,
            1,
            0));

        ifd.add_entry(IfdEntry::new(
            tags::SAMPLES_PER_PIXEL,
            field_types::SHORT,
            1,
            1));

        ifd.add_entry(IfdEntry::new(
            tags::ROWS_PER_STRIP,
            field_types::LONG,
            1,
            height));

        ifd.add_entry(IfdEntry::new(
            tags::STRIP_BYTE_COUNTS,
            field_types::LONG,
            1,
            strip.len() as u32));

        ifd.add_entry(IfdEntry::new(
            tags::SAMPLE_FORMAT,
            field_types::SHORT,
            1,
            sample_format::UNSIGNED as u32));

        self.ifds.push(ifd);
        self.strip_data.insert(page_index, strip);

        page_index
    }

    /// Number of pages added so far
    pub fn page_count(&self) -> usize {
        self.ifds.len()
    }

    /// Write the TIFF file to disk
    pub fn write(&self, output_path: &str) -> CziResult<()> {
        info!("Writing TIFF to {}", output_path);
        self.logger.log(&format!("Writing TIFF to {}", output_path))?;

        writer::write(&self.ifds, &self.strip_data, output_path)
    }
}
