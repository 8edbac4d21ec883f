//! CZI structure analysis command
//!
//! This module implements the command for inspecting a single container:
//! dimension metadata, per-sub-block placement, pixel types, compression,
//! and which channel storage layout the extractor would assume.

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::compression::CompressionFactory;
use crate::czi::constants::dimensions;
use crate::czi::errors::{CziError, CziResult};
use crate::czi::reader::CziReader;
use crate::czi::types::Czi;
use crate::extractor::detect_channel_layout;
use crate::utils::czi_code_translators::{compression_code_to_name, pixel_type_code_to_name};
use crate::utils::logger::Logger;

/// Command for analyzing CZI file structure
pub struct AnalyzeCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Whether to enable verbose output
    verbose: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> AnalyzeCommand<'a> {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new AnalyzeCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CziResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| CziError::GenericError("Missing input file".to_string()))?
            .clone();

        let verbose = args.get_flag("verbose");

        Ok(AnalyzeCommand {
            input_file,
            verbose,
            logger,
        })
    }

    /// Display basic container information
    fn display_summary(&self, czi: &Czi) {
        info!("CZI Analysis Results:");
        info!("  Version: {}.{}", czi.header.major, czi.header.minor);
        info!("  Dimensions (CZYX): {} x {} x {} x {}",
              czi.dimensions.size_c, czi.dimensions.size_z,
              czi.dimensions.size_y, czi.dimensions.size_x);
        info!("  Sub-blocks: {}", czi.subblock_count());
    }

    /// Display one sub-block directory entry
    fn display_subblock(&self, czi: &Czi, index: usize) {
        let entry = &czi.directory[index];

        info!("\nSub-block #{} (offset: {})", index, entry.file_position);
        info!("  Pixel type: {} ({})",
              entry.pixel_type, pixel_type_code_to_name(entry.pixel_type));
        info!("  Compression: {} ({})",
              entry.compression, compression_code_to_name(entry.compression));

        if CompressionFactory::is_supported(entry.compression) {
            info!("    (Compression supported for extraction)");
        } else {
            info!("    (Compression NOT supported for extraction)");
        }

        if entry.pyramid_type != 0 {
            info!("  Pyramid copy (type {}), ignored by extraction", entry.pyramid_type);
        }

        for dim in &entry.dimension_entries {
            info!("  {}: start={}, size={}, stored={}",
                  dim.dimension, dim.start, dim.size, dim.stored_size);
        }
    }

    /// Display the channel storage layout the extractor would assume
    fn display_layout(&self, czi: &Czi) {
        match detect_channel_layout(czi) {
            Ok(layout) => info!("\nChannel storage layout: {:?}", layout),
            Err(e) => warn!("Channel layout could not be resolved: {}", e),
        }

        let starts = czi.channel_starts();
        info!("Distinct {} starts: {:?}",
              crate::utils::czi_code_translators::dimension_id_to_name(dimensions::C),
              starts);
    }
}

impl<'a> Command for AnalyzeCommand<'a> {
    fn execute(&self) -> CziResult<()> {
        info!("Analyzing {}", self.input_file);
        self.logger.log(&format!("Analyzing {}", self.input_file))?;

        let mut reader = CziReader::new(self.logger);
        let czi = reader.load(&self.input_file)?;

        self.display_summary(&czi);

        if self.verbose {
            for index in 0..czi.directory.len() {
                self.display_subblock(&czi, index);
            }
        }

        self.display_layout(&czi);

        Ok(())
    }
}
