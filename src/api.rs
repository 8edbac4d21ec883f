use log::info;

use crate::commands::export_command::{ExportCommand, ExportOptions};
use crate::czi::errors::CziResult;
use crate::czi::reader::CziReader;
use crate::extractor::detect_channel_layout;
use crate::utils::czi_code_translators::{compression_code_to_name, pixel_type_code_to_name};
use crate::utils::logger::Logger;
use crate::utils::report::ExportReport;

/// Main interface to the CziKit library
pub struct CziKit {
    logger: Logger,
}

impl CziKit {
    /// Create a new CziKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "czikit.log"
    ///
    /// # Returns
    /// A CziKit instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> CziResult<Self> {
        let log_path = log_file.unwrap_or("czikit.log");
        let logger = Logger::new(log_path)?;
        Ok(CziKit { logger })
    }

    /// Analyze a CZI file and return information about its structure
    ///
    /// # Arguments
    /// * `input_path` - Path to the CZI file to analyze
    ///
    /// # Returns
    /// String containing analysis information or an error
    pub fn analyze(&self, input_path: &str) -> CziResult<String> {
        // Open the container and walk its structural segments
        let mut reader = CziReader::new(&self.logger);
        let czi = reader.load(input_path)?;

        let mut result = format!("CZI Analysis Results:\n");
        result.push_str(&format!("  Version: {}.{}\n", czi.header.major, czi.header.minor));
        result.push_str(&format!("  Dimensions (CZYX): {} x {} x {} x {}\n",
                                 czi.dimensions.size_c, czi.dimensions.size_z,
                                 czi.dimensions.size_y, czi.dimensions.size_x));
        result.push_str(&format!("  Sub-blocks: {}\n", czi.subblock_count()));

        match detect_channel_layout(&czi) {
            Ok(layout) => result.push_str(&format!("  Channel storage: {:?}\n", layout)),
            Err(e) => result.push_str(&format!("  Channel storage: unresolved ({})\n", e)),
        }

        // Add details for each sub-block
        for (i, entry) in czi.directory.iter().enumerate() {
            result.push_str(&format!("\nSub-block #{} (offset: {})\n", i, entry.file_position));
            result.push_str(&format!("  Pixel type: {}\n",
                                     pixel_type_code_to_name(entry.pixel_type)));
            result.push_str(&format!("  Compression: {}\n",
                                     compression_code_to_name(entry.compression)));
            result.push_str(&format!("  Size: {}x{}\n",
                                     entry.stored_width(), entry.stored_height()));
        }

        Ok(result)
    }

    /// Batch-export channel images described by a manifest
    ///
    /// This is the library equivalent of running the CLI's default
    /// command; see `ExportOptions` for the settings.
    ///
    /// # Arguments
    /// * `options` - Resolved settings for the run
    ///
    /// # Returns
    /// The run's tallies, or an error when setup fails
    pub fn export_channels(&self, options: ExportOptions) -> CziResult<ExportReport> {
        info!("Starting batch export for manifest {}", options.manifest_path);

        let command = ExportCommand::from_options(options, &self.logger)?;
        command.run()
    }
}
