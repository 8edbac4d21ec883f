//! Batch channel export command
//!
//! This module implements the default command: walk the manifest, open
//! each selected CZI file, extract the requested channel planes and write
//! them out in the configured format, tallying as it goes.

use std::fs;
use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::ArgMatches;
use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::config::RunConfig;
use crate::czi::errors::{CziError, CziResult};
use crate::export::{ExportStrategy, ExportStrategyFactory, OutputFormat, OutputNaming, SliceSelection};
use crate::extractor::ChannelExtractor;
use crate::manifest::{ChannelFilter, ChannelRecord, Manifest, Selection};
use crate::utils::logger::Logger;
use crate::utils::report::ExportReport;
use crate::utils::ProgressTracker;

/// Resolved settings for one batch run
///
/// Built from CLI arguments merged with an optional configuration file,
/// or directly by library callers through the API facade.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Path of the manifest CSV
    pub manifest_path: String,
    /// Root directory the manifest folders are relative to
    pub data_path: String,
    /// Directory the exported images are written into
    pub output_path: String,
    /// Output format name (tif or png)
    pub format: String,
    /// Channel-name filter spec
    pub channel: String,
    /// Slice number, 0 for the whole stack
    pub slice: u32,
    /// Whether an existing output directory may be reused
    pub overwrite: bool,
}

/// Command for batch-exporting channel images
pub struct ExportCommand<'a> {
    /// Path of the manifest CSV
    manifest_path: String,
    /// Root directory for the manifest's relative paths
    data_path: PathBuf,
    /// Output directory
    output_path: PathBuf,
    /// Output format
    format: OutputFormat,
    /// Channel-name filter
    filter: ChannelFilter,
    /// Slice selection for 3D images
    slice: SliceSelection,
    /// Whether an existing output directory may be reused
    overwrite: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ExportCommand<'a> {
    /// Create a new export command from CLI arguments
    ///
    /// Settings resolve in order: explicit command-line option, then the
    /// configuration file (when `--config` was given), then the built-in
    /// default the argument parser carries.
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new ExportCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CziResult<Self> {
        info!("Creating new export command from arguments");

        let config = match args.get_one::<String>("config") {
            Some(path) => {
                info!("Loading configuration file: {}", path);
                RunConfig::from_file(path)?
            }
            None => RunConfig::default(),
        };

        let manifest_path = args.get_one::<String>("input").cloned()
            .or(config.manifest.clone())
            .ok_or_else(|| CziError::GenericError(
                "Missing manifest file (positional argument or config `manifest`)".to_string()))?;
        info!("Manifest file: {}", manifest_path);

        let data_path = Self::resolve(args, "data", config.data_path.clone());
        info!("Data path: {}", data_path);

        let output_path = Self::resolve(args, "output", config.output_path.clone());
        info!("Output path: {}", output_path);

        let format = Self::resolve(args, "format", config.output_format.clone());
        info!("Output format: {}", format);

        let channel = Self::resolve(args, "channel", config.channel.clone());
        info!("Channel filter: {}", channel);

        let slice_str = Self::resolve(args, "slice", config.slice.map(|s| s.to_string()));
        let slice = slice_str.parse::<u32>()
            .map_err(|_| CziError::GenericError(format!("Invalid slice number: {}", slice_str)))?;
        info!("Slice selection: {}", slice);

        let overwrite = args.get_flag("overwrite") || config.overwrite.unwrap_or(false);
        info!("Overwrite existing output: {}", overwrite);

        Self::from_options(ExportOptions {
            manifest_path,
            data_path,
            output_path,
            format,
            channel,
            slice,
            overwrite,
        }, logger)
    }

    /// Create an export command from resolved options
    ///
    /// # Arguments
    /// * `options` - Settings for the run
    /// * `logger` - Logger for recording operations
    pub fn from_options(options: ExportOptions, logger: &'a Logger) -> CziResult<Self> {
        let format = OutputFormat::from_name(&options.format)?;

        Ok(ExportCommand {
            manifest_path: options.manifest_path,
            data_path: PathBuf::from(options.data_path),
            output_path: PathBuf::from(options.output_path),
            format,
            filter: ChannelFilter::new(&options.channel),
            slice: SliceSelection::from_number(options.slice),
            overwrite: options.overwrite,
            logger,
        })
    }

    /// Resolve one string setting from CLI, config file, or default
    ///
    /// A value typed on the command line beats the configuration file;
    /// the clap default only applies when neither is present.
    fn resolve(args: &ArgMatches, id: &str, file_value: Option<String>) -> String {
        let cli_value = args.get_one::<String>(id).cloned();

        match args.value_source(id) {
            Some(ValueSource::CommandLine) => cli_value.unwrap_or_default(),
            _ => file_value.or(cli_value).unwrap_or_default(),
        }
    }

    /// Create the output directory, refusing to clobber silently
    fn prepare_output_dir(&self) -> CziResult<()> {
        if self.output_path.exists() {
            if !self.overwrite {
                return Err(CziError::GenericError(format!(
                    "Output directory {} already exists, pass --overwrite to reuse it",
                    self.output_path.display())));
            }
            info!("Reusing existing output directory {}", self.output_path.display());
        }

        fs::create_dir_all(&self.output_path)?;
        Ok(())
    }

    /// Extract and write one manifest row
    fn export_record(&self, extractor: &mut ChannelExtractor,
                     strategy: &dyn ExportStrategy,
                     record: &ChannelRecord) -> CziResult<Vec<PathBuf>> {
        let file_path = self.data_path.join(record.relative_path());
        info!("Reading... {}", file_path.display());

        let stack = extractor.extract_channel(
            file_path.to_string_lossy().as_ref(), record.channel_nr)?;

        let naming = OutputNaming::new(&self.output_path,
                                       &record.prefix(), &record.channel_name);
        strategy.export(&stack, self.slice, &naming)
    }

    /// Run the batch and return the tallies
    ///
    /// Per-record failures warn and skip; only setup failures (manifest,
    /// output directory) abort the run.
    pub fn run(&self) -> CziResult<ExportReport> {
        self.prepare_output_dir()?;

        let manifest = Manifest::load(&self.manifest_path)?;
        let selection = Selection::build(&manifest, &self.filter, &self.data_path);
        selection.log_summary(&manifest, &self.filter);

        let strategy = ExportStrategyFactory::create_strategy(self.format, self.logger);
        let mut extractor = ChannelExtractor::new(self.logger);
        let mut report = ExportReport::new();

        let progress = ProgressTracker::new(manifest.len() as u64, "Exporting channels");

        for record in manifest.records() {
            if self.filter.matches(&record.channel_name)
                && selection.contains(&record.prefix()) {
                progress.set_message(&format!("{} / {}", record.image, record.channel_name));

                match self.export_record(&mut extractor, strategy.as_ref(), record) {
                    Ok(written) => {
                        for path in &written {
                            self.logger.log(&format!("Wrote {}", path.display()))?;
                        }
                        report.record_export(&record.channel_name, &record.prefix());
                    }
                    Err(e) => {
                        warn!("Skipping {} channel {} ({}): {}",
                              record.image, record.channel_nr, record.channel_name, e);
                        report.record_skip();
                    }
                }
            }

            progress.increment(1);
        }

        progress.finish();
        report.log_summary();

        let prefix_manifest = report.write_prefix_manifest(&self.output_path)?;
        info!("Prefix manifest written to {}", prefix_manifest.display());

        Ok(report)
    }
}

impl<'a> Command for ExportCommand<'a> {
    fn execute(&self) -> CziResult<()> {
        info!("Executing export command for manifest {}", self.manifest_path);
        self.run().map(|_| ())
    }
}
