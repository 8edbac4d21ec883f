//! CLI command implementations
//!
//! This module contains implementations of the commands supported by the
//! CLI application using the Command pattern.

pub mod command_traits;
pub mod export_command;
pub mod analyze_command;

pub use command_traits::{Command, CommandFactory};
pub use export_command::{ExportCommand, ExportOptions};
pub use analyze_command::AnalyzeCommand;

use clap::ArgMatches;

use crate::czi::errors::CziResult;
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct CziKitCommandFactory;

impl CziKitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        CziKitCommandFactory
    }
}

impl Default for CziKitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for CziKitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> CziResult<Box<dyn Command + 'a>> {
        // Determine which command to run based on args
        if args.get_flag("analyze") {
            Ok(Box::new(AnalyzeCommand::new(args, logger)?))
        } else {
            // Default to the batch export command
            Ok(Box::new(ExportCommand::new(args, logger)?))
        }
    }
}
