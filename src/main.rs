use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::process;

// Import from your library
use czikit::commands::{CommandFactory, CziKitCommandFactory};
use czikit::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("CziKit")
        .version("0.1")
        .about("Export named channel images from Zeiss CZI microscopy files")
        .arg(
            Arg::new("input")
                .help("Manifest CSV file (or a .czi file with --analyze)")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("analyze")
                .short('a')
                .long("analyze")
                .help("Analyze a single CZI file instead of exporting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data")
                .short('d')
                .long("data")
                .help("Root directory the manifest folders are relative to")
                .value_name("DIR")
                .default_value(".")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Directory the exported images are written into")
                .value_name("DIR")
                .default_value("channels")
                .required(false),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format (tif or png)")
                .value_name("FORMAT")
                .default_value("tif")
                .required(false),
        )
        .arg(
            Arg::new("channel")
                .long("channel")
                .help("Export only channels with this name (exact or regex), or ALL")
                .value_name("NAME")
                .default_value("ALL")
                .required(false),
        )
        .arg(
            Arg::new("slice")
                .long("slice")
                .help("1-based Z slice to export from 3D images, 0 for the whole stack")
                .value_name("N")
                .default_value("1")
                .required(false),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .help("Reuse the output directory if it already exists")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration file providing defaults for the options above")
                .value_name("FILE")
                .required(false),
        )
        .get_matches();

    let log_file = "czikit.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    let verbose = matches.get_flag("verbose");
    if let Err(e) = Logger::init_global_logger("czikit-global.log", verbose) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = CziKitCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
