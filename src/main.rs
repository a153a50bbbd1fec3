use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::process;

use cogkit::commands::{CogKitCommandFactory, CommandFactory};
use cogkit::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("CogKit")
        .version("0.1")
        .about("Decode Cloud-Optimized GeoTIFF files")
        .arg(
            Arg::new("input")
                .help("Input COG file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("extract")
                .short('e')
                .long("extract")
                .help("Extract pixel data instead of analyzing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output image file for extraction")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("level")
                .short('l')
                .long("level")
                .help("Resolution level to decode (0 = full resolution)")
                .value_name("N")
                .required(false),
        )
        .arg(
            Arg::new("region")
                .long("region")
                .help("Pixel region to extract (x,y,width,height)")
                .value_name("REGION")
                .required(false),
        )
        .arg(
            Arg::new("wkt")
                .long("wkt")
                .help("Print only the CRS as Well-Known Text")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let logger = match Logger::new("cogkit.log") {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("cogkit-global.log") {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = CogKitCommandFactory::new();

    match factory.create_command(&matches, &logger) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
