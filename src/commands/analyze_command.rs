//! COG structure analysis command
//!
//! Prints the overview pyramid, the geospatial parameters and the CRS of
//! a COG file.

use clap::ArgMatches;
use log::{debug, info};

use crate::api::CogKit;
use crate::commands::command_traits::Command;
use crate::tiff::errors::{CogError, CogResult};
use crate::utils::logger::Logger;

/// Command for analyzing COG file structure
pub struct AnalyzeCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Whether to also print the CRS as WKT on its own line
    wkt_only: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> AnalyzeCommand<'a> {
    /// Create a new analyze command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CogResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| CogError::Format("missing input file".to_string()))?
            .clone();

        Ok(AnalyzeCommand {
            input_file,
            wkt_only: args.get_flag("wkt"),
            logger,
        })
    }
}

impl<'a> Command for AnalyzeCommand<'a> {
    fn execute(&self) -> CogResult<()> {
        debug!("analyzing {}", self.input_file);
        let kit = CogKit::new(None)?;

        if self.wkt_only {
            let wkt = kit.describe_crs(&self.input_file)?;
            println!("{}", wkt);
            return Ok(());
        }

        let summary = kit.analyze(&self.input_file)?;
        println!("{}", summary);
        info!("analysis of {} complete", self.input_file);
        self.logger
            .log(&format!("analyzed {}", self.input_file))?;
        Ok(())
    }
}
