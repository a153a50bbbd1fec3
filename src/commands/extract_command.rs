//! Pixel extraction command
//!
//! Decodes a resolution level (or a sub-rectangle of one) and writes it
//! to an image file.

use clap::ArgMatches;
use log::info;

use crate::api::CogKit;
use crate::commands::command_traits::Command;
use crate::extractor::Region;
use crate::tiff::errors::{CogError, CogResult};
use crate::utils::logger::Logger;

/// Command for extracting pixels from a COG file
pub struct ExtractCommand<'a> {
    input_file: String,
    output_file: String,
    level: usize,
    region: Option<Region>,
    logger: &'a Logger,
}

/// Parses a "x,y,width,height" region argument
fn parse_region(spec: &str) -> CogResult<Region> {
    let parts: Vec<u32> = spec
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|e| CogError::Format(format!("region '{}': {}", spec, e)))?;

    if parts.len() != 4 {
        return Err(CogError::Format(format!(
            "region '{}': expected x,y,width,height",
            spec
        )));
    }
    Ok(Region::new(parts[0], parts[1], parts[2], parts[3]))
}

impl<'a> ExtractCommand<'a> {
    /// Create a new extract command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CogResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| CogError::Format("missing input file".to_string()))?
            .clone();
        let output_file = args
            .get_one::<String>("output")
            .ok_or_else(|| CogError::Format("extraction requires --output".to_string()))?
            .clone();

        let level = match args.get_one::<String>("level") {
            Some(s) => s
                .parse::<usize>()
                .map_err(|e| CogError::Format(format!("level '{}': {}", s, e)))?,
            None => 0,
        };

        let region = match args.get_one::<String>("region") {
            Some(spec) => Some(parse_region(spec)?),
            None => None,
        };

        Ok(ExtractCommand {
            input_file,
            output_file,
            level,
            region,
            logger,
        })
    }
}

impl<'a> Command for ExtractCommand<'a> {
    fn execute(&self) -> CogResult<()> {
        info!(
            "extracting level {} of {} to {}",
            self.level, self.input_file, self.output_file
        );

        let kit = CogKit::new(None)?;
        kit.extract_to_file(&self.input_file, &self.output_file, self.level, self.region)?;
        self.logger
            .log(&format!("extracted {} -> {}", self.input_file, self.output_file))?;
        Ok(())
    }
}
