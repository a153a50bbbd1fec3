//! CLI command implementations

pub mod analyze_command;
pub mod command_traits;
pub mod extract_command;

pub use analyze_command::AnalyzeCommand;
pub use command_traits::{Command, CommandFactory};
pub use extract_command::ExtractCommand;

use crate::tiff::errors::CogResult;
use crate::utils::logger::Logger;

/// Factory choosing the command requested on the command line
pub struct CogKitCommandFactory;

impl CogKitCommandFactory {
    pub fn new() -> Self {
        CogKitCommandFactory
    }
}

impl Default for CogKitCommandFactory {
    fn default() -> Self {
        CogKitCommandFactory::new()
    }
}

impl<'a> CommandFactory<'a> for CogKitCommandFactory {
    fn create_command(
        &self,
        args: &clap::ArgMatches,
        logger: &'a Logger,
    ) -> CogResult<Box<dyn Command + 'a>> {
        if args.get_flag("extract") || args.contains_id("output") {
            Ok(Box::new(ExtractCommand::new(args, logger)?))
        } else {
            Ok(Box::new(AnalyzeCommand::new(args, logger)?))
        }
    }
}
