//! Command pattern interfaces
//!
//! This module defines the core Command pattern interfaces for the CLI
//! application, keeping argument parsing separate from execution.

use crate::tiff::errors::CogResult;
use crate::utils::logger::Logger;

/// Represents an executable command in the application
pub trait Command {
    /// Execute the command
    fn execute(&self) -> CogResult<()>;
}

/// Factory for creating commands from CLI arguments
pub trait CommandFactory<'a> {
    /// Create a new Command instance based on CLI arguments
    fn create_command(
        &self,
        args: &clap::ArgMatches,
        logger: &'a Logger,
    ) -> CogResult<Box<dyn Command + 'a>>;
}
