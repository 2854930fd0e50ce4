//! CLI command implementations
//!
//! This module contains implementations of the two operating modes
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod extract_command;
pub mod project_command;

pub use command_traits::{Command, CommandFactory};
pub use extract_command::ExtractCommand;
pub use project_command::ProjectCommand;

use clap::ArgMatches;
use crate::errors::TomoResult;

/// Factory for creating command instances based on CLI arguments
///
/// The two modes are mutually exclusive: supplying a STAR table selects
/// projection-only mode, otherwise the extraction pipeline runs.
pub struct TomokitCommandFactory;

impl TomokitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        TomokitCommandFactory
    }
}

impl Default for TomokitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for TomokitCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> TomoResult<Box<dyn Command>> {
        if args.contains_id("star") {
            // A metadata table means the subvolumes already exist
            Ok(Box::new(ProjectCommand::new(args)?))
        } else {
            Ok(Box::new(ExtractCommand::new(args)?))
        }
    }
}
