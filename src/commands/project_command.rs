//! Projection-only command
//!
//! This module implements the command for the projection-only operating
//! mode: reading already-extracted subvolumes out of a STAR table and
//! projecting each one to 2D. Projection is implied by the mode, so no
//! separate flag is consulted.

use clap::ArgMatches;
use log::info;
use std::path::PathBuf;

use crate::api::{ProjectionConfig, Tomokit};
use crate::commands::command_traits::Command;
use crate::commands::extract_command::parse_slices;
use crate::errors::{TomoError, TomoResult};

/// Command for projecting subvolumes referenced by a STAR table
pub struct ProjectCommand {
    /// Parsed projection parameters
    config: ProjectionConfig,
}

impl ProjectCommand {
    /// Create a new project command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new ProjectCommand instance or an error
    pub fn new(args: &ArgMatches) -> TomoResult<Self> {
        info!("Creating project command from arguments");

        let star_path = args
            .get_one::<String>("star")
            .map(PathBuf::from)
            .ok_or_else(|| TomoError::MissingInput("--star is required".to_string()))?;
        info!("Input STAR table: {}", star_path.display());

        let output_dir = args
            .get_one::<String>("out")
            .map(PathBuf::from)
            .ok_or_else(|| TomoError::MissingInput("--out is required".to_string()))?;
        info!("Output directory: {}", output_dir.display());

        let slices = parse_slices(args)?;
        info!("Projection slices: {}", slices);

        Ok(ProjectCommand {
            config: ProjectionConfig {
                star_path,
                output_dir,
                slices,
            },
        })
    }
}

impl Command for ProjectCommand {
    fn execute(&self) -> TomoResult<()> {
        let summary = Tomokit::new().project_from_star(&self.config)?;
        info!("Wrote {} projection(s)", summary.projections_written);
        Ok(())
    }
}
