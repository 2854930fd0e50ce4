//! Subvolume extraction command
//!
//! This module implements the command for the extraction operating
//! mode: resolving tomogram/coordinate pairs, carving subvolumes, and
//! optionally projecting each one to 2D.

use clap::ArgMatches;
use log::info;
use std::path::PathBuf;

use crate::api::{ExtractionConfig, Tomokit};
use crate::commands::command_traits::Command;
use crate::errors::{TomoError, TomoResult};

/// Command for extracting subvolumes from tomograms
pub struct ExtractCommand {
    /// Parsed extraction parameters
    config: ExtractionConfig,
}

impl ExtractCommand {
    /// Create a new extract command
    ///
    /// All extraction-mode arguments are required here even though clap
    /// marks them optional: which mode runs is only known once the
    /// argument set is inspected.
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new ExtractCommand instance or an error
    pub fn new(args: &ArgMatches) -> TomoResult<Self> {
        info!("Creating extract command from arguments");

        let tomogram_list = Self::require_path(args, "tomograms")?;
        info!("Tomogram list: {}", tomogram_list.display());

        let volume_dir = Self::require_path(args, "vol-dir")?;
        info!("Volume directory: {}", volume_dir.display());

        let coordinate_dir = Self::require_path(args, "coord-dir")?;
        info!("Coordinate directory: {}", coordinate_dir.display());

        let output_dir = Self::require_path(args, "out")?;
        info!("Output directory: {}", output_dir.display());

        let box_size = args
            .get_one::<String>("boxsize")
            .ok_or_else(|| {
                TomoError::MissingInput("--boxsize is required in extraction mode".to_string())
            })?
            .parse::<i64>()
            .map_err(|_| {
                TomoError::InvalidParameter("--boxsize must be an integer".to_string())
            })?;
        info!("Box size: {}", box_size);

        let particle_id = args
            .get_one::<String>("id")
            .ok_or_else(|| {
                TomoError::MissingInput("--id is required in extraction mode".to_string())
            })?
            .clone();
        info!("Particle id: {}", particle_id);

        let project = args.get_flag("project2d");
        info!("Projection enabled: {}", project);

        let slices = parse_slices(args)?;
        info!("Projection slices: {}", slices);

        Ok(ExtractCommand {
            config: ExtractionConfig {
                tomogram_list,
                volume_dir,
                coordinate_dir,
                output_dir,
                box_size,
                particle_id,
                project,
                slices,
            },
        })
    }

    fn require_path(args: &ArgMatches, name: &str) -> TomoResult<PathBuf> {
        args.get_one::<String>(name)
            .map(PathBuf::from)
            .ok_or_else(|| {
                TomoError::MissingInput(format!("--{} is required in extraction mode", name))
            })
    }
}

impl Command for ExtractCommand {
    fn execute(&self) -> TomoResult<()> {
        let summary = Tomokit::new().extract(&self.config)?;
        info!(
            "Wrote {} subvolume(s) and {} projection(s) from {} tomogram(s)",
            summary.subvolumes_written, summary.projections_written, summary.tomograms
        );
        Ok(())
    }
}

/// Parses the shared `--slices` argument (default 1)
pub(crate) fn parse_slices(args: &ArgMatches) -> TomoResult<usize> {
    let raw = args
        .get_one::<String>("slices")
        .map(String::as_str)
        .unwrap_or("1");
    let slices = raw
        .parse::<usize>()
        .map_err(|_| TomoError::InvalidParameter(format!("--slices must be a positive integer, got '{}'", raw)))?;
    if slices == 0 {
        return Err(TomoError::InvalidParameter(
            "--slices must be at least 1".to_string(),
        ));
    }
    Ok(slices)
}
