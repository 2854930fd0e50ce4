//! High-level library interface
//!
//! `Tomokit` owns the run orchestration for both operating modes. The
//! CLI commands are thin wrappers that parse arguments into the config
//! structs defined here, so library users get the exact same pipeline
//! without touching any process-wide state.

use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::coordinate::reader::read_coordinates;
use crate::errors::{TomoError, TomoResult};
use crate::extractor::projector::project_and_write;
use crate::extractor::records::{ParticleRecord, RecordAccumulator};
use crate::extractor::subvolume::SubvolumeExtractor;
use crate::mrc::reader::MrcReader;
use crate::star::constants::labels;
use crate::star::reader::StarReader;
use crate::star::writer::StarWriter;
use crate::utils::path_utils;
use crate::utils::progress::ProgressTracker;

/// Subdirectory receiving extracted subvolumes
pub const SUBVOLUME_DIR: &str = "3D_subvolumes";

/// Subdirectory receiving projection images
pub const PROJECTION_DIR: &str = "2D_projections";

/// Filename of the 3D metadata table
pub const SUBVOLUME_TABLE: &str = "extracted_subvolumes.star";

/// Filename of the 2D metadata table
pub const PROJECTION_TABLE: &str = "extracted_subvolumes_2D.star";

/// Configuration for extraction mode
pub struct ExtractionConfig {
    /// Text file listing tomogram base names, one per line
    pub tomogram_list: PathBuf,
    /// Directory holding `<name>.mrc` volumes
    pub volume_dir: PathBuf,
    /// Directory holding `<name>.coords` files
    pub coordinate_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
    /// Side length of each extracted cube, in voxels
    pub box_size: i64,
    /// Particle label joined into output filenames
    pub particle_id: String,
    /// Whether to also project every written subvolume
    pub project: bool,
    /// Central sections summed per projection
    pub slices: usize,
}

/// Configuration for projection-only mode
pub struct ProjectionConfig {
    /// STAR table naming already-extracted subvolumes
    pub star_path: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
    /// Central sections summed per projection
    pub slices: usize,
}

/// Counts reported after a completed run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Tomograms processed (extraction mode)
    pub tomograms: usize,
    /// Subvolume files written
    pub subvolumes_written: usize,
    /// Coordinates dropped as out of bounds
    pub coordinates_skipped: usize,
    /// Malformed coordinate lines skipped while reading
    pub malformed_lines: usize,
    /// Projection files written
    pub projections_written: usize,
}

/// Main interface to the tomokit library
pub struct Tomokit;

impl Tomokit {
    /// Create a new tomokit instance
    pub fn new() -> Self {
        Tomokit
    }

    /// Run extraction mode
    ///
    /// Walks the tomogram list, extracts every in-bounds coordinate,
    /// optionally projects each written subvolume, and persists the
    /// metadata tables once the whole batch has completed.
    ///
    /// # Arguments
    /// * `config` - Extraction parameters
    ///
    /// # Returns
    /// Counts of the run's outputs
    pub fn extract(&self, config: &ExtractionConfig) -> TomoResult<RunSummary> {
        if config.slices == 0 {
            return Err(TomoError::InvalidParameter(
                "slice count must be at least 1".to_string(),
            ));
        }
        let extractor = SubvolumeExtractor::new(config.box_size, &config.particle_id)?;

        let names = Self::read_tomogram_list(&config.tomogram_list)?;
        info!(
            "Extraction over {} tomogram(s), box size {}, id '{}'",
            names.len(),
            config.box_size,
            config.particle_id
        );

        let subvolume_dir = config.output_dir.join(SUBVOLUME_DIR);
        path_utils::ensure_dir(&subvolume_dir)?;
        let projection_dir = config.output_dir.join(PROJECTION_DIR);
        if config.project {
            path_utils::ensure_dir(&projection_dir)?;
        }

        let mut summary = RunSummary::default();
        let mut records_3d = RecordAccumulator::new();
        let mut records_2d = RecordAccumulator::new();
        let progress = ProgressTracker::new(names.len() as u64, "extracting");

        for name in &names {
            progress.set_message(name);

            let volume_path = config.volume_dir.join(format!("{}.mrc", name));
            let mut reader = MrcReader::new();
            let volume = reader.load(&volume_path)?;
            let voxel_size = volume.voxel_size;
            let volume = volume.into_3d()?;

            let coordinate_path = config.coordinate_dir.join(format!("{}.coords", name));
            let coordinates = read_coordinates(&coordinate_path)?;
            summary.malformed_lines += coordinates.skipped_lines;

            info!("Extracting and writing 3D subvolumes for {}", name);
            let batch = extractor.extract_tomogram(
                &volume,
                voxel_size,
                name,
                &coordinates.points,
                &subvolume_dir,
            )?;
            summary.subvolumes_written += batch.written.len();
            summary.coordinates_skipped += batch.skipped;

            for written in &batch.written {
                records_3d.push(ParticleRecord {
                    coordinate: written.coordinate,
                    image_path: format!("{}/{}", SUBVOLUME_DIR, written.filename),
                    tomo_name: name.clone(),
                });
            }

            if config.project {
                info!("Projecting subvolumes to 2D for {}", name);
                for written in &batch.written {
                    // Re-read from disk so the projection sees exactly
                    // the persisted samples, inversion and cast included
                    let mut reader = MrcReader::new();
                    let subvolume = reader.load(&subvolume_dir.join(&written.filename))?;
                    let voxel_size = subvolume.voxel_size;
                    let subvolume = subvolume.into_3d()?;

                    let filename = project_and_write(
                        &subvolume,
                        config.slices,
                        &projection_dir,
                        &written.filename,
                        voxel_size,
                    )?;
                    records_2d.push(ParticleRecord {
                        coordinate: written.coordinate,
                        image_path: format!("{}/{}", PROJECTION_DIR, filename),
                        tomo_name: name.clone(),
                    });
                    summary.projections_written += 1;
                }
            }

            summary.tomograms += 1;
            progress.increment();
        }
        progress.finish("done");

        info!("Writing STAR table for 3D subvolumes");
        StarWriter::write(
            &records_3d.into_table(),
            &config.output_dir.join(SUBVOLUME_TABLE),
        )?;

        if config.project && !records_2d.is_empty() {
            info!("Writing STAR table for 2D projections");
            StarWriter::write(
                &records_2d.into_table(),
                &config.output_dir.join(PROJECTION_TABLE),
            )?;
        }

        info!(
            "Extraction complete: {} tomogram(s), {} subvolume(s) written, {} coordinate(s) skipped, {} projection(s)",
            summary.tomograms,
            summary.subvolumes_written,
            summary.coordinates_skipped,
            summary.projections_written
        );
        Ok(summary)
    }

    /// Run projection-only mode
    ///
    /// Reads subvolume paths out of a STAR table, projects each file,
    /// and writes the 2D table. Extraction never happens here; the
    /// table is the only source of inputs.
    ///
    /// # Arguments
    /// * `config` - Projection parameters
    ///
    /// # Returns
    /// Counts of the run's outputs
    pub fn project_from_star(&self, config: &ProjectionConfig) -> TomoResult<RunSummary> {
        if config.slices == 0 {
            return Err(TomoError::InvalidParameter(
                "slice count must be at least 1".to_string(),
            ));
        }

        let mut star_reader = StarReader::new();
        let tables = star_reader.load(&config.star_path)?;
        let table = StarReader::select_particles(tables)?;

        if !table.has_column(labels::IMAGE_NAME) {
            return Err(TomoError::MissingColumn(labels::IMAGE_NAME.to_string()));
        }

        let base_dir = config
            .star_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let projection_dir = config.output_dir.join(PROJECTION_DIR);
        path_utils::ensure_dir(&projection_dir)?;

        info!(
            "Projecting {} subvolume(s) using {} central section(s)",
            table.len(),
            config.slices
        );

        let mut summary = RunSummary::default();
        let mut records_2d = RecordAccumulator::new();
        let progress = ProgressTracker::new(table.len() as u64, "projecting");

        for row in 0..table.len() {
            let recorded = table
                .get(row, labels::IMAGE_NAME)
                .unwrap_or("")
                .to_string();

            // Coordinates are optional in the input table
            let x = table.get_f64(row, labels::COORDINATE_X)?.unwrap_or(0.0);
            let y = table.get_f64(row, labels::COORDINATE_Y)?.unwrap_or(0.0);
            let z = table.get_f64(row, labels::COORDINATE_Z)?.unwrap_or(0.0);

            let tomo_name = table
                .get(row, labels::TOMO_NAME)
                .or_else(|| table.get(row, labels::MICROGRAPH_NAME))
                .unwrap_or("")
                .to_string();

            let resolved = path_utils::resolve_image_path(&base_dir, &recorded)
                .ok_or_else(|| TomoError::SubvolumeNotFound(recorded.clone()))?;

            let mut reader = MrcReader::new();
            let subvolume = reader.load(&resolved)?;
            let voxel_size = subvolume.voxel_size;
            let subvolume = subvolume.into_3d()?;

            let source_name = Path::new(&recorded)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or(recorded.clone());
            let filename = project_and_write(
                &subvolume,
                config.slices,
                &projection_dir,
                &source_name,
                voxel_size,
            )?;

            records_2d.push(ParticleRecord {
                coordinate: crate::coordinate::Point3::new(x, y, z),
                image_path: format!("{}/{}", PROJECTION_DIR, filename),
                tomo_name,
            });
            summary.projections_written += 1;
            progress.increment();
        }
        progress.finish("done");

        info!("Writing STAR table for 2D projections");
        StarWriter::write(
            &records_2d.into_table(),
            &config.output_dir.join(PROJECTION_TABLE),
        )?;

        info!(
            "Projection complete: {} image(s) written",
            summary.projections_written
        );
        Ok(summary)
    }

    /// Reads the tomogram list file
    ///
    /// One base name per line; blank lines are skipped and a stray
    /// volume extension is tolerated.
    fn read_tomogram_list(path: &Path) -> TomoResult<Vec<String>> {
        if !path.is_file() {
            return Err(TomoError::MissingInput(format!(
                "tomogram list {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        let names: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| path_utils::strip_volume_extension(line).to_string())
            .collect();
        if names.is_empty() {
            warn!("Tomogram list {} is empty", path.display());
        }
        Ok(names)
    }
}

impl Default for Tomokit {
    fn default() -> Self {
        Self::new()
    }
}
