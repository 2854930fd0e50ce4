//! Subvolume extraction
//!
//! For every coordinate of a tomogram, carves the centered cubic window,
//! inverts contrast, and writes the result as an individual MRC file
//! carrying the tomogram's voxel size. Windows that touch or cross a
//! volume edge are dropped, never padded: downstream averaging needs
//! uniform geometry, so a partial cube would be worse than none.

use log::{debug, info};
use ndarray::{s, Array3};
use std::path::Path;

use crate::coordinate::point::Point3;
use crate::errors::{TomoError, TomoResult};
use crate::extractor::window::Window;
use crate::mrc::writer::MrcWriter;

/// Why a coordinate produced no subvolume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The window ran past a volume edge on at least one axis
    OutOfBounds,
}

/// Per-coordinate extraction outcome
///
/// Every coordinate is classified explicitly instead of filtering on
/// the sliced shape, so callers can tell a dropped coordinate from an
/// accepted one.
pub enum ExtractOutcome {
    /// The full window fit; holds the contrast-inverted cube
    Accepted(Array3<f32>),
    /// The coordinate was dropped
    Skipped(SkipReason),
}

/// One written subvolume and the coordinate that produced it
pub struct WrittenSubvolume {
    /// Output filename, without directory
    pub filename: String,
    /// Source coordinate in voxel units
    pub coordinate: Point3,
}

/// Result of extracting one tomogram's coordinate list
pub struct TomogramBatch {
    /// Subvolumes written, in acceptance order
    pub written: Vec<WrittenSubvolume>,
    /// Coordinates dropped as out of bounds
    pub skipped: usize,
}

/// Extracts cubic subvolumes from tomogram volumes
pub struct SubvolumeExtractor {
    /// Window side length in voxels
    box_size: i64,
    /// Label used in output filenames
    particle_id: String,
}

impl SubvolumeExtractor {
    /// Create a new extractor
    ///
    /// # Arguments
    /// * `box_size` - Side length of the extraction cube; must be a
    ///   positive even number since the window extends `box_size / 2`
    ///   on either side of the integer center
    /// * `particle_id` - Label joined into every output filename
    pub fn new(box_size: i64, particle_id: &str) -> TomoResult<Self> {
        if box_size <= 0 {
            return Err(TomoError::InvalidParameter(format!(
                "box size must be positive, got {}",
                box_size
            )));
        }
        if box_size % 2 != 0 {
            return Err(TomoError::InvalidParameter(format!(
                "box size must be even, got {}",
                box_size
            )));
        }
        Ok(SubvolumeExtractor {
            box_size,
            particle_id: particle_id.to_string(),
        })
    }

    /// Classifies one coordinate against a volume
    ///
    /// Accepted cubes come back contrast-inverted (multiplied by -1) and
    /// owned, ready to persist.
    pub fn classify(&self, volume: &Array3<f32>, center: &Point3) -> ExtractOutcome {
        let (nz, ny, nx) = volume.dim();
        let window = Window::centered(center.x, center.y, center.z, self.box_size);

        if !window.fits_within(nz, ny, nx) {
            return ExtractOutcome::Skipped(SkipReason::OutOfBounds);
        }

        let cube = volume.slice(s![
            window.z as usize..window.end_z() as usize,
            window.y as usize..window.end_y() as usize,
            window.x as usize..window.end_x() as usize
        ]);
        ExtractOutcome::Accepted(cube.mapv(|v| -v))
    }

    /// Extracts and writes every coordinate of one tomogram
    ///
    /// Filenames are `<tomogram>_<id>_<NNNN>.mrc` where the 4-digit
    /// counter starts at 1 for each tomogram and advances only when a
    /// subvolume is accepted, so skipped coordinates leave no gap in
    /// the numbering.
    ///
    /// # Arguments
    /// * `volume` - The full tomogram, axes (z, y, x)
    /// * `voxel_size` - Propagated unchanged to every written file
    /// * `tomo_name` - Base name of the source tomogram
    /// * `coords` - Centers to extract, in voxel units
    /// * `output_dir` - Directory receiving the subvolume files
    pub fn extract_tomogram(
        &self,
        volume: &Array3<f32>,
        voxel_size: f32,
        tomo_name: &str,
        coords: &[Point3],
        output_dir: &Path,
    ) -> TomoResult<TomogramBatch> {
        let mut written = Vec::new();
        let mut skipped = 0usize;
        let mut counter = 1u32;

        for center in coords {
            match self.classify(volume, center) {
                ExtractOutcome::Accepted(cube) => {
                    let filename = format!(
                        "{}_{}_{:04}.mrc",
                        tomo_name, self.particle_id, counter
                    );
                    MrcWriter::write_volume(&output_dir.join(&filename), &cube, voxel_size)?;
                    written.push(WrittenSubvolume {
                        filename,
                        coordinate: *center,
                    });
                    counter += 1;
                }
                ExtractOutcome::Skipped(reason) => {
                    debug!(
                        "Skipping coordinate ({}, {}, {}) of {}: {:?}",
                        center.x, center.y, center.z, tomo_name, reason
                    );
                    skipped += 1;
                }
            }
        }

        info!(
            "{}: wrote {} subvolume(s), skipped {} out-of-bounds coordinate(s)",
            tomo_name,
            written.len(),
            skipped
        );

        Ok(TomogramBatch { written, skipped })
    }

    /// Window side length in voxels
    pub fn box_size(&self) -> i64 {
        self.box_size
    }
}
