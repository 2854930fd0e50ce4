//! 2D projection of subvolumes
//!
//! A projection sums a configurable number of central sections along
//! the depth axis. The slice window keeps its full width even at the
//! volume boundary; only its center shifts.

use log::debug;
use ndarray::{s, Array2, Array3, Axis};
use std::path::Path;

use crate::errors::{TomoError, TomoResult};
use crate::mrc::writer::MrcWriter;

/// Filename prefix marking projection images
pub const PROJECTION_PREFIX: &str = "2D_";

/// Projects a 3D subvolume to a 2D image along the depth axis
///
/// The window covers `min(n, depth)` sections centered on `depth / 2`.
/// When the centered window would run past either edge it is shifted,
/// not shrunk: `start` is first clamped to 0, `end` to `depth`, and
/// `start` is then pulled back so the window spans exactly the
/// effective count again.
///
/// # Arguments
/// * `subvolume` - Source cube, axes (z, y, x)
/// * `n` - Requested number of central sections, at least 1
///
/// # Returns
/// The summed image with the subvolume's lateral shape
pub fn project_central_slices(subvolume: &Array3<f32>, n: usize) -> TomoResult<Array2<f32>> {
    if n == 0 {
        return Err(TomoError::InvalidParameter(
            "slice count must be at least 1".to_string(),
        ));
    }

    let depth = subvolume.dim().0 as i64;
    let n_eff = (n as i64).min(depth);
    let mid = depth / 2;
    let mut start = (mid - n_eff / 2).max(0);
    let end = (start + n_eff).min(depth);
    start = (end - n_eff).max(0);

    debug!(
        "Projecting sections [{}, {}) of depth {}",
        start, end, depth
    );

    let window = subvolume.slice(s![start as usize..end as usize, .., ..]);
    Ok(window.sum_axis(Axis(0)))
}

/// Projects a subvolume and writes the image next to its metadata
///
/// The image lands in `output_dir` under the source filename prefixed
/// with `2D_`, carrying the given voxel size.
///
/// # Returns
/// The projection's filename, without directory
pub fn project_and_write(
    subvolume: &Array3<f32>,
    n: usize,
    output_dir: &Path,
    source_filename: &str,
    voxel_size: f32,
) -> TomoResult<String> {
    let image = project_central_slices(subvolume, n)?;
    let filename = format!("{}{}", PROJECTION_PREFIX, source_filename);
    MrcWriter::write_image(&output_dir.join(&filename), &image, voxel_size)?;
    Ok(filename)
}
