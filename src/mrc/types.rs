//! In-memory form of an MRC data block

use ndarray::{Array3, ArrayD, Axis, Ix3};

use crate::errors::{TomoError, TomoResult};

/// A loaded MRC data block with its voxel size
///
/// The array's slowest axis is Z (sections), then Y, then X, matching
/// the file's sample order. Rank is 3 for plain volumes and 4 for
/// volume stacks.
pub struct Volume {
    /// Sample data, widened to f32
    pub data: ArrayD<f32>,
    /// Isotropic voxel size in Angstroms per sample
    pub voxel_size: f32,
}

impl Volume {
    /// Number of array axes (3 for volumes, 4 for stacks)
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Array shape, slowest axis first
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Converts into a plain 3D array
    ///
    /// A 4D stack is accepted only when it holds exactly one member
    /// volume (leading dimension 1), in which case the singleton axis is
    /// collapsed. Anything else is a shape error.
    pub fn into_3d(self) -> TomoResult<Array3<f32>> {
        match self.data.ndim() {
            3 => self
                .data
                .into_dimensionality::<Ix3>()
                .map_err(|e| TomoError::ShapeError(e.to_string())),
            4 if self.data.shape()[0] == 1 => self
                .data
                .index_axis_move(Axis(0), 0)
                .into_dimensionality::<Ix3>()
                .map_err(|e| TomoError::ShapeError(e.to_string())),
            _ => Err(TomoError::ShapeError(format!(
                "expected a 3D volume, got shape {:?}",
                self.data.shape()
            ))),
        }
    }
}
