//! Window structure for defining the extraction cube
//!
//! A window is the axis-aligned integer cube carved around a particle
//! center. Coordinates follow the volume's array order: (z, y, x) with
//! the origin at the first sample. Bounds are half-open, `[lo, hi)`
//! per axis.

/// Cubic region for subvolume extraction (in voxel indices)
///
/// Low bounds may be negative and high bounds may exceed the volume;
/// such windows exist so that they can be classified as out of bounds
/// rather than silently clipped.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    /// Low Z bound (inclusive)
    pub z: i64,
    /// Low Y bound (inclusive)
    pub y: i64,
    /// Low X bound (inclusive)
    pub x: i64,
    /// Side length in voxels
    pub size: i64,
}

impl Window {
    /// Builds the window centered on a coordinate
    ///
    /// The center is truncated to an integer voxel index and the box
    /// extends `size / 2` voxels below and above it on every axis, so
    /// an even size yields exactly `size` samples per axis.
    pub fn centered(x: f64, y: f64, z: f64, size: i64) -> Self {
        let half = size / 2;
        Window {
            z: z as i64 - half,
            y: y as i64 - half,
            x: x as i64 - half,
            size,
        }
    }

    /// Exclusive high Z bound
    pub fn end_z(&self) -> i64 {
        self.z + self.size
    }

    /// Exclusive high Y bound
    pub fn end_y(&self) -> i64 {
        self.y + self.size
    }

    /// Exclusive high X bound
    pub fn end_x(&self) -> i64 {
        self.x + self.size
    }

    /// Whether the window lies fully inside a volume of the given shape
    ///
    /// # Arguments
    /// * `nz`, `ny`, `nx` - Volume extents, slowest axis first
    pub fn fits_within(&self, nz: usize, ny: usize, nx: usize) -> bool {
        self.z >= 0
            && self.y >= 0
            && self.x >= 0
            && self.end_z() <= nz as i64
            && self.end_y() <= ny as i64
            && self.end_x() <= nx as i64
    }
}
