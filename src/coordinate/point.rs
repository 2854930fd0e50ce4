//! Point structure for subvolume centers

/// A 3D point in voxel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    /// X coordinate (fastest-varying volume axis)
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate (section axis)
    pub z: f64,
}

impl Point3 {
    /// Create a new point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }
}
