//! Constants for the STAR format

/// Column labels understood by this tool
pub mod labels {
    /// X coordinate of a particle, in voxels
    pub const COORDINATE_X: &str = "rlnCoordinateX";
    /// Y coordinate of a particle, in voxels
    pub const COORDINATE_Y: &str = "rlnCoordinateY";
    /// Z coordinate of a particle, in voxels
    pub const COORDINATE_Z: &str = "rlnCoordinateZ";
    /// Path of the particle image, relative to the table's directory
    pub const IMAGE_NAME: &str = "rlnImageName";
    /// Name of the source tomogram
    pub const TOMO_NAME: &str = "rlnTomoName";
    /// Name of the source micrograph
    pub const MICROGRAPH_NAME: &str = "rlnMicrographName";
}

/// Data block names checked when picking the particles table
pub mod blocks {
    /// Conventional name of the particles block
    pub const PARTICLES: &str = "particles";
}
