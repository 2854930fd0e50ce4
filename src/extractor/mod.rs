//! Subvolume extraction and projection
//!
//! The pipeline core: carving fixed-size cubic windows out of tomogram
//! volumes, projecting subvolumes down to 2D images, and accumulating
//! the metadata records that tie outputs back to their coordinates.

pub mod projector;
pub mod records;
pub mod subvolume;
pub mod window;

#[cfg(test)]
mod tests;

pub use projector::project_central_slices;
pub use records::{ParticleRecord, RecordAccumulator};
pub use subvolume::{ExtractOutcome, SkipReason, SubvolumeExtractor, TomogramBatch};
pub use window::Window;
