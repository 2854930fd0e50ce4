//! Seekable reader trait
//!
//! Volume files are read in two passes (header, then sample data), so
//! every reader handed to the MRC layer must support seeking as well as
//! reading.

use std::io::{Read, Seek};

/// Trait for readers that can both read and seek
///
/// Combines the Read and Seek traits for use with files and in-memory
/// cursors throughout the crate.
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
