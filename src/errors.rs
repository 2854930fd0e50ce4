//! Custom error types for tomogram processing
//!
//! One error enum serves the whole crate since both format modules
//! (`mrc` and `star`) and the extraction pipeline report through the
//! same fail-fast channel.

use std::fmt;
use std::io;

/// Errors raised while extracting or projecting subvolumes
#[derive(Debug)]
pub enum TomoError {
    /// I/O error
    IoError(io::Error),
    /// A required input file or directory is absent
    MissingInput(String),
    /// A parameter value is outside its accepted range
    InvalidParameter(String),
    /// Array rank or shape does not match what the operation expects
    ShapeError(String),
    /// A subvolume path from a STAR table resolved to no existing file
    SubvolumeNotFound(String),
    /// A STAR table lacks a required column
    MissingColumn(String),
    /// MRC header failed validation
    InvalidHeader(String),
    /// MRC sample mode this tool does not read
    UnsupportedMode(i32),
    /// A text record (STAR row, coordinate line) could not be parsed
    ParseError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for TomoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TomoError::IoError(e) => write!(f, "I/O error: {}", e),
            TomoError::MissingInput(what) => write!(f, "Missing input: {}", what),
            TomoError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            TomoError::ShapeError(msg) => write!(f, "Shape mismatch: {}", msg),
            TomoError::SubvolumeNotFound(path) => write!(f, "Subvolume file not found: {}", path),
            TomoError::MissingColumn(label) => write!(f, "STAR table is missing column: {}", label),
            TomoError::InvalidHeader(msg) => write!(f, "Invalid MRC header: {}", msg),
            TomoError::UnsupportedMode(mode) => write!(f, "Unsupported MRC sample mode: {}", mode),
            TomoError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            TomoError::GenericError(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for TomoError {}

impl From<io::Error> for TomoError {
    fn from(error: io::Error) -> Self {
        TomoError::IoError(error)
    }
}

impl From<String> for TomoError {
    fn from(msg: String) -> Self {
        TomoError::GenericError(msg)
    }
}

/// Result type for tomogram operations
pub type TomoResult<T> = Result<T, TomoError>;
