//! MRC sample mode handling
//!
//! Word 4 of the MRC header declares how each voxel sample is encoded.
//! Only the modes that show up in tomography pipelines are supported;
//! everything is widened to f32 once in memory.

use std::io::Result;

use crate::errors::{TomoError, TomoResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;

/// Sample encoding of an MRC file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Mode 0: 8-bit signed integer
    Int8,
    /// Mode 1: 16-bit signed integer
    Int16,
    /// Mode 2: 32-bit IEEE float
    Float32,
    /// Mode 6: 16-bit unsigned integer
    Uint16,
}

impl Mode {
    /// Resolves a header mode code to a supported sample mode
    pub fn from_code(code: i32) -> TomoResult<Self> {
        match code {
            0 => Ok(Mode::Int8),
            1 => Ok(Mode::Int16),
            2 => Ok(Mode::Float32),
            6 => Ok(Mode::Uint16),
            _ => Err(TomoError::UnsupportedMode(code)),
        }
    }

    /// Returns the header code for this mode
    pub fn code(&self) -> i32 {
        match self {
            Mode::Int8 => 0,
            Mode::Int16 => 1,
            Mode::Float32 => 2,
            Mode::Uint16 => 6,
        }
    }

    /// Returns the size of one sample in bytes
    pub fn bytes_per_sample(&self) -> u64 {
        match self {
            Mode::Int8 => 1,
            Mode::Int16 | Mode::Uint16 => 2,
            Mode::Float32 => 4,
        }
    }

    /// Returns a string representation of this mode
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Int8 => "int8",
            Mode::Int16 => "int16",
            Mode::Float32 => "float32",
            Mode::Uint16 => "uint16",
        }
    }

    /// Reads one sample through the byte order handler, widened to f32
    pub fn read_sample(
        &self,
        reader: &mut dyn SeekableReader,
        handler: &dyn ByteOrderHandler,
    ) -> Result<f32> {
        match self {
            Mode::Int8 => {
                let mut buf = [0u8; 1];
                reader.read_exact(&mut buf)?;
                Ok(buf[0] as i8 as f32)
            }
            Mode::Int16 => handler.read_i16(reader).map(|v| v as f32),
            Mode::Float32 => handler.read_f32(reader),
            Mode::Uint16 => handler.read_u16(reader).map(|v| v as f32),
        }
    }
}
