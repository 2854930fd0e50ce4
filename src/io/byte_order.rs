//! Byte order handling for MRC files
//!
//! This module implements the Strategy pattern for handling different
//! byte orders when reading MRC data. MRC files advertise their byte
//! order through the MACHST machine stamp in the header; files written
//! by this crate are always little-endian.

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::Result;

use crate::io::seekable::SeekableReader;

/// Machine stamp bytes identifying a little-endian MRC file
pub const MACHST_LITTLE_ENDIAN: [u8; 4] = [0x44, 0x44, 0x00, 0x00];

/// Machine stamp bytes identifying a big-endian MRC file
pub const MACHST_BIG_ENDIAN: [u8; 4] = [0x11, 0x11, 0x00, 0x00];

/// Represents the byte order of an MRC file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order (MACHST 0x44 0x44)
    LittleEndian,
    /// Big-endian byte order (MACHST 0x11 0x11)
    BigEndian,
}

impl ByteOrder {
    /// Detects the byte order from the MACHST machine stamp
    ///
    /// Only the first two stamp bytes carry the byte order; the trailing
    /// pair is padding. Unknown stamps fall back to little-endian, which
    /// is what nearly every producer writes in practice.
    pub fn from_machst(machst: &[u8; 4]) -> Self {
        if machst[0] == 0x11 && machst[1] == 0x11 {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }

    /// Returns true when the stamp matches one of the two defined values
    pub fn is_standard_machst(machst: &[u8; 4]) -> bool {
        (machst[0] == 0x44 && machst[1] == 0x44) || (machst[0] == 0x11 && machst[1] == 0x11)
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian",
            ByteOrder::BigEndian => "Big Endian",
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }
}

/// Trait for byte order handling strategies
pub trait ByteOrderHandler: Send + Sync {
    /// Read an i16 value
    fn read_i16(&self, reader: &mut dyn SeekableReader) -> Result<i16>;

    /// Read a u16 value
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16>;

    /// Read an i32 value
    fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32>;

    /// Read a u32 value
    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32>;

    /// Read an f32 value
    fn read_f32(&self, reader: &mut dyn SeekableReader) -> Result<f32>;
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn read_i16(&self, reader: &mut dyn SeekableReader) -> Result<i16> {
        reader.read_i16::<LittleEndian>()
    }

    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        reader.read_u16::<LittleEndian>()
    }

    fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32> {
        reader.read_i32::<LittleEndian>()
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        reader.read_u32::<LittleEndian>()
    }

    fn read_f32(&self, reader: &mut dyn SeekableReader) -> Result<f32> {
        reader.read_f32::<LittleEndian>()
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn read_i16(&self, reader: &mut dyn SeekableReader) -> Result<i16> {
        reader.read_i16::<BigEndian>()
    }

    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        reader.read_u16::<BigEndian>()
    }

    fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32> {
        reader.read_i32::<BigEndian>()
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        reader.read_u32::<BigEndian>()
    }

    fn read_f32(&self, reader: &mut dyn SeekableReader) -> Result<f32> {
        reader.read_f32::<BigEndian>()
    }
}
