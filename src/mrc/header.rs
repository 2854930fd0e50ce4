//! MRC2014 header parsing and construction
//!
//! The fixed header is 256 four-byte words (1024 bytes). Only the fields
//! this tool acts on are decoded; the rest are skipped on read and zeroed
//! on write.

use log::{debug, warn};
use std::io::{Cursor, Read, Seek, SeekFrom};

use crate::errors::{TomoError, TomoResult};
use crate::io::byte_order::ByteOrder;
use crate::io::seekable::SeekableReader;
use crate::mrc::mode::Mode;
use crate::mrc::{HEADER_SIZE, ISPG_VOLUME_STACK};

/// Byte offset of the "MAP " magic (word 53)
const MAGIC_OFFSET: usize = 208;

/// Byte offset of the MACHST machine stamp (word 54)
const MACHST_OFFSET: usize = 212;

/// Decoded MRC file header
///
/// Dimensions follow the file's sample order: `nx` varies fastest,
/// `nz` slowest, so a volume's logical shape is `(nz, ny, nx)`.
#[derive(Debug, Clone)]
pub struct MrcHeader {
    /// Number of columns (fastest-varying axis)
    pub nx: i32,
    /// Number of rows
    pub ny: i32,
    /// Number of sections (slowest-varying axis)
    pub nz: i32,
    /// Sample encoding
    pub mode: Mode,
    /// Grid size along X
    pub mx: i32,
    /// Grid size along Y
    pub my: i32,
    /// Grid size along Z
    pub mz: i32,
    /// Cell dimension along X in Angstroms
    pub xlen: f32,
    /// Cell dimension along Y in Angstroms
    pub ylen: f32,
    /// Cell dimension along Z in Angstroms
    pub zlen: f32,
    /// Minimum sample value
    pub dmin: f32,
    /// Maximum sample value
    pub dmax: f32,
    /// Mean sample value
    pub dmean: f32,
    /// Space group (0 = image, 1 = volume, 401 = volume stack)
    pub ispg: i32,
    /// Size of the extended header in bytes
    pub nsymbt: i32,
    /// RMS deviation of samples from the mean
    pub rms: f32,
    /// Byte order the file's data is stored in
    pub byte_order: ByteOrder,
}

impl MrcHeader {
    /// Reads and validates a header from the start of an MRC stream
    ///
    /// The full 1024-byte block is pulled into memory first so the
    /// machine stamp can be inspected before any multi-byte field is
    /// decoded. The reader is left positioned at the start of the
    /// extended header.
    pub fn read(reader: &mut dyn SeekableReader) -> TomoResult<Self> {
        reader.seek(SeekFrom::Start(0))?;
        let mut block = [0u8; HEADER_SIZE as usize];
        reader
            .read_exact(&mut block)
            .map_err(|e| TomoError::InvalidHeader(format!("header truncated: {}", e)))?;

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&block[MAGIC_OFFSET..MAGIC_OFFSET + 4]);
        if &magic != b"MAP " {
            // Pre-2014 files often lack the magic; tolerate but mention it
            warn!("MRC file lacks the 'MAP ' magic, assuming legacy header");
        }

        let mut machst = [0u8; 4];
        machst.copy_from_slice(&block[MACHST_OFFSET..MACHST_OFFSET + 4]);
        if !ByteOrder::is_standard_machst(&machst) {
            warn!(
                "Non-standard MACHST {:02X} {:02X} {:02X} {:02X}, assuming little-endian",
                machst[0], machst[1], machst[2], machst[3]
            );
        }
        let byte_order = ByteOrder::from_machst(&machst);
        debug!("MRC byte order: {}", byte_order.name());

        let handler = byte_order.create_handler();
        let mut cursor = Cursor::new(&block[..]);

        // Words 1-4: dimensions and sample mode
        let nx = handler.read_i32(&mut cursor)?;
        let ny = handler.read_i32(&mut cursor)?;
        let nz = handler.read_i32(&mut cursor)?;
        let mode_code = handler.read_i32(&mut cursor)?;

        if nx <= 0 || ny <= 0 || nz <= 0 {
            return Err(TomoError::InvalidHeader(format!(
                "non-positive dimensions {}x{}x{}",
                nx, ny, nz
            )));
        }
        let mode = Mode::from_code(mode_code)?;

        // Words 5-7 are the start offsets, unused here
        cursor.seek(SeekFrom::Start(4 * 7))?;

        // Words 8-13: sampling grid and cell dimensions
        let mx = handler.read_i32(&mut cursor)?;
        let my = handler.read_i32(&mut cursor)?;
        let mz = handler.read_i32(&mut cursor)?;
        let xlen = handler.read_f32(&mut cursor)?;
        let ylen = handler.read_f32(&mut cursor)?;
        let zlen = handler.read_f32(&mut cursor)?;

        // Words 20-24: sample statistics, space group, extended header size
        cursor.seek(SeekFrom::Start(4 * 19))?;
        let dmin = handler.read_f32(&mut cursor)?;
        let dmax = handler.read_f32(&mut cursor)?;
        let dmean = handler.read_f32(&mut cursor)?;
        let ispg = handler.read_i32(&mut cursor)?;
        let nsymbt = handler.read_i32(&mut cursor)?;
        if nsymbt < 0 {
            return Err(TomoError::InvalidHeader(format!(
                "negative extended header size {}",
                nsymbt
            )));
        }

        // Word 55: RMS deviation
        cursor.seek(SeekFrom::Start(4 * 54))?;
        let rms = handler.read_f32(&mut cursor)?;

        Ok(MrcHeader {
            nx,
            ny,
            nz,
            mode,
            mx,
            my,
            mz,
            xlen,
            ylen,
            zlen,
            dmin,
            dmax,
            dmean,
            ispg,
            nsymbt,
            rms,
            byte_order,
        })
    }

    /// Isotropic voxel size in Angstroms per sample
    ///
    /// Zero when the sampling grid is unset, which some converters leave
    /// behind; callers propagate the value as-is.
    pub fn voxel_size(&self) -> f32 {
        if self.mx > 0 {
            self.xlen / self.mx as f32
        } else {
            0.0
        }
    }

    /// Number of samples in the data block
    pub fn sample_count(&self) -> usize {
        self.nx as usize * self.ny as usize * self.nz as usize
    }

    /// Byte offset of the first data sample
    pub fn data_offset(&self) -> u64 {
        HEADER_SIZE + self.nsymbt as u64
    }

    /// Whether the file holds a stack of volumes rather than one volume
    ///
    /// MRC2014 marks stacks with space group 401; each member volume is
    /// `mz` sections deep and `nz` is the combined section count. A
    /// single-member stack still reads as rank 4 with a leading
    /// dimension of 1.
    pub fn is_volume_stack(&self) -> bool {
        self.ispg == ISPG_VOLUME_STACK && self.mz > 0 && self.nz % self.mz == 0
    }

    /// Logical array shape of the data block, slowest axis first
    pub fn data_shape(&self) -> Vec<usize> {
        if self.is_volume_stack() {
            vec![
                (self.nz / self.mz) as usize,
                self.mz as usize,
                self.ny as usize,
                self.nx as usize,
            ]
        } else {
            vec![self.nz as usize, self.ny as usize, self.nx as usize]
        }
    }
}
