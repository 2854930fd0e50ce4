//! MRC file writing
//!
//! Output files are always little-endian mode 2 (f32) with a freshly
//! computed statistics block, so downstream tools see sane density
//! ranges without a separate header-fix pass.

use byteorder::{WriteBytesExt, LE};
use log::debug;
use ndarray::{Array2, Array3};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::TomoResult;
use crate::io::byte_order::MACHST_LITTLE_ENDIAN;
use crate::mrc::mode::Mode;

/// Sample statistics stored in the header
struct SampleStats {
    dmin: f32,
    dmax: f32,
    dmean: f32,
    rms: f32,
}

/// Handles writing MRC files to disk
pub struct MrcWriter;

impl MrcWriter {
    /// Write a 3D volume to disk
    ///
    /// # Arguments
    /// * `path` - Destination file (overwritten if present)
    /// * `data` - Volume samples, axes ordered (z, y, x)
    /// * `voxel_size` - Isotropic voxel size in Angstroms, stored in the cell dimensions
    pub fn write_volume(path: &Path, data: &Array3<f32>, voxel_size: f32) -> TomoResult<()> {
        let (nz, ny, nx) = data.dim();
        let stats = Self::compute_stats(data.iter());
        debug!(
            "Writing {}x{}x{} volume to {}",
            nx,
            ny,
            nz,
            path.display()
        );

        let file = File::create(path)?;
        let mut writer = BufWriter::with_capacity(1024 * 1024, file);

        // ispg 1 marks a single volume
        Self::write_header(&mut writer, nx as i32, ny as i32, nz as i32, 1, voxel_size, &stats)?;
        for value in data.iter() {
            writer.write_f32::<LE>(*value)?;
        }

        // write buffers should be flushed before dropping
        writer.flush()?;
        Ok(())
    }

    /// Write a 2D image to disk
    ///
    /// Stored as a single-section file (nz = 1, ispg 0).
    pub fn write_image(path: &Path, data: &Array2<f32>, voxel_size: f32) -> TomoResult<()> {
        let (ny, nx) = data.dim();
        let stats = Self::compute_stats(data.iter());
        debug!("Writing {}x{} image to {}", nx, ny, path.display());

        let file = File::create(path)?;
        let mut writer = BufWriter::with_capacity(1024 * 1024, file);

        Self::write_header(&mut writer, nx as i32, ny as i32, 1, 0, voxel_size, &stats)?;
        for value in data.iter() {
            writer.write_f32::<LE>(*value)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Write the 1024-byte fixed header
    ///
    /// The layout is 256 four-byte words; unused words are zeroed.
    fn write_header(
        writer: &mut impl Write,
        nx: i32,
        ny: i32,
        nz: i32,
        ispg: i32,
        voxel_size: f32,
        stats: &SampleStats,
    ) -> TomoResult<()> {
        // Words 1-4: dimensions and mode
        writer.write_i32::<LE>(nx)?;
        writer.write_i32::<LE>(ny)?;
        writer.write_i32::<LE>(nz)?;
        writer.write_i32::<LE>(Mode::Float32.code())?;

        // Words 5-7: start offsets
        for _ in 0..3 {
            writer.write_i32::<LE>(0)?;
        }

        // Words 8-10: sampling grid matches the data dimensions
        writer.write_i32::<LE>(nx)?;
        writer.write_i32::<LE>(ny)?;
        writer.write_i32::<LE>(nz)?;

        // Words 11-13: cell dimensions carry the voxel size
        writer.write_f32::<LE>(voxel_size * nx as f32)?;
        writer.write_f32::<LE>(voxel_size * ny as f32)?;
        writer.write_f32::<LE>(voxel_size * nz as f32)?;

        // Words 14-16: cell angles
        for _ in 0..3 {
            writer.write_f32::<LE>(90.0)?;
        }

        // Words 17-19: axis order, column = X, row = Y, section = Z
        writer.write_i32::<LE>(1)?;
        writer.write_i32::<LE>(2)?;
        writer.write_i32::<LE>(3)?;

        // Words 20-22: density statistics
        writer.write_f32::<LE>(stats.dmin)?;
        writer.write_f32::<LE>(stats.dmax)?;
        writer.write_f32::<LE>(stats.dmean)?;

        // Words 23-24: space group and extended header size
        writer.write_i32::<LE>(ispg)?;
        writer.write_i32::<LE>(0)?;

        // Words 25-49: extra space, unused
        writer.write_all(&[0u8; 4 * (50 - 25)])?;

        // Words 50-52: origin
        for _ in 0..3 {
            writer.write_f32::<LE>(0.0)?;
        }

        // Word 53: format magic
        writer.write_all(b"MAP ")?;

        // Word 54: machine stamp, always little-endian
        writer.write_all(&MACHST_LITTLE_ENDIAN)?;

        // Word 55: RMS deviation
        writer.write_f32::<LE>(stats.rms)?;

        // Word 56: label count, then ten empty 80-byte labels
        writer.write_i32::<LE>(0)?;
        writer.write_all(&[0u8; 80 * 10])?;

        Ok(())
    }

    /// Min, max, mean, and RMS deviation of the written samples
    fn compute_stats<'a>(values: impl Iterator<Item = &'a f32> + Clone) -> SampleStats {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        let mut count = 0usize;
        for &v in values.clone() {
            min = min.min(v);
            max = max.max(v);
            sum += v as f64;
            count += 1;
        }
        if count == 0 {
            return SampleStats {
                dmin: 0.0,
                dmax: 0.0,
                dmean: 0.0,
                rms: 0.0,
            };
        }
        let mean = sum / count as f64;
        let mut sq_sum = 0.0f64;
        for &v in values {
            let d = v as f64 - mean;
            sq_sum += d * d;
        }
        SampleStats {
            dmin: min,
            dmax: max,
            dmean: mean as f32,
            rms: (sq_sum / count as f64).sqrt() as f32,
        }
    }
}
