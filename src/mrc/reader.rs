//! MRC file reader implementation
//!
//! Reads a header, selects the matching byte-order strategy, and widens
//! the sample block to f32 in the file's logical shape.

use log::{debug, info};
use ndarray::ArrayD;
use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::Path;

use crate::errors::{TomoError, TomoResult};
use crate::io::seekable::SeekableReader;
use crate::mrc::header::MrcHeader;
use crate::mrc::types::Volume;

/// Reader for MRC volume files
pub struct MrcReader {
    /// Current file path, when reading from disk
    current_file: Option<String>,
}

impl MrcReader {
    /// Creates a new MRC reader
    pub fn new() -> Self {
        MrcReader { current_file: None }
    }

    /// Loads a full volume from the given path
    ///
    /// This is the main entry point for reading a tomogram or subvolume
    /// from disk. The file must exist; a missing file is a missing-input
    /// error rather than a bare I/O error so callers can fail fast with
    /// a useful message.
    ///
    /// # Arguments
    /// * `filepath` - Path to the MRC file to load
    ///
    /// # Returns
    /// The decoded volume with its voxel size
    pub fn load(&mut self, filepath: &Path) -> TomoResult<Volume> {
        if !filepath.is_file() {
            return Err(TomoError::MissingInput(format!(
                "volume file {}",
                filepath.display()
            )));
        }
        info!("Loading MRC file: {}", filepath.display());
        self.current_file = Some(filepath.display().to_string());

        let file = File::open(filepath)?;
        let mut reader = BufReader::with_capacity(1024 * 1024, file); // 1MB buffer

        self.read(&mut reader)
    }

    /// Reads a volume from the given reader
    ///
    /// # Arguments
    /// * `reader` - Any struct implementing the SeekableReader trait
    ///
    /// # Returns
    /// The decoded volume with its voxel size
    pub fn read(&mut self, reader: &mut dyn SeekableReader) -> TomoResult<Volume> {
        let header = MrcHeader::read(reader)?;
        debug!(
            "MRC header: {}x{}x{} mode={} ispg={} nsymbt={}",
            header.nx,
            header.ny,
            header.nz,
            header.mode.name(),
            header.ispg,
            header.nsymbt
        );

        // Skip the extended header, then decode every sample
        reader.seek(SeekFrom::Start(header.data_offset()))?;
        let handler = header.byte_order.create_handler();

        let count = header.sample_count();
        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            samples.push(header.mode.read_sample(reader, handler.as_ref())?);
        }

        let shape = header.data_shape();
        let data = ArrayD::from_shape_vec(shape.clone(), samples)
            .map_err(|e| TomoError::ShapeError(e.to_string()))?;

        info!(
            "Read {} samples as shape {:?}, voxel size {:.4}",
            count,
            shape,
            header.voxel_size()
        );

        Ok(Volume {
            data,
            voxel_size: header.voxel_size(),
        })
    }

    /// Reads only the header of a file on disk
    pub fn load_header(&mut self, filepath: &Path) -> TomoResult<MrcHeader> {
        if !filepath.is_file() {
            return Err(TomoError::MissingInput(format!(
                "volume file {}",
                filepath.display()
            )));
        }
        self.current_file = Some(filepath.display().to_string());

        let file = File::open(filepath)?;
        let mut reader = BufReader::new(file);
        MrcHeader::read(&mut reader)
    }

    /// Reads the voxel size of a file without decoding its data
    pub fn load_voxel_size(&mut self, filepath: &Path) -> TomoResult<f32> {
        Ok(self.load_header(filepath)?.voxel_size())
    }

    /// Gets the file path if available
    pub fn get_file_path(&self) -> Option<&str> {
        self.current_file.as_deref()
    }
}

impl Default for MrcReader {
    fn default() -> Self {
        Self::new()
    }
}
