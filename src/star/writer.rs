//! STAR file writing
//!
//! Writes one loop table per file. The whole table is materialized in
//! memory by the caller before the single write call; any file already
//! at the destination is overwritten.

use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::TomoResult;
use crate::star::table::StarTable;

/// Handles writing STAR files to disk
pub struct StarWriter;

impl StarWriter {
    /// Write a table to the given path
    ///
    /// Missing parent directories are created first. Cells are padded
    /// to their column's widest value so the file stays readable.
    ///
    /// # Arguments
    /// * `table` - The table to persist
    /// * `output_path` - Destination file
    pub fn write(table: &StarTable, output_path: &Path) -> TomoResult<()> {
        info!(
            "Writing STAR table '{}' ({} rows) to {}",
            table.name(),
            table.len(),
            output_path.display()
        );

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(output_path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "data_{}", table.name())?;
        writeln!(writer)?;
        writeln!(writer, "loop_")?;
        for (i, label) in table.labels().iter().enumerate() {
            writeln!(writer, "_{} #{}", label, i + 1)?;
        }

        let widths = Self::column_widths(table);
        for row in table.rows() {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    line.push_str("  ");
                }
                line.push_str(&format!(
                    "{:<width$}",
                    Self::quote_cell(cell),
                    width = widths[i]
                ));
            }
            writeln!(writer, "{}", line.trim_end())?;
        }

        // write buffers should be flushed before dropping
        writer.flush()?;
        Ok(())
    }

    /// Widest cell per column, for padding
    fn column_widths(table: &StarTable) -> Vec<usize> {
        let mut widths = vec![0usize; table.labels().len()];
        for row in table.rows() {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(Self::quote_cell(cell).len());
            }
        }
        widths
    }

    /// Quotes a cell that whitespace tokenization could not round-trip
    ///
    /// An empty value becomes `""`; everything the pipeline produces is
    /// otherwise whitespace-free.
    fn quote_cell(cell: &str) -> String {
        if cell.is_empty() {
            "\"\"".to_string()
        } else {
            cell.to_string()
        }
    }
}
