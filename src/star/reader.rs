//! STAR file reader implementation
//!
//! Parses the loop tables out of a STAR file: `data_<name>` blocks,
//! each with a `loop_` section of `_label` declarations followed by
//! whitespace-separated data rows. Comment lines and block-level
//! key-value pairs are skipped.

use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::errors::{TomoError, TomoResult};
use crate::star::constants::blocks;
use crate::star::table::StarTable;

/// Parser state while walking a file's lines
enum ParseState {
    /// Between blocks
    Scanning,
    /// Inside a data block, before any loop
    InBlock,
    /// Collecting `_label` declarations after a `loop_`
    InLoopHeader,
    /// Collecting data rows
    InLoopRows,
}

/// Reader for STAR metadata files
pub struct StarReader {
    /// Current file path, when reading from disk
    current_file: Option<String>,
}

impl StarReader {
    /// Creates a new STAR reader
    pub fn new() -> Self {
        StarReader { current_file: None }
    }

    /// Loads all loop tables from the given path
    ///
    /// # Arguments
    /// * `filepath` - Path to the STAR file to load
    ///
    /// # Returns
    /// Every data block that carries a loop table, in file order
    pub fn load(&mut self, filepath: &Path) -> TomoResult<Vec<StarTable>> {
        if !filepath.is_file() {
            return Err(TomoError::MissingInput(format!(
                "STAR file {}",
                filepath.display()
            )));
        }
        info!("Loading STAR file: {}", filepath.display());
        self.current_file = Some(filepath.display().to_string());

        let content = fs::read_to_string(filepath)?;
        self.read(&content)
    }

    /// Parses loop tables out of STAR text
    pub fn read(&mut self, content: &str) -> TomoResult<Vec<StarTable>> {
        let mut tables = Vec::new();
        let mut current: Option<StarTable> = None;
        let mut state = ParseState::Scanning;

        for (line_number, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();

            // Comments never carry table content
            if line.starts_with('#') {
                continue;
            }

            if let Some(block_name) = line.strip_prefix("data_") {
                // A new block closes the previous one
                if let Some(table) = current.take() {
                    Self::finish_table(&mut tables, table);
                }
                debug!("STAR block: '{}'", block_name);
                current = Some(StarTable::new(block_name));
                state = ParseState::InBlock;
                continue;
            }

            match state {
                ParseState::Scanning => {
                    // Content before the first data block is not valid STAR,
                    // but blank lines are fine
                    if !line.is_empty() {
                        return Err(TomoError::ParseError(format!(
                            "line {}: content outside any data block",
                            line_number + 1
                        )));
                    }
                }
                ParseState::InBlock => {
                    if line == "loop_" {
                        state = ParseState::InLoopHeader;
                    }
                    // Block-level key-value pairs and blank lines are skipped
                }
                ParseState::InLoopHeader => {
                    if let Some(label) = line.strip_prefix('_') {
                        // Declarations look like `_rlnCoordinateX #1`;
                        // only the label matters
                        let label = label.split_whitespace().next().unwrap_or("");
                        if let Some(table) = current.as_mut() {
                            table.add_label(label);
                        }
                    } else if line.is_empty() {
                        // Tolerated between header and rows
                    } else {
                        state = ParseState::InLoopRows;
                        Self::push_row(current.as_mut(), line, line_number)?;
                    }
                }
                ParseState::InLoopRows => {
                    if line.is_empty() {
                        // A blank line ends the loop but not the block
                        state = ParseState::InBlock;
                    } else {
                        Self::push_row(current.as_mut(), line, line_number)?;
                    }
                }
            }
        }

        if let Some(table) = current.take() {
            Self::finish_table(&mut tables, table);
        }

        info!("Read {} table(s) from STAR file", tables.len());
        Ok(tables)
    }

    /// Picks the particles table out of a file's blocks
    ///
    /// Preference order: a block named `particles`, then the anonymous
    /// block, then simply the first one.
    pub fn select_particles(tables: Vec<StarTable>) -> TomoResult<StarTable> {
        if tables.is_empty() {
            return Err(TomoError::ParseError(
                "STAR file contains no loop tables".to_string(),
            ));
        }
        if let Some(pos) = tables.iter().position(|t| t.name() == blocks::PARTICLES) {
            return Ok(tables.into_iter().nth(pos).unwrap());
        }
        if let Some(pos) = tables.iter().position(|t| t.name().is_empty()) {
            return Ok(tables.into_iter().nth(pos).unwrap());
        }
        Ok(tables.into_iter().next().unwrap())
    }

    fn push_row(
        table: Option<&mut StarTable>,
        line: &str,
        line_number: usize,
    ) -> TomoResult<()> {
        let Some(table) = table else {
            return Ok(());
        };
        let cells: Vec<String> = line
            .split_whitespace()
            .map(Self::unquote_cell)
            .collect();
        table.push_row(cells).map_err(|e| {
            TomoError::ParseError(format!("line {}: {}", line_number + 1, e))
        })
    }

    fn finish_table(tables: &mut Vec<StarTable>, table: StarTable) {
        // Blocks without a loop carry nothing this tool uses
        if !table.labels().is_empty() {
            tables.push(table);
        }
    }

    /// Strips the quotes off a quoted token (`""` marks an empty cell)
    fn unquote_cell(token: &str) -> String {
        if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
            token[1..token.len() - 1].to_string()
        } else {
            token.to_string()
        }
    }

    /// Gets the file path if available
    pub fn get_file_path(&self) -> Option<&str> {
        self.current_file.as_deref()
    }
}

impl Default for StarReader {
    fn default() -> Self {
        Self::new()
    }
}
