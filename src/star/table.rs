//! In-memory STAR loop table
//!
//! A table is an ordered list of column labels plus rows of string
//! cells. Values stay as text until a caller asks for a typed view,
//! which keeps the reader format-agnostic and the writer lossless.

use crate::errors::{TomoError, TomoResult};

/// One STAR data block holding a loop table
#[derive(Debug, Clone)]
pub struct StarTable {
    /// Block name (the part after `data_`)
    name: String,
    /// Ordered column labels, without the leading underscore
    labels: Vec<String>,
    /// Data rows; every row has exactly one cell per label
    rows: Vec<Vec<String>>,
}

impl StarTable {
    /// Create an empty table for the given block name
    pub fn new(name: impl Into<String>) -> Self {
        StarTable {
            name: name.into(),
            labels: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Create an empty table with its columns declared up front
    pub fn with_labels(name: impl Into<String>, labels: &[&str]) -> Self {
        StarTable {
            name: name.into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Block name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered column labels
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a column label, returning its index
    pub fn add_label(&mut self, label: impl Into<String>) -> usize {
        self.labels.push(label.into());
        self.labels.len() - 1
    }

    /// Appends a data row
    ///
    /// The row must have exactly one cell per declared column.
    pub fn push_row(&mut self, row: Vec<String>) -> TomoResult<()> {
        if row.len() != self.labels.len() {
            return Err(TomoError::ParseError(format!(
                "row has {} cells but table '{}' declares {} columns",
                row.len(),
                self.name,
                self.labels.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Index of a column by label, if present
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Whether the table declares the given column
    pub fn has_column(&self, label: &str) -> bool {
        self.column_index(label).is_some()
    }

    /// Cell value at (row, label), if both exist
    pub fn get(&self, row: usize, label: &str) -> Option<&str> {
        let col = self.column_index(label)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    /// Cell value parsed as f64
    ///
    /// Returns Ok(None) when the column is absent, an error when the
    /// cell exists but is not a number.
    pub fn get_f64(&self, row: usize, label: &str) -> TomoResult<Option<f64>> {
        match self.get(row, label) {
            None => Ok(None),
            Some(cell) => cell
                .parse::<f64>()
                .map(Some)
                .map_err(|_| {
                    TomoError::ParseError(format!(
                        "column {} row {} is not a number: '{}'",
                        label, row, cell
                    ))
                }),
        }
    }

    /// Iterator over the raw rows
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|r| r.as_slice())
    }
}
