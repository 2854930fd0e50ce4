//! Coordinate file reading
//!
//! A `.coords` file carries one subvolume center per line as three
//! whitespace-separated floats (X Y Z). Parsing is lenient per row:
//! a malformed line is logged and skipped so one stray record does not
//! abort a whole tomogram batch. The skip count is returned alongside
//! the coordinates so the run summary can surface it.

use log::{info, warn};
use std::fs;
use std::path::Path;

use crate::coordinate::point::Point3;
use crate::errors::{TomoError, TomoResult};

/// Result of reading one coordinate file
pub struct CoordinateRead {
    /// Successfully parsed centers, in file order
    pub points: Vec<Point3>,
    /// Number of malformed lines that were skipped
    pub skipped_lines: usize,
}

/// Reads a coordinate file
///
/// # Arguments
/// * `filepath` - Path to the `.coords` file
///
/// # Returns
/// The parsed centers plus a count of lines that failed to parse
pub fn read_coordinates(filepath: &Path) -> TomoResult<CoordinateRead> {
    if !filepath.is_file() {
        return Err(TomoError::MissingInput(format!(
            "coordinate file {}",
            filepath.display()
        )));
    }

    let content = fs::read_to_string(filepath)?;
    let mut points = Vec::new();
    let mut skipped_lines = 0usize;

    for (line_number, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(point) => points.push(point),
            Err(reason) => {
                warn!(
                    "Skipping line {} of {}: {}",
                    line_number + 1,
                    filepath.display(),
                    reason
                );
                skipped_lines += 1;
            }
        }
    }

    info!(
        "Read {} coordinate(s) from {} ({} malformed line(s) skipped)",
        points.len(),
        filepath.display(),
        skipped_lines
    );

    Ok(CoordinateRead {
        points,
        skipped_lines,
    })
}

/// Parses one `X Y Z` line
fn parse_line(line: &str) -> Result<Point3, String> {
    let mut parts = line.split_whitespace();
    let x = parse_value(parts.next(), "X")?;
    let y = parse_value(parts.next(), "Y")?;
    let z = parse_value(parts.next(), "Z")?;
    Ok(Point3::new(x, y, z))
}

fn parse_value(part: Option<&str>, axis: &str) -> Result<f64, String> {
    let part = part.ok_or_else(|| format!("missing {} value", axis))?;
    part.parse::<f64>()
        .map_err(|_| format!("{} value is not a number: '{}'", axis, part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("tomokit_{}_{}", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_valid_coordinates() {
        let path = temp_file("coords_valid.coords", "1.0 2.0 3.0\n4.5\t5.5\t6.5\n");
        let read = read_coordinates(&path).unwrap();
        assert_eq!(read.points.len(), 2);
        assert_eq!(read.skipped_lines, 0);
        assert_eq!(read.points[0], Point3::new(1.0, 2.0, 3.0));
        assert_eq!(read.points[1], Point3::new(4.5, 5.5, 6.5));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let path = temp_file(
            "coords_malformed.coords",
            "1.0 2.0 3.0\nnot a line\n7.0 8.0\n9.0 10.0 11.0\n",
        );
        let read = read_coordinates(&path).unwrap();
        assert_eq!(read.points.len(), 2);
        assert_eq!(read.skipped_lines, 2);
        assert_eq!(read.points[1], Point3::new(9.0, 10.0, 11.0));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("tomokit_no_such_file.coords");
        assert!(matches!(
            read_coordinates(&path),
            Err(TomoError::MissingInput(_))
        ));
    }
}
