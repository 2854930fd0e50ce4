//! Path helpers
//!
//! Directory creation and the relative-then-bare resolution rule used
//! for image paths stored in STAR tables.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::TomoResult;

/// Creates a directory and its parents if missing
pub fn ensure_dir(path: &Path) -> TomoResult<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Resolves an image path recorded in a STAR table
///
/// Paths are stored relative to the table's own directory, so that is
/// tried first; a path that does not resolve there is retried as
/// written (absolute or relative to the working directory).
///
/// # Arguments
/// * `base_dir` - Directory of the STAR file the path came from
/// * `recorded` - The path as stored in the table
///
/// # Returns
/// The first existing candidate, or None when neither resolves
pub fn resolve_image_path(base_dir: &Path, recorded: &str) -> Option<PathBuf> {
    let relative = base_dir.join(recorded);
    if relative.is_file() {
        return Some(relative);
    }
    let bare = PathBuf::from(recorded);
    if bare.is_file() {
        return Some(bare);
    }
    None
}

/// Strips a known volume extension from a file name
///
/// Tomogram list entries are base names, but tolerating full file
/// names costs nothing and spares a round of list editing.
pub fn strip_volume_extension(name: &str) -> &str {
    name.strip_suffix(".mrc")
        .or_else(|| name.strip_suffix(".rec"))
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_volume_extension() {
        assert_eq!(strip_volume_extension("tomo_a.mrc"), "tomo_a");
        assert_eq!(strip_volume_extension("tomo_a.rec"), "tomo_a");
        assert_eq!(strip_volume_extension("tomo_a"), "tomo_a");
        assert_eq!(strip_volume_extension("tomo.v2"), "tomo.v2");
    }

    #[test]
    fn test_resolve_image_path_prefers_base_dir() {
        let dir = std::env::temp_dir().join(format!("tomokit_{}_resolve", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let target = dir.join("a.mrc");
        fs::write(&target, b"x").unwrap();

        let resolved = resolve_image_path(&dir, "a.mrc").unwrap();
        assert_eq!(resolved, target);

        assert!(resolve_image_path(&dir, "missing.mrc").is_none());

        fs::remove_dir_all(&dir).ok();
    }
}
