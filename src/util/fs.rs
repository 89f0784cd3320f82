use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, IoContext, Result};

/// Create `path` and its parents if missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).at(path)
}

/// Remove a directory tree. Missing directories are not an error.
pub fn remove_dir_if_exists(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(path).at(path)?;
    Ok(true)
}

/// Copy one file, creating the destination's parent and overwriting any existing file.
pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        ensure_dir(parent)?;
    }
    fs::copy(source, dest).map_err(|err| {
        Error::io(
            source,
            std::io::Error::new(
                err.kind(),
                format!("failed to copy to {}: {err}", dest.display()),
            ),
        )
    })?;
    debug!("Copied {} -> {}", source.display(), dest.display());
    Ok(())
}

/// Recursively copy the contents of `source` into `dest`, overwriting files.
///
/// Returns the destination paths of every copied file.
pub fn copy_dir_all(source: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    ensure_dir(dest)?;

    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(source).to_path_buf();
            Error::io(path, std::io::Error::other(err.to_string()))
        })?;

        let relative = entry
            .path()
            .strip_prefix(source)
            .expect("walkdir entries are rooted at the source directory");
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
            copied.push(target);
        }
    }

    Ok(copied)
}
