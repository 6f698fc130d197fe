use crate::core::error::{FixtureError, Result};
use std::path::{Path, PathBuf};

/// Create `path` and any missing parents. An existing directory is left as is.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    log::debug!("Creating directory {}", path.display());
    std::fs::create_dir_all(path).map_err(|e| FixtureError::io(path, e))
}

/// Resolve a relative path against the current working directory.
pub fn make_absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| FixtureError::io(path, e))?;
    Ok(cwd.join(path))
}
