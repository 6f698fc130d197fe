//! Working-tree file access for fixture repositories.
//!
//! All names are relative to the fixture root. Names that are absolute, climb
//! out with `..`, or point into `.git` are rejected with
//! [`FixtureError::InvalidFileName`] before the filesystem is touched.
//!
//! # Public API
//! - [`write_file`]: create or overwrite a file (parents created as needed)
//! - [`read_file`] / [`read_to_string`]: read a file, failing if it is absent
//! - [`file_exists`]: `false` only for "not found"; other errors propagate

use crate::core::dirs::ensure_dir;
use crate::core::error::{FixtureError, Result};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// Check that `name` stays inside the fixture working tree.
pub fn validate_file_name(name: &str) -> Result<&Path> {
    let path = Path::new(name);
    let mut normal_components = 0;

    for component in path.components() {
        match component {
            Component::Normal(part) => {
                if normal_components == 0 && part == ".git" {
                    return Err(FixtureError::invalid_file_name(name));
                }
                normal_components += 1;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(FixtureError::invalid_file_name(name));
            }
        }
    }

    if normal_components == 0 {
        return Err(FixtureError::invalid_file_name(name));
    }
    Ok(path)
}

fn resolve(root: &Path, name: &str) -> Result<PathBuf> {
    Ok(root.join(validate_file_name(name)?))
}

/// Create or truncate `name` under `root` and write `content` to it.
pub fn write_file(root: &Path, name: &str, content: &[u8]) -> Result<PathBuf> {
    let path = resolve(root, name)?;
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(&path).map_err(|e| FixtureError::io(&path, e))?;
    file.write_all(content)
        .map_err(|e| FixtureError::io(&path, e))?;
    log::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(path)
}

pub fn read_file(root: &Path, name: &str) -> Result<Vec<u8>> {
    let path = resolve(root, name)?;
    std::fs::read(&path).map_err(|e| FixtureError::io(&path, e))
}

/// Like [`read_file`] but the content must be UTF-8.
pub fn read_to_string(root: &Path, name: &str) -> Result<String> {
    let path = resolve(root, name)?;
    std::fs::read_to_string(&path).map_err(|e| FixtureError::io(&path, e))
}

pub fn file_exists(root: &Path, name: &str) -> Result<bool> {
    let path = resolve(root, name)?;
    match std::fs::metadata(&path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(FixtureError::io(&path, e)),
    }
}
