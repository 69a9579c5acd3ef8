use std::path::Path;

use crate::errors::ApeError;

/// Ensure a directory exists, creating it and any parents if needed.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Read a file to a string, reporting a missing file as [`ApeError::FileNotFound`].
pub fn read_file(path: &Path) -> Result<String, ApeError> {
    if !path.is_file() {
        return Err(ApeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Names of the sub-directories of `dir`, sorted.
///
/// A missing directory yields an empty list.
pub fn list_dirs(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    if !dir.is_dir() {
        return Ok(names);
    }
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
