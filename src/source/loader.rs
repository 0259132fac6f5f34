use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BumpError, Result};
use crate::source::CompilationUnit;

/// Paths of the Go files named by `target`.
///
/// A file stands for itself. A directory contributes every `*.go` file
/// directly inside it, sorted by name; subdirectories are not visited.
pub fn unit_paths(target: &Path) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }

    let entries = fs::read_dir(target)
        .map_err(|e| BumpError::source(format!("cannot read {}: {}", target.display(), e)))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "go"))
        .collect();
    paths.sort();

    debug!(
        target = %target.display(),
        files = paths.len(),
        "found Go sources"
    );

    Ok(paths)
}

/// Write a unit's rendered text back to its own path.
pub fn write_unit(unit: &dyn CompilationUnit) -> Result<()> {
    let path = unit.path();
    fs::write(path, unit.render())
        .map_err(|e| BumpError::source(format!("cannot write {}: {}", path.display(), e)))?;
    debug!(file = %path.display(), "rewrote source");
    Ok(())
}
