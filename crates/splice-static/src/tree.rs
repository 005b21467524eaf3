//! Output tree preparation.

use std::fs;
use std::io;
use std::path::{self, Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::builder::BuildError;

/// Delete `output` if it exists.
pub fn reset_output(output: &Path) -> Result<(), BuildError> {
    if output.exists() {
        fs::remove_dir_all(output).map_err(|e| BuildError::WriteError {
            path: output.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!("Removed previous output {}", output.display());
    }
    Ok(())
}

/// Absolute, normalised form of `path` for comparing locations.
///
/// `.` and `..` are resolved lexically, then the longest existing prefix is
/// canonicalized so symlinks resolve too. The path itself need not exist.
pub fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let mut lexical = PathBuf::new();
    for component in path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                lexical.pop();
            }
            other => lexical.push(other),
        }
    }

    let mut existing = lexical.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = existing.canonicalize()?;
    for name in missing.into_iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

/// Whether one directory contains the other (or they are the same).
pub fn overlaps(a: &Path, b: &Path) -> io::Result<bool> {
    let a = resolve_path(a)?;
    let b = resolve_path(b)?;
    Ok(a.starts_with(&b) || b.starts_with(&a))
}

/// Recursively copy `source` to `dest`, preserving structure.
///
/// Returns the number of files copied.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<usize, BuildError> {
    if !source.is_dir() {
        return Err(BuildError::SourceNotFound(source.display().to_string()));
    }

    let mut count = 0;

    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| BuildError::ReadError {
            path: e
                .path()
                .unwrap_or(source)
                .display()
                .to_string(),
            message: e.to_string(),
        })?;

        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| BuildError::WriteError {
                path: target.display().to_string(),
                message: e.to_string(),
            })?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| BuildError::WriteError {
                path: target.display().to_string(),
                message: e.to_string(),
            })?;
            count += 1;
        }
    }

    Ok(count)
}
