//! Partial lookup.
//!
//! Partials live as `<name>.html` files in a single flat directory. The
//! registry reads each one at most once per build and hands out the raw
//! text; variable substitution happens per page in [`crate::expand`].

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::marker::is_valid_name;

/// Source of raw partial content, looked up by name.
pub trait PartialSource {
    /// Load the raw (unsubstituted) content of the named partial.
    fn load(&mut self, name: &str) -> Result<String, PartialError>;
}

/// Errors that can occur when loading a partial.
#[derive(Debug, thiserror::Error)]
pub enum PartialError {
    #[error("Partial not found: {name} (expected {path})")]
    NotFound { name: String, path: String },

    #[error("Failed to read partial {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid partial name: {0:?}")]
    InvalidName(String),
}

/// Filesystem-backed partial source.
#[derive(Debug)]
pub struct PartialRegistry {
    /// Directory holding `<name>.html` files
    dir: PathBuf,

    /// Raw partial text by name
    cache: HashMap<String, String>,
}

impl PartialRegistry {
    /// Create a registry reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: HashMap::new(),
        }
    }

    /// Path of the file backing the named partial.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.html", name))
    }

    /// Number of distinct partials loaded so far.
    pub fn loaded(&self) -> usize {
        self.cache.len()
    }
}

impl PartialSource for PartialRegistry {
    fn load(&mut self, name: &str) -> Result<String, PartialError> {
        if let Some(content) = self.cache.get(name) {
            return Ok(content.clone());
        }

        if !is_valid_name(name) {
            return Err(PartialError::InvalidName(name.to_string()));
        }

        let path = self.path_for(name);
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PartialError::NotFound {
                name: name.to_string(),
                path: path.display().to_string(),
            },
            _ => PartialError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            },
        })?;

        tracing::debug!("Loaded partial {} from {}", name, path.display());
        self.cache.insert(name.to_string(), content.clone());

        Ok(content)
    }
}

/// In-memory partials, keyed by name.
impl PartialSource for HashMap<String, String> {
    fn load(&mut self, name: &str) -> Result<String, PartialError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| PartialError::NotFound {
                name: name.to_string(),
                path: format!("{}.html", name),
            })
    }
}
