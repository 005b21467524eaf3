//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use splice_partials::{expand, page_depth, PartialError, PartialRegistry, TemplateVars};

use crate::tree;

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source pages and static assets
    pub source_dir: PathBuf,

    /// Flat directory of `<name>.html` partials
    pub partials_dir: PathBuf,

    /// Output directory (deleted and regenerated on every build)
    pub output_dir: PathBuf,
}

impl BuildConfig {
    /// Default layout under a site root: `public/`, `_partials/`, `build/`.
    pub fn for_root(root: &Path) -> Self {
        Self {
            source_dir: root.join("public"),
            partials_dir: root.join("_partials"),
            output_dir: root.join("build"),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of HTML pages scanned
    pub pages: usize,

    /// Number of pages rewritten with expanded partials
    pub rewritten: usize,

    /// Number of files copied from the source tree
    pub files_copied: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Source directory not found: {0}")]
    SourceNotFound(String),

    #[error("Output directory {output} overlaps source directory {source_dir}")]
    OverlappingDirs { output: String, source_dir: String },

    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    WriteError { path: String, message: String },

    #[error("Failed to expand partials in {page}: {source}")]
    Partial {
        page: String,
        #[source]
        source: PartialError,
    },
}

/// A page found in the output tree.
#[derive(Debug)]
struct PageInfo {
    /// Path inside the output directory
    output_path: PathBuf,

    /// Path relative to the output directory
    relative_path: PathBuf,

    /// Directory depth below the output root
    depth: usize,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Build the static site.
    ///
    /// Any failure aborts the build; the output directory is left in
    /// whatever state it reached.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let source = &self.config.source_dir;
        let output = &self.config.output_dir;

        let overlapping = tree::overlaps(source, output).map_err(|e| BuildError::ReadError {
            path: source.display().to_string(),
            message: e.to_string(),
        })?;
        if overlapping {
            return Err(BuildError::OverlappingDirs {
                output: output.display().to_string(),
                source_dir: source.display().to_string(),
            });
        }

        if !source.is_dir() {
            return Err(BuildError::SourceNotFound(source.display().to_string()));
        }

        // Start from a clean copy of the source tree
        tree::reset_output(output)?;
        let files_copied = tree::copy_tree(source, output)?;
        tracing::debug!(
            "Copied {} files from {} to {}",
            files_copied,
            source.display(),
            output.display()
        );

        let pages = self.discover_pages()?;
        let mut registry = PartialRegistry::new(&self.config.partials_dir);
        let mut rewritten = 0;

        for page in &pages {
            if self.build_page(page, &mut registry)? {
                rewritten += 1;
            }
        }

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: pages.len(),
            rewritten,
            files_copied,
            duration_ms: duration.as_millis() as u64,
            output_dir: output.clone(),
        })
    }

    /// Discover all HTML pages in the output directory.
    fn discover_pages(&self) -> Result<Vec<PageInfo>, BuildError> {
        let output = &self.config.output_dir;
        let mut pages = Vec::new();

        for entry in WalkDir::new(output).sort_by_file_name() {
            let entry = entry.map_err(|e| BuildError::ReadError {
                path: e.path().unwrap_or(output).display().to_string(),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            // Case-sensitive: `.HTML` files are copied but never expanded
            if !entry.file_name().to_string_lossy().ends_with(".html") {
                continue;
            }

            let relative_path = entry
                .path()
                .strip_prefix(output)
                .unwrap_or(entry.path())
                .to_path_buf();

            pages.push(PageInfo {
                output_path: entry.path().to_path_buf(),
                depth: page_depth(&relative_path),
                relative_path,
            });
        }

        Ok(pages)
    }

    /// Expand partials in a single page.
    ///
    /// Returns whether the page was rewritten.
    fn build_page(
        &self,
        page: &PageInfo,
        registry: &mut PartialRegistry,
    ) -> Result<bool, BuildError> {
        let content =
            fs::read_to_string(&page.output_path).map_err(|e| BuildError::ReadError {
                path: page.output_path.display().to_string(),
                message: e.to_string(),
            })?;

        let vars = TemplateVars::for_depth(page.depth);
        let expansion =
            expand(&content, &vars, registry).map_err(|source| BuildError::Partial {
                page: page.relative_path.display().to_string(),
                source,
            })?;

        if expansion.content == content {
            tracing::debug!("Unchanged: {}", page.relative_path.display());
            return Ok(false);
        }

        fs::write(&page.output_path, &expansion.content).map_err(|e| {
            BuildError::WriteError {
                path: page.output_path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        tracing::debug!(
            "Rewrote {} (depth {}, partials: {})",
            page.relative_path.display(),
            page.depth,
            expansion.partials.join(", ")
        );

        Ok(true)
    }
}
