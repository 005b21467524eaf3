//! Site build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use splice_static::{BuildConfig, StaticBuilder};

/// Name of the optional config file in the site root.
pub const CONFIG_FILE: &str = "splice.toml";

/// Configuration file structure (splice.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    paths: PathsConfig,
}

/// Site layout, relative to the site root.
#[derive(Debug, Deserialize)]
struct PathsConfig {
    #[serde(default = "default_source")]
    source: String,
    #[serde(default = "default_partials")]
    partials: String,
    #[serde(default = "default_output")]
    output: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            partials: default_partials(),
            output: default_output(),
        }
    }
}

fn default_source() -> String {
    "public".to_string()
}
fn default_partials() -> String {
    "_partials".to_string()
}
fn default_output() -> String {
    "build".to_string()
}

/// Load configuration from splice.toml if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(root: &Path) -> Result<ConfigFile> {
    let config_path = root.join(CONFIG_FILE);
    if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        tracing::debug!("Loaded config from {}", config_path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Resolve the build configuration for a site root.
///
/// Config file paths are relative to `root`; an `output` override is used
/// as given.
fn resolve_config(root: &Path, output: Option<PathBuf>) -> Result<BuildConfig> {
    let file_config = load_config(root)?;
    let paths = file_config.paths;

    Ok(BuildConfig {
        source_dir: root.join(&paths.source),
        partials_dir: root.join(&paths.partials),
        output_dir: output.unwrap_or_else(|| root.join(&paths.output)),
    })
}

/// Output directory as shown in the summary line.
fn display_output(output: &Path, root: &Path) -> String {
    let shown = output.strip_prefix(root).unwrap_or(output);
    format!("{}/", shown.display().to_string().trim_end_matches('/'))
}

/// Run the build command.
pub fn run(root: &Path, output: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(root, output)?;
    tracing::debug!(
        "Building {} with partials from {}",
        config.source_dir.display(),
        config.partials_dir.display()
    );

    let result = StaticBuilder::new(config).build()?;

    tracing::debug!(
        "Scanned {} pages, copied {} files in {}ms",
        result.pages,
        result.files_copied,
        result.duration_ms
    );
    tracing::info!(
        "Built {} pages into {}",
        result.rewritten,
        display_output(&result.output_dir, root)
    );

    Ok(())
}
