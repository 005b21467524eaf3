//! Scaffold a new site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::build::CONFIG_FILE;

/// Run the init command.
pub fn run(root: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing site in {}...", root.display());

    let files: [(&str, &str); 4] = [
        (CONFIG_FILE, DEFAULT_CONFIG),
        ("_partials/nav.html", DEFAULT_NAV),
        ("public/index.html", DEFAULT_INDEX),
        ("public/tools/index.html", DEFAULT_TOOLS_INDEX),
    ];

    for (relative, content) in files {
        let path = root.join(relative);

        if path.exists() && !yes {
            tracing::warn!("{} already exists. Use --yes to overwrite.", relative);
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", relative))?;
        tracing::info!("Created {}", relative);
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'splice' to build the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# splice configuration

[paths]
# Source pages and static assets
source = "public"

# Shared fragments, referenced as <!-- PARTIAL:name -->
partials = "_partials"

# Output directory (deleted and rebuilt on every run)
output = "build"
"#;

const DEFAULT_NAV: &str = r#"<nav class="site-nav">
  <a href="{{BASE}}index.html">Home</a>
  <a href="{{TOOLS_HREF}}"{{TOOLS_ACTIVE}}>Tools</a>
</nav>"#;

const DEFAULT_INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Home</title>
</head>
<body>
  <!-- PARTIAL:nav -->
  <main>
    <h1>Welcome</h1>
  </main>
</body>
</html>
"#;

const DEFAULT_TOOLS_INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Tools</title>
</head>
<body>
  <!-- PARTIAL:nav -->
  <main>
    <h1>Tools</h1>
  </main>
</body>
</html>
"#;
