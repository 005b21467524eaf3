//! splice CLI - assemble static HTML pages from shared partials.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "splice")]
#[command(about = "Assemble static HTML pages from shared partials")]
#[command(version)]
pub struct Cli {
    /// Command to run (defaults to build)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Site root containing public/, _partials/ and splice.toml
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the output directory from public/ and _partials/
    Build {
        /// Output directory (defaults to config or "build" under the root)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Scaffold a new site under the root
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command.unwrap_or(Commands::Build { output: None }) {
        Commands::Build { output } => {
            commands::build::run(&cli.root, output)?;
        }
        Commands::Init { yes } => {
            commands::init::run(&cli.root, yes)?;
        }
    }

    Ok(())
}
