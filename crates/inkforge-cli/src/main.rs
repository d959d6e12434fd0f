//! Inkforge developer CLI.
//!
//! `inkforge generate` runs the full pipeline against an archive root and
//! writes an ink! project. `inkforge inspect` prints the classification as
//! JSON without emitting anything.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inkforge::schema::{classify::Classification, loader};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "inkforge", author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate an ink! contract project from a model archive root.
    Generate {
        /// Directory containing one subdirectory per archive.
        #[arg(long, value_name = "DIR", env = "INKFORGE_ARCHIVES")]
        archives: PathBuf,

        /// Output project directory. Replaced wholesale on every run.
        #[arg(long, value_name = "DIR")]
        out: PathBuf,
    },

    /// Load and classify an archive root, printing the result as JSON.
    Inspect {
        /// Directory containing one subdirectory per archive.
        #[arg(long, value_name = "DIR", env = "INKFORGE_ARCHIVES")]
        archives: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate { archives, out } => generate(&archives, &out),
        Command::Inspect { archives } => inspect(&archives),
    }
}

fn generate(archives: &Path, out: &Path) -> Result<()> {
    let report = inkforge::run(archives, out)
        .with_context(|| format!("generating from {}", archives.display()))?;

    for diagnostic in &report.diagnostics {
        info!(fqn = %diagnostic.fqn, reason = %diagnostic.reason, "dropped");
    }
    for path in &report.emitted {
        println!("{}", path.display());
    }
    info!(
        contract = %report.contract_name,
        files = report.emitted.len(),
        out = %out.display(),
        "done"
    );

    Ok(())
}

fn inspect(archives: &Path) -> Result<()> {
    let loaded = loader::load(archives)
        .with_context(|| format!("loading archives from {}", archives.display()))?;
    let classification = Classification::from_registry(&loaded.registry);

    println!("{}", serde_json::to_string_pretty(&classification)?);
    Ok(())
}
