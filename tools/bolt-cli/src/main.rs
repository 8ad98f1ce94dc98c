//! bolt - BOLT archive inspection tool
//!
//! # Commands
//!
//! - `bolt list` - List directories and the type of every resource
//! - `bolt describe` - Print the structured fields of a resource
//! - `bolt dump` - Hex dump of a decoded resource
//! - `bolt extract` - Write a resource as PNG, WAV or raw bytes
//!
//! # Usage
//!
//! ```bash
//! bolt list MERLIN.BLT
//! bolt describe MERLIN.BLT 9D01 --json
//! bolt extract MERLIN.BLT 9D02 --palette 9D01 -o title.png
//! ```
//!
//! Set `RUST_LOG=bolt_archive=trace` to follow the archive reader.

mod config;
mod describe;
mod dump;
mod extract;
mod list;

use anyhow::{Context, Result};
use bolt_archive::Archive;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use config::BoltConfig;

#[derive(Parser)]
#[command(name = "bolt")]
#[command(about = "BOLT archive inspection tool")]
#[command(version)]
struct Cli {
    /// Path to bolt.toml (default: ./bolt.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List directories and their resources
    List(list::ListArgs),

    /// Print the structured fields of a resource
    Describe(describe::DescribeArgs),

    /// Hex dump of a decoded resource
    Dump(dump::DumpArgs),

    /// Write a resource to disk (PNG for images, WAV for sounds)
    Extract(extract::ExtractArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let config = BoltConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::List(args) => list::execute(args),
        Commands::Describe(args) => describe::execute(args),
        Commands::Dump(args) => dump::execute(args),
        Commands::Extract(args) => extract::execute(args, &config),
    }
}

/// Open an archive file and read its index
pub(crate) fn open_archive(path: &Path) -> Result<Archive<BufReader<File>>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open archive: {}", path.display()))?;
    let archive = Archive::open(BufReader::new(file))
        .with_context(|| format!("Failed to read archive: {}", path.display()))?;
    tracing::debug!(
        "{}: {} directories",
        path.display(),
        archive.num_directories()
    );
    Ok(archive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract() {
        let cli = Cli::try_parse_from([
            "bolt", "extract", "A.BLT", "9d02", "--palette", "0x9D01", "-o", "x.png", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.id, bolt_archive::ResourceId(0x9D02));
        assert_eq!(args.palette, Some(bolt_archive::ResourceId(0x9D01)));
        assert_eq!(args.output, Some(PathBuf::from("x.png")));
        assert!(!args.raw);
    }

    #[test]
    fn test_parse_rejects_bad_id() {
        assert!(Cli::try_parse_from(["bolt", "dump", "A.BLT", "12345"]).is_err());
    }

    #[test]
    fn test_open_missing_archive() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_archive(&dir.path().join("missing.BLT")).is_err());
    }
}
