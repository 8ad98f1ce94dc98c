//! List command - print every directory and its resources

use anyhow::Result;
use bolt_archive::{COMPRESSION_BOLT_LZ, COMPRESSION_RAW, DirectorySummary, ResourceType};
use clap::Args;
use std::path::PathBuf;

use crate::open_archive;

/// Arguments for the list command
#[derive(Args)]
pub struct ListArgs {
    /// BOLT archive (.BLT)
    pub archive: PathBuf,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the list command
pub fn execute(args: ListArgs) -> Result<()> {
    let archive = open_archive(&args.archive)?;
    let listing = archive.list_directories();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    print!("{}", format_listing(&listing));
    Ok(())
}

fn format_listing(listing: &[DirectorySummary]) -> String {
    let mut out = String::new();
    for dir in listing {
        let count = dir.resources.len();
        let noun = if count == 1 { "resource" } else { "resources" };
        out.push_str(&format!("Directory {:02X} ({count} {noun})\n", dir.index));
        for res in &dir.resources {
            let type_name = ResourceType::from_code(res.type_code)
                .map(ResourceType::title)
                .unwrap_or("-");
            out.push_str(&format!(
                "  {}  {:>4}  {:<28}  {:<7}  {} bytes\n",
                res.id,
                res.type_code,
                type_name,
                compression_name(res.compression),
                res.size
            ));
        }
    }
    out
}

fn compression_name(code: u8) -> String {
    match code {
        COMPRESSION_BOLT_LZ => "BOLT-LZ".to_string(),
        COMPRESSION_RAW => "raw".to_string(),
        other => format!("comp {other}"),
    }
}
