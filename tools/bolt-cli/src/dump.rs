//! Dump command - hex dump of a decoded resource

use anyhow::Result;
use bolt_archive::ResourceId;
use clap::Args;
use std::path::PathBuf;

use crate::open_archive;

const BYTES_PER_LINE: usize = 16;

/// Arguments for the dump command
#[derive(Args)]
pub struct DumpArgs {
    /// BOLT archive (.BLT)
    pub archive: PathBuf,

    /// Resource id, four hex digits (e.g. 9D01)
    pub id: ResourceId,
}

/// Execute the dump command
pub fn execute(args: DumpArgs) -> Result<()> {
    let mut archive = open_archive(&args.archive)?;
    let resource = archive.decode(args.id)?;
    print!("{}", hex_dump(&resource.data));
    Ok(())
}

/// `OFFSET  XX XX ...` lines of 16 bytes each
pub fn hex_dump(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3 + data.len() / BYTES_PER_LINE * 10);
    for (line, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        out.push_str(&format!("{:08X} ", line * BYTES_PER_LINE));
        for byte in chunk {
            out.push_str(&format!(" {byte:02X}"));
        }
        out.push('\n');
    }
    out
}
