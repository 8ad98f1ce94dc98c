//! Describe command - print the structured fields of one resource

use anyhow::Result;
use bolt_archive::{Description, ResourceId, describe_resource};
use clap::Args;
use std::path::PathBuf;

use crate::open_archive;

/// Arguments for the describe command
#[derive(Args)]
pub struct DescribeArgs {
    /// BOLT archive (.BLT)
    pub archive: PathBuf,

    /// Resource id, four hex digits (e.g. 9D01)
    pub id: ResourceId,

    /// Print the fields as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the describe command
pub fn execute(args: DescribeArgs) -> Result<()> {
    let mut archive = open_archive(&args.archive)?;
    let resource = archive.decode(args.id)?;

    let desc = describe_resource(resource.type_code, &resource.data)?;
    print!(
        "{}",
        render(
            args.id,
            resource.type_code,
            resource.data.len(),
            desc.as_ref(),
            args.json
        )?
    );
    Ok(())
}

/// Text or JSON output. Types without a layout still produce output, a
/// `{ "type", "size" }` object in JSON mode.
fn render(
    id: ResourceId,
    type_code: u32,
    size: usize,
    desc: Option<&Description>,
    json: bool,
) -> Result<String> {
    Ok(match (desc, json) {
        (Some(desc), true) => serde_json::to_string_pretty(desc)? + "\n",
        (Some(desc), false) => format_description(id, desc),
        (None, true) => {
            let stub = serde_json::json!({ "type": type_code, "size": size });
            serde_json::to_string_pretty(&stub)? + "\n"
        }
        (None, false) => format!("{id}: type {type_code} has no known layout ({size} bytes)\n"),
    })
}

fn format_description(id: ResourceId, desc: &Description) -> String {
    let entries = desc.entries();
    let width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    let mut out = format!("{id}: {}\n", desc.title);
    for (name, value) in entries {
        out.push_str(&format!("  {name:<width$}  {value}\n"));
    }
    out
}
