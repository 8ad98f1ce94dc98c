//! Extract command - write a resource to disk
//!
//! Images become PNG files and sounds become WAV files. Everything else, or
//! anything when `--raw` is given, is written as the decoded bytes.

use anyhow::{Context, Result};
use bolt_archive::{Palette, ResourceId, ResourceType, ResourceView, Sound, view_resource};
use clap::Args;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use crate::config::BoltConfig;
use crate::open_archive;

/// Arguments for the extract command
#[derive(Args)]
pub struct ExtractArgs {
    /// BOLT archive (.BLT)
    pub archive: PathBuf,

    /// Resource id, four hex digits (e.g. 9D01)
    pub id: ResourceId,

    /// Output file (default: <output_dir>/<id>.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Palette resource applied before converting images (overrides bolt.toml)
    #[arg(short, long)]
    pub palette: Option<ResourceId>,

    /// Write the decoded bytes without conversion
    #[arg(long)]
    pub raw: bool,
}

/// Execute the extract command
pub fn execute(args: ExtractArgs, config: &BoltConfig) -> Result<()> {
    let mut archive = open_archive(&args.archive)?;

    let mut palette = Palette::default();
    if let Some(palette_id) = args.palette.or(config.palette()?) {
        load_palette(&mut archive, palette_id, &mut palette)?;
    }

    let resource = archive.decode(args.id)?;
    let view = if args.raw {
        ResourceView::Raw
    } else {
        view_resource(resource.type_code, &resource.data, &mut palette)?
    };

    let ext = match &view {
        ResourceView::Image { .. } => "png",
        ResourceView::Sound { .. } => "wav",
        _ => "bin",
    };
    let output = args
        .output
        .unwrap_or_else(|| config.output_dir.join(format!("{}.{ext}", args.id)));
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    match view {
        ResourceView::Image { image, rgba, .. } => {
            write_png(&output, image.width(), image.height(), rgba)?;
        }
        ResourceView::Sound { sound, .. } => {
            write_wav(&output, &sound, config.sample_rate)?;
        }
        _ => {
            std::fs::write(&output, &resource.data)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }
    }

    tracing::info!("{} -> {}", args.id, output.display());
    Ok(())
}

/// Decode a palette resource and make it the active palette
fn load_palette<R: Read + Seek>(
    archive: &mut bolt_archive::Archive<R>,
    id: ResourceId,
    palette: &mut Palette,
) -> Result<()> {
    let resource = archive
        .decode_typed(id, ResourceType::Palette.code())
        .with_context(|| format!("Failed to load palette {id}"))?;
    view_resource(resource.type_code, &resource.data, palette)?;
    tracing::debug!("applied palette {id}");
    Ok(())
}

/// Save packed RGBA pixels as a PNG
pub fn write_png(path: &Path, width: u32, height: u32, rgba: Vec<u8>) -> Result<()> {
    let img = image::RgbaImage::from_raw(width, height, rgba)
        .context("Pixel buffer does not match image size")?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Save a sound as 16-bit mono WAV
pub fn write_wav(path: &Path, sound: &Sound<'_>, sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for sample in sound.to_i16() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let rgba = vec![255, 0, 0, 255, 0, 255, 0, 255];
        write_png(&path, 2, 1, rgba).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(1, 0), &image::Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_write_png_size_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.png");
        assert!(write_png(&path, 4, 4, vec![0; 8]).is_err());
    }

    #[test]
    fn test_write_wav() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let data = [0u8, 128, 255];
        write_wav(&path, &Sound::new(&data), 22050).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 22050);
        assert_eq!(reader.spec().channels, 1);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![-32768, 0, 32512]);
    }
}
