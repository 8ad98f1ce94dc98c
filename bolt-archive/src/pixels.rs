//! Indexed-to-RGBA conversion

use crate::error::Result;
use crate::palette::Palette;

/// Map each palette index to its colour, 4 bytes (`R G B A`) per pixel.
///
/// No blending is done; the palette's alpha is copied as is.
///
/// # Errors
/// [`crate::BoltError::OutOfRange`] if an index has no palette entry
pub fn indexed_to_rgba(indices: &[u8], palette: &Palette) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(indices.len() * 4);
    for &index in indices {
        out.extend_from_slice(&palette.get(index as usize)?.to_bytes());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{PaletteUpdate, Rgba};

    #[test]
    fn test_converts_each_index() {
        let palette = Palette::default();
        let out = indexed_to_rgba(&[0, 3, 127], &palette).unwrap();
        assert_eq!(out.len(), 12);
        assert_eq!(&out[0..4], &[0, 0, 0, 255]);
        assert_eq!(&out[4..8], &[0, 0, 255, 255]);
        assert_eq!(&out[8..12], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_empty() {
        assert!(indexed_to_rgba(&[], &Palette::default()).unwrap().is_empty());
    }

    #[test]
    fn test_after_palette_update() {
        let mut data = vec![0, 0, 0, 0, 0, 2];
        data.extend([255, 0, 0, 0, 255, 0]);
        let mut palette = Palette::default();
        palette.apply(&PaletteUpdate::parse(&data).unwrap());

        let out = indexed_to_rgba(&[1, 0], &palette).unwrap();
        assert_eq!(&out[0..4], &Rgba::new(0, 255, 0, 255).to_bytes());
        assert_eq!(&out[4..8], &Rgba::new(255, 0, 0, 255).to_bytes());
    }
}
