//! Colour palettes
//!
//! The active palette is a 256-entry RGBA table. It starts out as a fixed
//! 4x8x4 colour cube and is replaced wholesale each time a palette resource
//! (type 10) is applied. The palette is plain data owned by the caller; it
//! is passed explicitly to pixel conversion and to palette updates.
//!
//! # Palette resource layout
//! ```text
//! 0x00: plane       u16 BE
//! 0x02: start index u16 BE
//! 0x04: end index   u16 BE (exclusive)
//! 0x06: RGB triples, indexed by absolute colour index (entry i at 6 + 3*i)
//! ```

use serde::Serialize;

use crate::error::{BoltError, Result};
use crate::schema::read_u16;

/// Number of entries in a palette
pub const PALETTE_SIZE: usize = 256;

/// Size of the palette resource header
pub const PALETTE_HEADER_SIZE: usize = 6;

/// One palette colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Packed as `0xRRGGBBAA`
    pub fn packed(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// 256-entry colour lookup table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgba; PALETTE_SIZE],
}

impl Default for Palette {
    /// 4 red levels x 8 green levels x 4 blue levels, fully opaque. Entries
    /// past the cube are opaque black.
    fn default() -> Self {
        let mut colors = [Rgba::rgb(0, 0, 0); PALETTE_SIZE];
        for r in 0..4u32 {
            for g in 0..8u32 {
                for b in 0..4u32 {
                    let i = (32 * r + 4 * g + b) as usize;
                    colors[i] = Rgba::rgb(
                        (r * 255 / 3) as u8,
                        (g * 255 / 7) as u8,
                        (b * 255 / 3) as u8,
                    );
                }
            }
        }
        Self { colors }
    }
}

impl Palette {
    /// Palette with every entry transparent black
    pub fn empty() -> Self {
        Self {
            colors: [Rgba::default(); PALETTE_SIZE],
        }
    }

    /// Look up a colour.
    ///
    /// # Errors
    /// [`BoltError::OutOfRange`] for indices of 256 and above
    pub fn get(&self, index: usize) -> Result<Rgba> {
        self.colors
            .get(index)
            .copied()
            .ok_or_else(|| BoltError::out_of_range("palette index", index, PALETTE_SIZE))
    }

    pub fn colors(&self) -> &[Rgba; PALETTE_SIZE] {
        &self.colors
    }

    /// Replace the whole palette with the one described by `update`.
    ///
    /// Entries outside the update's range become transparent black, and
    /// colours that would land past entry 255 are dropped.
    pub fn apply(&mut self, update: &PaletteUpdate) {
        let mut colors = [Rgba::default(); PALETTE_SIZE];
        let start = update.start as usize;
        for (slot, color) in colors.iter_mut().skip(start).zip(&update.colors) {
            *slot = *color;
        }
        self.colors = colors;
    }
}

/// Parsed palette resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteUpdate {
    pub plane: u16,
    pub start: u16,
    pub end: u16,
    /// Colours for entries `start..start + colors.len()`
    pub colors: Vec<Rgba>,
}

impl PaletteUpdate {
    /// Parse a palette resource without touching any palette.
    ///
    /// The end index is clamped to 256 and to the triples actually present.
    ///
    /// # Errors
    /// [`BoltError::Truncated`] if the 6-byte header is incomplete
    pub fn parse(data: &[u8]) -> Result<Self> {
        let plane = read_u16(data, 0)?;
        let start = read_u16(data, 2)?;
        let end = read_u16(data, 4)?;

        let available = (data.len() - PALETTE_HEADER_SIZE) / 3;
        let last = (end as usize).min(PALETTE_SIZE).min(available);
        if last < end as usize {
            tracing::warn!(
                start,
                end,
                available,
                "palette range exceeds table, clamping to {}",
                last
            );
        }

        let colors = (start as usize..last.max(start as usize))
            .map(|i| {
                let at = PALETTE_HEADER_SIZE + 3 * i;
                Rgba::rgb(data[at], data[at + 1], data[at + 2])
            })
            .collect();

        Ok(Self {
            plane,
            start,
            end,
            colors,
        })
    }
}
