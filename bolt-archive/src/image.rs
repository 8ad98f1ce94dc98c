//! Image resources (type 8)
//!
//! # Layout
//! ```text
//! 0x00: compression u8 (0 = CLUT7, 1 = RL7)
//! 0x06: x offset    i16 BE
//! 0x08: y offset    i16 BE
//! 0x0A: width       u16 BE
//! 0x0C: height      u16 BE
//! 0x18: pixel data
//! ```
//!
//! CLUT7 data is one palette index per pixel, row-major. RL7 data is
//! decoded with [`crate::rl7::decode_rl7`].

use crate::error::{BoltError, Result};
use crate::palette::Palette;
use crate::pixels::indexed_to_rgba;
use crate::rl7::decode_rl7;
use crate::schema::{NameTable, read_i16, read_u8, read_u16};

/// Offset of the pixel data
pub const IMAGE_HEADER_SIZE: usize = 0x18;

/// Display names of the image compression codes
pub const IMAGE_COMPRESSION_NAMES: NameTable = &[(0, "CLUT7"), (1, "RL7")];

/// Pixel encoding of an image resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageCompression {
    /// Uncompressed 7-bit indices
    Clut7,
    /// Run-length encoded 7-bit indices
    Rl7,
}

impl ImageCompression {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ImageCompression::Clut7),
            1 => Some(ImageCompression::Rl7),
            _ => None,
        }
    }
}

/// Fixed image header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub compression: u8,
    pub offset_x: i16,
    pub offset_y: i16,
    pub width: u16,
    pub height: u16,
}

impl ImageHeader {
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < IMAGE_HEADER_SIZE {
            return Err(BoltError::Truncated {
                offset: 0,
                len: IMAGE_HEADER_SIZE,
                size: data.len(),
            });
        }
        Ok(Self {
            compression: read_u8(data, 0)?,
            offset_x: read_i16(data, 6)?,
            offset_y: read_i16(data, 8)?,
            width: read_u16(data, 0xA)?,
            height: read_u16(data, 0xC)?,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Image resource borrowing its decoded bytes
#[derive(Debug, Clone, Copy)]
pub struct Image<'a> {
    pub header: ImageHeader,
    data: &'a [u8],
}

impl<'a> Image<'a> {
    /// # Errors
    /// [`BoltError::Truncated`] if `data` is shorter than the 0x18-byte header
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        Ok(Self {
            header: ImageHeader::parse(data)?,
            data: &data[IMAGE_HEADER_SIZE..],
        })
    }

    pub fn width(&self) -> u32 {
        self.header.width as u32
    }

    pub fn height(&self) -> u32 {
        self.header.height as u32
    }

    /// Position of the image's top-left corner on its plane
    pub fn offset(&self) -> (i16, i16) {
        (self.header.offset_x, self.header.offset_y)
    }

    /// `width * height` palette indices.
    ///
    /// # Errors
    /// [`BoltError::UnsupportedCompression`] for compression codes other than
    /// CLUT7 and RL7
    pub fn indices(&self) -> Result<Vec<u8>> {
        let (w, h) = (self.header.width as usize, self.header.height as usize);
        match ImageCompression::from_code(self.header.compression) {
            Some(ImageCompression::Clut7) => {
                let mut out = vec![0u8; w * h];
                let n = out.len().min(self.data.len());
                if n < out.len() {
                    tracing::warn!(
                        expected = out.len(),
                        available = self.data.len(),
                        "CLUT7 image data is short"
                    );
                }
                out[..n].copy_from_slice(&self.data[..n]);
                Ok(out)
            }
            Some(ImageCompression::Rl7) => Ok(decode_rl7(self.data, w, h)),
            None => Err(BoltError::UnsupportedCompression(self.header.compression)),
        }
    }

    /// Packed RGBA pixels (4 bytes per pixel, row-major).
    pub fn to_rgba(&self, palette: &Palette) -> Result<Vec<u8>> {
        indexed_to_rgba(&self.indices()?, palette)
    }
}
