//! bolt-archive: decoder for BOLT game-resource archives
//!
//! A BOLT archive (`.BLT`) holds up to 255 directories of up to 256 typed
//! resources each: images, sounds, palettes and UI layout records. Each
//! resource is stored raw or BOLT-LZ compressed.
//!
//! # Key Features
//!
//! - **Index once, decode on demand**: [`Archive::open`] reads the directory
//!   and resource tables; [`Archive::decode`] seeks and decompresses one payload
//! - **Byte-exact codecs**: BOLT-LZ ([`lz`]) and RL7 image runs ([`rl7`])
//! - **Typed schemas**: two dozen resource types described field by field ([`schema`])
//! - **Explicit palette state**: the active [`Palette`] is a value owned by the
//!   caller, updated by palette resources and read by image conversion
//!
//! # Usage
//!
//! ```ignore
//! use bolt_archive::{Archive, Palette, ResourceId, view_resource};
//!
//! let file = std::fs::File::open("MERLIN.BLT")?;
//! let mut archive = Archive::open(std::io::BufReader::new(file))?;
//! let mut palette = Palette::default();
//!
//! for dir in archive.list_directories() {
//!     for res in &dir.resources {
//!         println!("{} type {}", res.id, res.type_code);
//!     }
//! }
//!
//! let res = archive.decode(ResourceId(0x9901))?;
//! let view = view_resource(res.type_code, &res.data, &mut palette)?;
//! ```

pub mod archive;
mod error;
mod ids;
pub mod image;
pub mod lz;
pub mod palette;
pub mod pixels;
pub mod rl7;
pub mod schema;
pub mod sound;
mod view;

pub use archive::{
    Archive, ArchiveHeader, ArchiveIndex, DecodedResource, DirectoryEntry, DirectorySummary,
    ResourceRecord, ResourceSummary,
};
pub use error::{BoltError, Result};
pub use ids::{BltId, ResourceId};
pub use image::{Image, ImageCompression, ImageHeader};
pub use palette::{Palette, PaletteUpdate, Rgba};
pub use pixels::indexed_to_rgba;
pub use rl7::decode_rl7;
pub use schema::{Description, ResourceType, describe_resource};
pub use sound::{SOUND_SAMPLE_RATE, Sound};
pub use view::{ResourceView, view_resource};

// =============================================================================
// Container Constants
// =============================================================================

/// Archive magic
pub const BOLT_MAGIC: &[u8; 4] = b"BOLT";

/// Unknown bytes between the magic and the directory count
pub const RESERVED_HEADER_BYTES: usize = 7;

/// Size of the archive header
pub const HEADER_SIZE: usize = 16;

/// Size of one directory summary
pub const DIRECTORY_ENTRY_SIZE: usize = 16;

/// Size of one resource record
pub const RESOURCE_RECORD_SIZE: usize = 16;

/// Compression code for BOLT-LZ payloads
pub const COMPRESSION_BOLT_LZ: u8 = 0;

/// Compression code for uncompressed payloads
pub const COMPRESSION_RAW: u8 = 8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_constants() {
        assert_eq!(BOLT_MAGIC.len() + RESERVED_HEADER_BYTES + 1 + 4, HEADER_SIZE);
        assert_eq!(DIRECTORY_ENTRY_SIZE, 4 * 4);
        assert_eq!(RESOURCE_RECORD_SIZE, 4 * 4);
    }
}
