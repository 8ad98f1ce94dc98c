//! Container index parsing

use std::io::{self, Read, Seek, SeekFrom};

use crate::error::{BoltError, Result};
use crate::{BOLT_MAGIC, RESERVED_HEADER_BYTES};

/// Fixed archive header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
    pub num_directories: u8,
    /// Declared total file size, checked against the source length
    pub file_size: u32,
}

/// One directory and its resource table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub num_resources: u32,
    /// Bytes read from a payload offset before BOLT-LZ decompression
    pub comp_buf_size: u32,
    /// Absolute offset of the resource table
    pub position: u32,
    pub resources: Vec<ResourceRecord>,
}

/// One resource table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRecord {
    /// 24-bit type code
    pub type_code: u32,
    pub compression: u8,
    /// Decompressed size in bytes
    pub size: u32,
    /// Absolute payload offset
    pub position: u32,
}

impl ArchiveHeader {
    pub fn read<R: Read>(r: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        read_exact(r, &mut magic)?;
        if &magic != BOLT_MAGIC {
            return Err(BoltError::Format("invalid file identifier".into()));
        }

        let mut reserved = [0u8; RESERVED_HEADER_BYTES];
        read_exact(r, &mut reserved)?;

        let num_directories = read_u8(r)?;
        let file_size = read_u32(r)?;

        Ok(Self {
            num_directories,
            file_size,
        })
    }
}

impl DirectoryEntry {
    /// Read a 16-byte directory summary and then its resource table.
    ///
    /// The table may live anywhere in the file; the reader is left just past
    /// the summary so the next one can follow.
    pub fn read<R: Read + Seek>(r: &mut R) -> Result<Self> {
        let num_resources = read_u32(r)?;
        let comp_buf_size = read_u32(r)?;
        let position = read_u32(r)?;
        let _reserved = read_u32(r)?;

        let resume = r.stream_position()?;
        r.seek(SeekFrom::Start(position as u64))?;

        // Counts are untrusted; only the first 256 resources are addressable anyway
        let mut resources = Vec::with_capacity(num_resources.min(256) as usize);
        for _ in 0..num_resources {
            resources.push(ResourceRecord::read(r)?);
        }
        r.seek(SeekFrom::Start(resume))?;

        tracing::trace!(
            num_resources,
            comp_buf_size,
            position,
            "read directory resource table"
        );

        Ok(Self {
            num_resources,
            comp_buf_size,
            position,
            resources,
        })
    }
}

impl ResourceRecord {
    pub fn read<R: Read>(r: &mut R) -> Result<Self> {
        let packed = read_u32(r)?;
        let size = read_u32(r)?;
        let position = read_u32(r)?;
        // Probably a checksum, never verified
        let _reserved = read_u32(r)?;

        Ok(Self {
            type_code: packed & 0x00FF_FFFF,
            compression: (packed >> 24) as u8,
            size,
            position,
        })
    }
}

pub(crate) fn read_exact<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<()> {
    r.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => BoltError::Format("unexpected end of archive".into()),
        _ => BoltError::Io(e),
    })
}

pub(crate) fn read_u8<R: Read>(r: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    read_exact(r, &mut buf)?;
    Ok(buf[0])
}

pub(crate) fn read_u32<R: Read>(r: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    read_exact(r, &mut buf)?;
    Ok(u32::from_be_bytes(buf))
}
