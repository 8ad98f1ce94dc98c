//! BOLT container reader
//!
//! # Layout (all integers big-endian)
//! ```text
//! Header (16 bytes)
//!   0x00: magic "BOLT"
//!   0x04: 7 reserved bytes
//!   0x0B: directory count u8
//!   0x0C: file size u32
//! Directory summaries (16 bytes each, right after the header)
//!   resource count u32, compBufSize u32, resource table offset u32, reserved u32
//! Resource records (16 bytes each, contiguous per table)
//!   compression u8 + type u24, size u32, payload offset u32, reserved u32
//! ```
//!
//! The index is read once by [`Archive::open`] and never changes afterwards.
//! Payloads are read and decompressed on demand; nothing is cached.

mod read;

#[cfg(test)]
mod tests;

pub use read::{ArchiveHeader, DirectoryEntry, ResourceRecord};

use std::io::{Read, Seek, SeekFrom};

use serde::Serialize;

use crate::error::{BoltError, Result};
use crate::ids::ResourceId;
use crate::lz;
use crate::{COMPRESSION_BOLT_LZ, COMPRESSION_RAW};

/// Parsed archive index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveIndex {
    pub header: ArchiveHeader,
    pub directories: Vec<DirectoryEntry>,
}

impl ArchiveIndex {
    /// Read and validate the header, directory summaries and resource tables.
    ///
    /// # Errors
    /// - [`BoltError::Format`] for a bad magic, a size field that does not
    ///   match the source length, or tables running past the end of the source
    /// - [`BoltError::Io`] if the source fails
    pub fn read<R: Read + Seek>(source: &mut R) -> Result<Self> {
        let actual_size = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(0))?;

        let header = ArchiveHeader::read(source)?;
        if header.file_size as u64 != actual_size {
            return Err(BoltError::Format(format!(
                "file size field is {} but file is {} bytes",
                header.file_size, actual_size
            )));
        }

        let directories = (0..header.num_directories)
            .map(|_| DirectoryEntry::read(source))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            directories = directories.len(),
            resources = directories.iter().map(|d| d.resources.len()).sum::<usize>(),
            size = actual_size,
            "opened BOLT archive"
        );

        Ok(Self {
            header,
            directories,
        })
    }

    /// Directory and record for `id`.
    ///
    /// # Errors
    /// [`BoltError::OutOfRange`] if either half of the id is past its table
    pub fn record(&self, id: ResourceId) -> Result<(&DirectoryEntry, &ResourceRecord)> {
        let dir_num = id.directory() as usize;
        let res_num = id.resource() as usize;

        let dir = self
            .directories
            .get(dir_num)
            .ok_or_else(|| BoltError::out_of_range("directory", dir_num, self.directories.len()))?;
        let record = dir
            .resources
            .get(res_num)
            .ok_or_else(|| BoltError::out_of_range("resource", res_num, dir.resources.len()))?;

        Ok((dir, record))
    }
}

/// Listing entry for one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceSummary {
    pub id: ResourceId,
    pub type_code: u32,
    pub compression: u8,
    pub size: u32,
}

/// Listing of one directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorySummary {
    pub index: u8,
    pub resources: Vec<ResourceSummary>,
}

/// Decoded resource payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedResource {
    pub id: ResourceId,
    pub type_code: u32,
    /// Exactly the record's declared size
    pub data: Vec<u8>,
}

/// An open archive: the index plus the byte source it was read from
#[derive(Debug)]
pub struct Archive<R> {
    source: R,
    index: ArchiveIndex,
}

impl<R: Read + Seek> Archive<R> {
    /// Parse the archive index from `source`.
    ///
    /// On failure nothing is returned, so an archive held elsewhere by the
    /// caller stays in place until a new one opens successfully.
    pub fn open(mut source: R) -> Result<Self> {
        let index = ArchiveIndex::read(&mut source)?;
        Ok(Self { source, index })
    }

    pub fn index(&self) -> &ArchiveIndex {
        &self.index
    }

    pub fn num_directories(&self) -> usize {
        self.index.directories.len()
    }

    /// Give the byte source back
    pub fn into_inner(self) -> R {
        self.source
    }

    /// See [`ArchiveIndex::record`]
    pub fn record(&self, id: ResourceId) -> Result<(&DirectoryEntry, &ResourceRecord)> {
        self.index.record(id)
    }

    /// Every directory in file order with the type of each resource.
    ///
    /// Resources past index 255 cannot be addressed by a resource id and are
    /// left out.
    pub fn list_directories(&self) -> Vec<DirectorySummary> {
        self.index
            .directories
            .iter()
            .enumerate()
            .map(|(dir_num, dir)| DirectorySummary {
                index: dir_num as u8,
                resources: dir
                    .resources
                    .iter()
                    .take(256)
                    .enumerate()
                    .map(|(res_num, rec)| ResourceSummary {
                        id: ResourceId::new(dir_num as u8, res_num as u8),
                        type_code: rec.type_code,
                        compression: rec.compression,
                        size: rec.size,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Read and decompress one resource.
    ///
    /// # Errors
    /// - [`BoltError::OutOfRange`] for ids outside the index
    /// - [`BoltError::UnsupportedCompression`] for codes other than 0 and 8
    /// - [`BoltError::CorruptStream`] for undecodable BOLT-LZ payloads
    /// - [`BoltError::Format`] when a raw payload runs past the end of the file
    pub fn decode(&mut self, id: ResourceId) -> Result<DecodedResource> {
        let (dir, record) = self.index.record(id)?;
        let record = *record;
        let comp_buf_size = dir.comp_buf_size;

        if record.compression != COMPRESSION_BOLT_LZ && record.compression != COMPRESSION_RAW {
            return Err(BoltError::UnsupportedCompression(record.compression));
        }

        self.source.seek(SeekFrom::Start(record.position as u64))?;
        let size = record.size as usize;

        let file_size = self.index.header.file_size as u64;
        let data = if record.compression == COMPRESSION_BOLT_LZ {
            let mut compressed = Vec::with_capacity((comp_buf_size as u64).min(file_size) as usize);
            (&mut self.source)
                .take(comp_buf_size as u64)
                .read_to_end(&mut compressed)?;
            if compressed.len() < comp_buf_size as usize {
                tracing::warn!(
                    %id,
                    read = compressed.len(),
                    comp_buf_size,
                    "compressed payload cut short by end of file"
                );
            }
            lz::decompress(&compressed, size)?
        } else {
            if record.position as u64 + record.size as u64 > file_size {
                return Err(BoltError::Format(format!(
                    "resource {id} runs past end of file"
                )));
            }
            let mut raw = vec![0u8; size];
            read::read_exact(&mut self.source, &mut raw)?;
            raw
        };

        tracing::debug!(
            %id,
            type_code = record.type_code,
            compression = record.compression,
            size,
            "decoded resource"
        );

        Ok(DecodedResource {
            id,
            type_code: record.type_code,
            data,
        })
    }

    /// Decode a resource that must have type `expected`.
    ///
    /// # Errors
    /// [`BoltError::TypeMismatch`] if the record has another type; the payload
    /// is not read in that case
    pub fn decode_typed(&mut self, id: ResourceId, expected: u32) -> Result<DecodedResource> {
        let (_, record) = self.index.record(id)?;
        if record.type_code != expected {
            return Err(BoltError::TypeMismatch {
                id,
                expected,
                actual: record.type_code,
            });
        }
        self.decode(id)
    }
}
