//! BOLT decoding error types

use thiserror::Error;

/// Errors produced while opening an archive or decoding one of its resources.
///
/// Every error is terminal for the operation that produced it. A failed
/// decode never touches the archive index or the active palette.
#[derive(Debug, Error)]
pub enum BoltError {
    /// Bad magic, size field mismatch or an otherwise malformed container
    #[error("Invalid BOLT archive: {0}")]
    Format(String),

    /// Directory, resource or palette index outside its table
    #[error("{what} {index} out of range (limit {limit})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        limit: usize,
    },

    /// Compression code other than BOLT-LZ (0) or raw (8)
    #[error("Unsupported compression type {0}")]
    UnsupportedCompression(u8),

    /// BOLT-LZ stream that cannot be decoded
    #[error("Corrupt BOLT-LZ stream at input offset {offset}: {reason}")]
    CorruptStream { offset: usize, reason: &'static str },

    /// Unknown field type tag
    #[error("Unknown field type '{0}'")]
    Schema(String),

    /// Read of `len` bytes at `offset` past the end of a buffer of `size` bytes
    #[error("Read of {len} bytes at offset 0x{offset:X} exceeds buffer of {size} bytes")]
    Truncated {
        offset: usize,
        len: usize,
        size: usize,
    },

    /// Typed load found a different resource type code
    #[error("Resource {id} has type {actual}, expected {expected}")]
    TypeMismatch {
        id: crate::ResourceId,
        expected: u32,
        actual: u32,
    },

    /// Failure of the underlying byte source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BoltError>;

impl BoltError {
    pub(crate) fn out_of_range(what: &'static str, index: usize, limit: usize) -> Self {
        BoltError::OutOfRange { what, index, limit }
    }

    pub(crate) fn corrupt(offset: usize, reason: &'static str) -> Self {
        BoltError::CorruptStream { offset, reason }
    }
}
