//! BOLT-LZ decompression
//!
//! BOLT-LZ is a byte-oriented LZ variant. Each operation starts with a
//! control byte split into three fields:
//!
//! ```text
//! bit:  7 6 | 5    | 4 3 2 1 0
//!       comp| flag | num
//! ```
//!
//! | comp | flag | operation                                                    |
//! |------|------|--------------------------------------------------------------|
//! | 0    | any  | copy `31 - num` literal bytes                                |
//! | 1    | any  | copy `35 - num` bytes from `b + 256*flag` back               |
//! | 2    | any  | copy `(32 - num)*4 + 2*flag` bytes from `b*2` back           |
//! | 3    | 1    | no-op (end marker)                                           |
//! | 3    | 0    | fill `(32 - num + 32*hi)*4` bytes with a constant            |
//!
//! Back-references may overlap the bytes they produce, so they are always
//! copied one byte at a time.

use crate::error::{BoltError, Result};

/// Decompress a BOLT-LZ stream into exactly `size` bytes.
///
/// The stream carries no length of its own; decoding stops once `size`
/// bytes have been produced. Trailing input is ignored, which is normal since
/// the archive reader hands over a directory-wide `compBufSize` read.
///
/// Operations whose count runs past `size` are clipped at `size`.
///
/// # Errors
/// - [`BoltError::CorruptStream`] when the input runs out, a back-reference
///   has offset zero, or a back-reference reaches before the first output byte
pub fn decompress(src: &[u8], size: usize) -> Result<Vec<u8>> {
    let mut dst = vec![0u8; size];
    let mut input = Input { src, pos: 0 };
    let mut out = 0usize;

    while out < size {
        let control = input.byte()?;
        let comp = control >> 6;
        let flag = (control >> 5) & 1 != 0;
        let num = (control & 0x1F) as usize;

        match (comp, flag) {
            (0, _) => {
                // Raw bytes. num == 31 gives a zero-length copy.
                let count = 31 - num;
                let literal = input.bytes(count)?;
                let n = count.min(size - out);
                dst[out..out + n].copy_from_slice(&literal[..n]);
                out += n;
            }
            (1, _) => {
                let count = 35 - num;
                let offset = input.byte()? as usize + if flag { 256 } else { 0 };
                out = copy_back(&mut dst, out, offset, count, input.pos)?;
            }
            (2, _) => {
                let count = (32 - num) * 4 + if flag { 2 } else { 0 };
                let offset = input.byte()? as usize * 2;
                out = copy_back(&mut dst, out, offset, count, input.pos)?;
            }
            (3, true) => {
                // End marker. The loop condition already stops at `size`, and
                // streams carry this control before their end.
            }
            (3, false) => {
                let hi = input.byte()? as usize;
                let count = (32 - num + 32 * hi) * 4;
                let _reserved = input.byte()?;
                let fill = input.byte()?;
                let n = count.min(size - out);
                dst[out..out + n].fill(fill);
                out += n;
            }
            _ => return Err(BoltError::corrupt(input.pos - 1, "invalid control byte")),
        }
    }

    Ok(dst)
}

/// Copy `count` bytes from `offset` bytes behind `out`, byte by byte.
///
/// Later bytes may read earlier bytes of the same copy when `offset < count`.
fn copy_back(dst: &mut [u8], out: usize, offset: usize, count: usize, at: usize) -> Result<usize> {
    if offset == 0 {
        return Err(BoltError::corrupt(at, "zero back-reference offset"));
    }
    if offset > out {
        return Err(BoltError::corrupt(at, "back-reference before start of output"));
    }

    let end = (out + count).min(dst.len());
    for i in out..end {
        dst[i] = dst[i - offset];
    }
    Ok(end)
}

struct Input<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Input<'a> {
    fn byte(&mut self) -> Result<u8> {
        let b = *self
            .src
            .get(self.pos)
            .ok_or_else(|| BoltError::corrupt(self.pos, "unexpected end of input"))?;
        self.pos += 1;
        Ok(b)
    }

    fn bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let slice = self
            .src
            .get(self.pos..self.pos + count)
            .ok_or_else(|| BoltError::corrupt(self.pos, "unexpected end of input"))?;
        self.pos += count;
        Ok(slice)
    }
}
