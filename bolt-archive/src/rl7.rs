//! RL7 run-length image decoding
//!
//! Each input byte carries a 7-bit palette index. When the top bit is set a
//! run-length byte follows. A run length of zero fills the rest of the line
//! and moves to the next one; every line ends this way, even a full one.

/// Decode an RL7 stream into a `width * height` buffer of palette indices.
///
/// Truncated or malformed streams stop decoding early and leave the rest of
/// the buffer zeroed. Runs that overflow a line continue into the next one,
/// and writes past the end of the buffer are dropped.
pub fn decode_rl7(src: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut dst = vec![0u8; width * height];
    let mut input = src.iter().copied();
    let mut x = 0usize;
    let mut y = 0usize;

    while y < height {
        let Some(byte) = input.next() else {
            break;
        };
        let color = byte & 0x7F;

        if byte & 0x80 == 0 {
            if let Some(px) = dst.get_mut(y * width + x) {
                *px = color;
            }
            x += 1;
            continue;
        }

        let Some(length) = input.next() else {
            break;
        };

        if length == 0 {
            // End of line: fill to the right edge, possibly nothing
            let start = y * width + x.min(width);
            let end = (y + 1) * width;
            dst[start..end].fill(color);
            x = 0;
            y += 1;
        } else {
            let start = (y * width + x).min(dst.len());
            let end = (start + length as usize).min(dst.len());
            dst[start..end].fill(color);
            x += length as usize;
        }
    }

    dst
}
