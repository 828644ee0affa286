// Owned-buffer decompression.

use crate::lzss::decoder::{self, DecodeError};

/// Decompress `compressed` into a buffer sized from its header.
///
/// A header declaring more output than the stream could encode is rejected
/// before anything is allocated.
pub fn decompress(compressed: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let len = decoder::checked_decompressed_len(compressed)?;
    let mut out = vec![0u8; len];
    let n = decoder::decompress_into(compressed, &mut out)?;
    out.truncate(n);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
