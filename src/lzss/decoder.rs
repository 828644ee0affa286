// LZSS decoder: replays the flag, string and byte streams.
//
// The header gives the exact output length, so decoding stops as soon as
// that many bytes are produced. Every word read and every back-reference
// is checked, so a damaged stream yields an error instead of reading or
// writing out of bounds.

use log::debug;
use thiserror::Error;

use super::header::{Dictionary, DictionaryError, HEADER_LEN, Header, WORD_LEN};
use super::streams::StreamUnpacker;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer than `HEADER_LEN` bytes of input.
    #[error("corrupt header: got {len} bytes, need {HEADER_LEN}")]
    CorruptHeader { len: usize },
    /// The header names a dictionary length the encoder would never emit.
    #[error("corrupt header: {0}")]
    BadDictionary(#[from] DictionaryError),
    #[error("destination buffer of {capacity} bytes cannot hold {required} decoded bytes")]
    OutputTooSmall { required: usize, capacity: usize },
    /// The header declares more output than the stream words could encode.
    #[error("header declares {declared} bytes but the stream can hold at most {limit}")]
    ImplausibleLength { declared: usize, limit: usize },
    /// A stream word starts or ends past the end of the input.
    #[error("truncated input: word at offset {offset} runs past end of {len}-byte input")]
    TruncatedInput { offset: usize, len: usize },
    /// A string token points before the start of the output.
    #[error("back-reference at output position {position} reaches {offset} bytes back")]
    BadReference { position: usize, offset: usize },
    /// A string token is longer than what is left to decode.
    #[error(
        "string of {length} bytes at output position {position} overruns the {remaining} bytes left"
    )]
    Overrun {
        position: usize,
        length: usize,
        remaining: usize,
    },
}

// ---------------------------------------------------------------------------
// Header access
// ---------------------------------------------------------------------------

/// Parse the header of a compressed buffer.
pub fn read_header(compressed: &[u8]) -> Result<Header, DecodeError> {
    Header::read_from(compressed).ok_or(DecodeError::CorruptHeader {
        len: compressed.len(),
    })
}

/// Decoded size recorded in the header, for sizing the destination.
pub fn decompressed_len(compressed: &[u8]) -> Result<usize, DecodeError> {
    read_header(compressed).map(|h| h.uncompressed_len as usize)
}

/// Like `decompressed_len`, but also validates the header's dictionary and
/// rejects a length the stream is too short to produce.
///
/// Use this before allocating a destination from an untrusted header.
pub fn checked_decompressed_len(compressed: &[u8]) -> Result<usize, DecodeError> {
    let header = read_header(compressed)?;
    let dict = header.dictionary()?;
    let declared = header.uncompressed_len as usize;
    let limit = max_decoded_len(compressed.len(), &dict);
    if declared > limit {
        return Err(DecodeError::ImplausibleLength { declared, limit });
    }
    Ok(declared)
}

/// Most output `compressed_len` bytes could decode to: every payload word
/// a string word carrying two full-length tokens.
fn max_decoded_len(compressed_len: usize, dict: &Dictionary) -> usize {
    let words = compressed_len.saturating_sub(HEADER_LEN) / WORD_LEN;
    words.saturating_mul(2).saturating_mul(dict.max_match())
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

/// Decompress `compressed` into the front of `out`.
///
/// Returns the decoded length. The dictionary length always comes from the
/// header. Bytes after the last word the stream needs are ignored.
pub fn decompress_into(compressed: &[u8], out: &mut [u8]) -> Result<usize, DecodeError> {
    let header = read_header(compressed)?;
    let total = header.uncompressed_len as usize;
    if out.len() < total {
        return Err(DecodeError::OutputTooSmall {
            required: total,
            capacity: out.len(),
        });
    }
    let dict = header.dictionary()?;

    let out = &mut out[..total];
    let mut streams = StreamUnpacker::new(compressed, HEADER_LEN);
    let mut pos = 0usize;

    while pos < total {
        if streams.next_flag()? {
            let (offset, length) = dict.unpack_token(streams.next_token()?);
            if offset > pos {
                return Err(DecodeError::BadReference {
                    position: pos,
                    offset,
                });
            }
            if length > total - pos {
                return Err(DecodeError::Overrun {
                    position: pos,
                    length,
                    remaining: total - pos,
                });
            }
            // Source and destination overlap when offset < length; each
            // byte must see the ones written before it.
            for i in pos..pos + length {
                out[i] = out[i - offset];
            }
            pos += length;
        } else {
            out[pos] = streams.next_literal()?;
            pos += 1;
        }
    }

    debug!(
        "decompressed {} -> {} bytes (dictionary {})",
        streams.position(),
        total,
        dict.length()
    );
    Ok(total)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
