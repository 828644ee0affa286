// LZSS encoder: window search plus three-stream emission.
//
// Writes the header, then walks the input once. At each position the
// longest window match decides between a string token (length >= 3) and a
// literal byte, and the choice is recorded in the flag stream.

use log::{debug, trace};
use thiserror::Error;

use super::header::{Dictionary, DictionaryError, HEADER_LEN, Header, WORD_LEN};
use super::matching;
use super::streams::{Stream, StreamPacker};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The requested dictionary length is not usable.
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    /// The input does not fit the 32-bit length field of the header.
    #[error("input of {0} bytes exceeds the 32-bit length field")]
    InputTooLarge(usize),
    /// The destination filled up before the stream was complete.
    #[error("destination buffer of {capacity} bytes is too small")]
    OutputTooSmall { capacity: usize },
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Counters describing one encode pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeStats {
    pub input_len: usize,
    /// Total encoded length, header included.
    pub output_len: usize,
    pub strings: usize,
    pub literals: usize,
    pub flag_words: usize,
    pub string_words: usize,
    pub byte_words: usize,
}

impl EncodeStats {
    /// Total encoded elements (tokens plus literals).
    pub fn elements(&self) -> usize {
        self.strings + self.literals
    }
}

// ---------------------------------------------------------------------------
// Sizing
// ---------------------------------------------------------------------------

/// Upper bound on the encoded size of `input_len` bytes.
///
/// The all-literal layout costs `ceil(n/32)` flag words plus `ceil(n/4)`
/// byte words; mixing in tokens can add at most one partial string word.
pub fn max_compressed_len(input_len: usize) -> usize {
    HEADER_LEN + WORD_LEN * (input_len.div_ceil(32) + input_len.div_ceil(4) + 1)
}

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

/// Compress `input` into `out`, returning the number of bytes written.
pub fn compress_into(
    input: &[u8],
    dictionary_len: u32,
    out: &mut [u8],
) -> Result<usize, EncodeError> {
    compress_into_with_stats(input, dictionary_len, out).map(|stats| stats.output_len)
}

/// Compress `input` into `out` and report what was emitted.
///
/// On error the contents of `out` are unspecified.
pub fn compress_into_with_stats(
    input: &[u8],
    dictionary_len: u32,
    out: &mut [u8],
) -> Result<EncodeStats, EncodeError> {
    let dict = Dictionary::new(dictionary_len)?;
    let uncompressed_len =
        u32::try_from(input.len()).map_err(|_| EncodeError::InputTooLarge(input.len()))?;

    let header = Header {
        uncompressed_len,
        dictionary_len,
    };
    let start = header.write_to(out).ok_or(EncodeError::OutputTooSmall {
        capacity: out.len(),
    })?;

    let mut packer = StreamPacker::new(out, start);
    let mut stats = EncodeStats {
        input_len: input.len(),
        ..Default::default()
    };

    let mut current = 0usize;
    while current < input.len() {
        let best = matching::longest_match(input, current, &dict);
        if best.is_token() {
            trace!(
                "pos {current}: string offset={} length={}",
                best.offset, best.length
            );
            packer.emit_flag(true)?;
            packer.emit_string(dict.pack_token(best.offset, best.length))?;
            stats.strings += 1;
            current += best.length;
        } else {
            packer.emit_flag(false)?;
            packer.emit_literal(input[current])?;
            stats.literals += 1;
            current += 1;
        }
    }

    stats.flag_words = packer.words(Stream::Flags);
    stats.string_words = packer.words(Stream::Strings);
    stats.byte_words = packer.words(Stream::Bytes);
    stats.output_len = packer.finish();

    debug!(
        "compressed {} -> {} bytes (dictionary {}, {} strings, {} literals)",
        stats.input_len,
        stats.output_len,
        dict.length(),
        stats.strings,
        stats.literals
    );
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
