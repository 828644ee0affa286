// Owned-buffer compression.
//
// Compressor keeps the validated dictionary and one output buffer sized
// with `max_compressed_len`, so repeated calls reuse the allocation.

use crate::lzss::encoder::{self, EncodeError, EncodeStats};
use crate::lzss::header::{DEFAULT_DICTIONARY_LENGTH, Dictionary};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Configuration for compression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressOptions {
    /// Sliding window size in bytes. Power of two in `4..=16384`.
    pub dictionary_length: u32,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            dictionary_length: DEFAULT_DICTIONARY_LENGTH,
        }
    }
}

// ---------------------------------------------------------------------------
// Compressor
// ---------------------------------------------------------------------------

/// Reusable compressor.
///
/// # Example
/// ```
/// use oxilzss::compress::{CompressOptions, Compressor};
/// let mut c = Compressor::new(CompressOptions::default()).unwrap();
/// let packed = c.compress(b"abcabcabcabc").unwrap().to_vec();
/// assert_eq!(oxilzss::compress::decompress(&packed).unwrap(), b"abcabcabcabc");
/// ```
pub struct Compressor {
    dictionary: Dictionary,
    buffer: Vec<u8>,
    last_stats: EncodeStats,
}

impl Compressor {
    /// Validate the options up front; a bad dictionary fails here rather
    /// than on the first call.
    pub fn new(opts: CompressOptions) -> Result<Self, EncodeError> {
        Ok(Self {
            dictionary: Dictionary::new(opts.dictionary_length)?,
            buffer: Vec::new(),
            last_stats: EncodeStats::default(),
        })
    }

    pub fn dictionary(&self) -> Dictionary {
        self.dictionary
    }

    /// Compress `input`, returning a view of the internal buffer.
    pub fn compress(&mut self, input: &[u8]) -> Result<&[u8], EncodeError> {
        let capacity = encoder::max_compressed_len(input.len());
        self.buffer.clear();
        self.buffer.resize(capacity, 0);

        let stats =
            encoder::compress_into_with_stats(input, self.dictionary.length(), &mut self.buffer)?;
        self.buffer.truncate(stats.output_len);
        self.last_stats = stats;
        Ok(&self.buffer)
    }

    /// Counters from the most recent successful call.
    pub fn last_stats(&self) -> EncodeStats {
        self.last_stats
    }
}

// ---------------------------------------------------------------------------
// Convenience functions
// ---------------------------------------------------------------------------

/// Compress `input` into a freshly allocated buffer.
pub fn compress(input: &[u8], opts: &CompressOptions) -> Result<Vec<u8>, EncodeError> {
    compress_with_stats(input, opts).map(|(out, _)| out)
}

/// Compress and also return the encode counters.
pub fn compress_with_stats(
    input: &[u8],
    opts: &CompressOptions,
) -> Result<(Vec<u8>, EncodeStats), EncodeError> {
    let mut out = vec![0u8; encoder::max_compressed_len(input.len())];
    let stats = encoder::compress_into_with_stats(input, opts.dictionary_length, &mut out)?;
    out.truncate(stats.output_len);
    Ok((out, stats))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
