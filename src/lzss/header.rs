// Stream header and dictionary parameters.
//
// The header is two native-endian 32-bit words:
//   [0..4)  uncompressed length
//   [4..8)  dictionary length (power of two in 4..=16384)
//
// Every other derived quantity (offset/length bit split, match cap) comes
// from the dictionary length, so `Dictionary` computes them once for both
// the encoder and the decoder.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 8;

/// Size of one packed stream word in bytes.
pub const WORD_LEN: usize = 4;

/// Smallest legal dictionary.
pub const MIN_DICTIONARY_LENGTH: u32 = 4;

/// Largest legal dictionary (leaves 2 bits of each token for the length).
pub const MAX_DICTIONARY_LENGTH: u32 = 16384;

/// Dictionary used by the CLI and `CompressOptions::default()`.
pub const DEFAULT_DICTIONARY_LENGTH: u32 = 8192;

/// Shortest match worth a string token. Both offset and length are stored
/// biased by this amount.
pub const MIN_MATCH: usize = 3;

// ---------------------------------------------------------------------------
// Dictionary validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DictionaryError {
    /// Length is not a power of two.
    #[error("dictionary length {0} is not a power of two")]
    NotPowerOfTwo(u32),
    /// Length is below `MIN_DICTIONARY_LENGTH`.
    #[error("dictionary length {0} is smaller than {MIN_DICTIONARY_LENGTH} bytes")]
    TooSmall(u32),
    /// Length is above `MAX_DICTIONARY_LENGTH`.
    #[error("dictionary length {0} exceeds {MAX_DICTIONARY_LENGTH} bytes")]
    TooLarge(u32),
}

/// Validated dictionary length plus everything derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dictionary {
    length: u32,
    length_shift: u32,
}

impl Dictionary {
    /// Validate `length` and derive the token layout.
    ///
    /// Checks run in a fixed order: power of two, then lower bound, then
    /// upper bound. Zero passes the power-of-two test and is reported as
    /// too small.
    pub fn new(length: u32) -> Result<Self, DictionaryError> {
        if length & length.wrapping_sub(1) != 0 {
            return Err(DictionaryError::NotPowerOfTwo(length));
        }
        if length < MIN_DICTIONARY_LENGTH {
            return Err(DictionaryError::TooSmall(length));
        }
        if length > MAX_DICTIONARY_LENGTH {
            return Err(DictionaryError::TooLarge(length));
        }
        Ok(Self {
            length,
            length_shift: length.trailing_zeros(),
        })
    }

    /// Window size in bytes.
    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Number of low token bits holding `offset - 3` (log2 of the length).
    #[inline]
    pub fn length_shift(&self) -> u32 {
        self.length_shift
    }

    /// Farthest back a match may start.
    #[inline]
    pub fn max_offset(&self) -> usize {
        self.length as usize + 2
    }

    /// Longest match a single token can carry.
    #[inline]
    pub fn max_match(&self) -> usize {
        (65536 / self.length as usize) + 2
    }

    #[inline]
    pub fn offset_mask(&self) -> u32 {
        self.length - 1
    }

    #[inline]
    pub fn length_mask(&self) -> u32 {
        (!self.offset_mask() & 0xFFFF) >> self.length_shift
    }

    /// Pack a match into its 16-bit token.
    #[inline]
    pub fn pack_token(&self, offset: usize, length: usize) -> u16 {
        debug_assert!((MIN_MATCH..=self.max_offset()).contains(&offset));
        debug_assert!((MIN_MATCH..=self.max_match()).contains(&length));
        ((((length - MIN_MATCH) as u32) << self.length_shift) | (offset - MIN_MATCH) as u32) as u16
    }

    /// Split a token back into `(offset, length)`.
    #[inline]
    pub fn unpack_token(&self, token: u16) -> (usize, usize) {
        let token = u32::from(token);
        let offset = (token & self.offset_mask()) as usize + MIN_MATCH;
        let length = ((token >> self.length_shift) & self.length_mask()) as usize + MIN_MATCH;
        (offset, length)
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self {
            length: DEFAULT_DICTIONARY_LENGTH,
            length_shift: DEFAULT_DICTIONARY_LENGTH.trailing_zeros(),
        }
    }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// The fixed two-word prologue of every compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Exact byte length of the original input.
    pub uncompressed_len: u32,
    /// Raw dictionary length as stored; not validated here.
    pub dictionary_len: u32,
}

impl Header {
    /// Serialize to the on-disk layout.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[..4].copy_from_slice(&self.uncompressed_len.to_ne_bytes());
        out[4..].copy_from_slice(&self.dictionary_len.to_ne_bytes());
        out
    }

    /// Write into the front of `buf`. Returns `None` if `buf` is shorter
    /// than the header.
    pub fn write_to(&self, buf: &mut [u8]) -> Option<usize> {
        let dst = buf.get_mut(..HEADER_LEN)?;
        dst.copy_from_slice(&self.to_bytes());
        Some(HEADER_LEN)
    }

    /// Parse the header from the front of `buf`. Returns `None` if fewer
    /// than `HEADER_LEN` bytes are available.
    pub fn read_from(buf: &[u8]) -> Option<Self> {
        let bytes: &[u8; HEADER_LEN] = buf.get(..HEADER_LEN)?.try_into().ok()?;
        let (len, dict) = bytes.split_at(4);
        Some(Self {
            uncompressed_len: u32::from_ne_bytes(len.try_into().ok()?),
            dictionary_len: u32::from_ne_bytes(dict.try_into().ok()?),
        })
    }

    /// Validate the stored dictionary length.
    pub fn dictionary(&self) -> Result<Dictionary, DictionaryError> {
        Dictionary::new(self.dictionary_len)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
