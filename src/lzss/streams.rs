// Word packing for the three interleaved sub-streams.
//
// Flags (1 bit), string tokens (16 bits) and literals (8 bits) each fill
// their own 32-bit accumulator, least-significant bits first. A word slot
// is reserved from the shared cursor when the first value for an empty
// accumulator arrives, and the word is stored into that slot once all 32
// bits are assigned. Reservation order is therefore the order in which the
// decoder first needs each word, so it can read the buffer front to back.

use super::decoder::DecodeError;
use super::encoder::EncodeError;
use super::header::WORD_LEN;

/// Logical sub-stream a word belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Flags = 0,
    Strings = 1,
    Bytes = 2,
}

impl Stream {
    /// Bits one element occupies in a word of this stream.
    #[inline]
    pub const fn width(self) -> u32 {
        match self {
            Stream::Flags => 1,
            Stream::Strings => 16,
            Stream::Bytes => 8,
        }
    }
}

/// One 32-bit accumulator.
#[derive(Debug, Default, Clone, Copy)]
struct Lane {
    /// Byte offset of the reserved output word (packer only).
    slot: usize,
    acc: u32,
    /// Bits currently assigned (packer) or still unread (unpacker).
    fill: u32,
}

// ---------------------------------------------------------------------------
// Packer (encode side)
// ---------------------------------------------------------------------------

/// Accumulates flags, tokens and literals into a caller-owned buffer.
///
/// Fails with `EncodeError::OutputTooSmall` the moment a word slot would
/// not fit; the buffer contents are unusable after that.
pub struct StreamPacker<'a> {
    out: &'a mut [u8],
    cursor: usize,
    lanes: [Lane; 3],
    words: [usize; 3],
}

impl<'a> StreamPacker<'a> {
    /// Start packing at byte `start` of `out` (just past the header).
    pub fn new(out: &'a mut [u8], start: usize) -> Self {
        Self {
            out,
            cursor: start,
            lanes: [Lane::default(); 3],
            words: [0; 3],
        }
    }

    /// Record whether the next element is a string token (`true`) or a
    /// literal byte (`false`).
    #[inline]
    pub fn emit_flag(&mut self, is_string: bool) -> Result<(), EncodeError> {
        self.push(Stream::Flags, u32::from(is_string))
    }

    /// Append one packed `(offset, length)` token.
    #[inline]
    pub fn emit_string(&mut self, token: u16) -> Result<(), EncodeError> {
        self.push(Stream::Strings, u32::from(token))
    }

    /// Append one literal byte.
    #[inline]
    pub fn emit_literal(&mut self, byte: u8) -> Result<(), EncodeError> {
        self.push(Stream::Bytes, u32::from(byte))
    }

    /// Number of words reserved so far for `stream`.
    pub fn words(&self, stream: Stream) -> usize {
        self.words[stream as usize]
    }

    /// Store every partially filled word and return the total length.
    ///
    /// Unused high bits of a partial word are zero.
    pub fn finish(mut self) -> usize {
        for stream in [Stream::Flags, Stream::Bytes, Stream::Strings] {
            let lane = self.lanes[stream as usize];
            if lane.fill != 0 {
                self.store(lane.slot, lane.acc);
            }
        }
        self.cursor
    }

    fn push(&mut self, stream: Stream, value: u32) -> Result<(), EncodeError> {
        let idx = stream as usize;
        if self.lanes[idx].fill == 0 {
            let slot = self.reserve()?;
            self.lanes[idx] = Lane {
                slot,
                acc: 0,
                fill: 0,
            };
            self.words[idx] += 1;
        }

        let lane = &mut self.lanes[idx];
        lane.acc |= value << lane.fill;
        lane.fill += stream.width();
        if lane.fill == 32 {
            let (slot, acc) = (lane.slot, lane.acc);
            lane.fill = 0;
            self.store(slot, acc);
        }
        Ok(())
    }

    fn reserve(&mut self) -> Result<usize, EncodeError> {
        let end = self.cursor + WORD_LEN;
        if end > self.out.len() {
            return Err(EncodeError::OutputTooSmall {
                capacity: self.out.len(),
            });
        }
        let slot = self.cursor;
        self.cursor = end;
        Ok(slot)
    }

    #[inline]
    fn store(&mut self, slot: usize, word: u32) {
        self.out[slot..slot + WORD_LEN].copy_from_slice(&word.to_ne_bytes());
    }
}

// ---------------------------------------------------------------------------
// Unpacker (decode side)
// ---------------------------------------------------------------------------

/// Replays the three sub-streams from a compressed buffer.
///
/// Every word read is bounds-checked; running off the end of the input is
/// reported as `DecodeError::TruncatedInput`.
pub struct StreamUnpacker<'a> {
    input: &'a [u8],
    cursor: usize,
    lanes: [Lane; 3],
}

impl<'a> StreamUnpacker<'a> {
    /// Start reading words at byte `start` of `input`.
    pub fn new(input: &'a [u8], start: usize) -> Self {
        Self {
            input,
            cursor: start,
            lanes: [Lane::default(); 3],
        }
    }

    /// Next flag bit: `true` for a string token, `false` for a literal.
    #[inline]
    pub fn next_flag(&mut self) -> Result<bool, DecodeError> {
        Ok(self.pull(Stream::Flags)? != 0)
    }

    #[inline]
    pub fn next_token(&mut self) -> Result<u16, DecodeError> {
        Ok(self.pull(Stream::Strings)? as u16)
    }

    #[inline]
    pub fn next_literal(&mut self) -> Result<u8, DecodeError> {
        Ok(self.pull(Stream::Bytes)? as u8)
    }

    /// Bytes of input consumed so far.
    pub fn position(&self) -> usize {
        self.cursor
    }

    fn pull(&mut self, stream: Stream) -> Result<u32, DecodeError> {
        let idx = stream as usize;
        if self.lanes[idx].fill == 0 {
            let acc = self.read_word()?;
            self.lanes[idx] = Lane {
                slot: 0,
                acc,
                fill: 32,
            };
        }

        let width = stream.width();
        let lane = &mut self.lanes[idx];
        let value = lane.acc & ((1u32 << width) - 1);
        lane.acc >>= width;
        lane.fill -= width;
        Ok(value)
    }

    fn read_word(&mut self) -> Result<u32, DecodeError> {
        let bytes = self
            .input
            .get(self.cursor..self.cursor + WORD_LEN)
            .ok_or(DecodeError::TruncatedInput {
                offset: self.cursor,
                len: self.input.len(),
            })?;
        let mut word = [0u8; WORD_LEN];
        word.copy_from_slice(bytes);
        self.cursor += WORD_LEN;
        Ok(u32::from_ne_bytes(word))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
