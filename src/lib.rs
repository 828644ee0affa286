//! Oxilzss: a word-packed LZSS compressor/decompressor.
//!
//! Repeated substrings become `(offset, length)` back-references into a
//! sliding dictionary window of 4 to 16384 bytes; everything else is stored
//! literally. The encoded form is an 8-byte header followed by 32-bit words
//! from three interleaved sub-streams (flag bits, 16-bit string tokens and
//! literal bytes) in the order the decoder first needs them.
//!
//! The crate provides:
//! - The buffer-level codec (`lzss`)
//! - Owned-buffer compression APIs (`compress`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! Words are native-endian, so a stream is only portable between machines
//! of the same byte order. Incompressible input grows by roughly one bit
//! per byte plus word padding; size destination buffers with
//! [`lzss::max_compressed_len`].
//!
//! # Quick Start
//!
//! ```
//! use oxilzss::compress::{self, CompressOptions};
//!
//! let data = b"to be or not to be, that is the question";
//! let packed = compress::compress(data, &CompressOptions::default()).unwrap();
//! let unpacked = compress::decompress(&packed).unwrap();
//! assert_eq!(unpacked, data);
//! ```

pub mod compress;
pub mod io;
pub mod lzss;

#[cfg(feature = "cli")]
pub mod cli;
