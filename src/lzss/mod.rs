// Word-packed LZSS format.
//
// # Modules
//
// - `header`:   Two-word prologue and dictionary-derived token layout
// - `streams`:  Flag/string/byte word packing and unpacking
// - `matching`: Longest-match search over the sliding window
// - `encoder`:  Buffer-to-buffer compression
// - `decoder`:  Buffer-to-buffer decompression

pub mod decoder;
pub mod encoder;
pub mod header;
pub mod matching;
pub mod streams;

// Re-export key types for convenience.
pub use decoder::{
    DecodeError, checked_decompressed_len, decompress_into, decompressed_len, read_header,
};
pub use encoder::{
    EncodeError, EncodeStats, compress_into, compress_into_with_stats, max_compressed_len,
};
pub use header::{DEFAULT_DICTIONARY_LENGTH, Dictionary, DictionaryError, HEADER_LEN, Header};
pub use streams::{Stream, StreamPacker, StreamUnpacker};
