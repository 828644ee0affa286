// In-memory compression API.
//
// Wraps the buffer-level codec in `crate::lzss` with owned buffers:
//
// - `encoder`: Compressor / compress(): sizes and trims the output buffer
// - `decoder`: decompress(): sizes the output from the header

pub mod decoder;
pub mod encoder;

pub use decoder::decompress;
pub use encoder::{CompressOptions, Compressor, compress, compress_with_stats};
