// File-level I/O helpers for compression/decompression.
//
// Provides `compress_file()` / `decompress_file()` plus reader/writer
// variants. The codec has no streaming mode, so inputs are read fully into
// memory; output is written only after the codec succeeds, which keeps a
// failed compression from leaving a truncated file behind. Optionally
// computes SHA-256 of the uncompressed payload (feature-gated behind
// `file-io`).

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;

#[cfg(feature = "file-io")]
use sha2::Digest;

use crate::compress::decoder::decompress;
use crate::compress::encoder::{CompressOptions, compress_with_stats};
use crate::lzss::decoder::{DecodeError, read_header};
use crate::lzss::encoder::EncodeError;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `compress_file()`.
#[derive(Debug, Clone)]
pub struct CompressStats {
    /// Uncompressed input size in bytes.
    pub input_size: u64,
    /// Compressed output size in bytes.
    pub output_size: u64,
    pub dictionary_length: u32,
    /// Number of string tokens emitted.
    pub strings: u64,
    /// Number of literal bytes emitted.
    pub literals: u64,
    /// SHA-256 of the uncompressed input (if `file-io` feature is enabled).
    pub input_sha256: Option<[u8; 32]>,
}

impl CompressStats {
    /// Compressed size as a fraction of the input size.
    pub fn ratio(&self) -> f64 {
        if self.input_size == 0 {
            return 1.0;
        }
        self.output_size as f64 / self.input_size as f64
    }
}

/// Statistics returned by `decompress_file()`.
#[derive(Debug, Clone)]
pub struct DecompressStats {
    /// Compressed input size in bytes.
    pub input_size: u64,
    /// Reconstructed output size in bytes.
    pub output_size: u64,
    /// Dictionary length read from the header.
    pub dictionary_length: u32,
    /// SHA-256 of the reconstructed output (if `file-io` feature is enabled).
    pub output_sha256: Option<[u8; 32]>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// I/O error (file open, read, write).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("compress error: {0}")]
    Encode(#[from] EncodeError),
    #[error("decompress error: {0}")]
    Decode(#[from] DecodeError),
}

// ---------------------------------------------------------------------------
// Default buffer size
// ---------------------------------------------------------------------------

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// Reader/writer variants
// ---------------------------------------------------------------------------

/// Read all of `reader`, compress it, and write the result to `writer`.
pub fn compress_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    opts: &CompressOptions,
) -> Result<CompressStats, IoError> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;

    let (output, stats) = compress_with_stats(&input, opts)?;
    writer.write_all(&output)?;
    writer.flush()?;

    Ok(CompressStats {
        input_size: input.len() as u64,
        output_size: output.len() as u64,
        dictionary_length: opts.dictionary_length,
        strings: stats.strings as u64,
        literals: stats.literals as u64,
        input_sha256: sha256(&input),
    })
}

/// Read all of `reader`, decompress it, and write the result to `writer`.
pub fn decompress_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
) -> Result<DecompressStats, IoError> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;

    let header = read_header(&input)?;
    let output = decompress(&input)?;
    writer.write_all(&output)?;
    writer.flush()?;

    Ok(DecompressStats {
        input_size: input.len() as u64,
        output_size: output.len() as u64,
        dictionary_length: header.dictionary_len,
        output_sha256: sha256(&output),
    })
}

// ---------------------------------------------------------------------------
// compress_file / decompress_file
// ---------------------------------------------------------------------------

/// Compress `input_path` into `output_path`.
///
/// The output file is created only once compression has succeeded.
pub fn compress_file(
    input_path: &Path,
    output_path: &Path,
    opts: &CompressOptions,
) -> Result<CompressStats, IoError> {
    let input = std::fs::read(input_path)?;
    let (output, stats) = compress_with_stats(&input, opts)?;
    write_file(output_path, &output)?;

    Ok(CompressStats {
        input_size: input.len() as u64,
        output_size: output.len() as u64,
        dictionary_length: opts.dictionary_length,
        strings: stats.strings as u64,
        literals: stats.literals as u64,
        input_sha256: sha256(&input),
    })
}

/// Decompress `input_path` into `output_path`.
///
/// The output file is created only once decompression has succeeded.
pub fn decompress_file(input_path: &Path, output_path: &Path) -> Result<DecompressStats, IoError> {
    let input = std::fs::read(input_path)?;
    let header = read_header(&input)?;
    let output = decompress(&input)?;
    write_file(output_path, &output)?;

    Ok(DecompressStats {
        input_size: input.len() as u64,
        output_size: output.len() as u64,
        dictionary_length: header.dictionary_len,
        output_sha256: sha256(&output),
    })
}

fn write_file(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut writer = BufWriter::with_capacity(BUF_SIZE, File::create(path)?);
    writer.write_all(data)?;
    writer.flush()
}

#[cfg(feature = "file-io")]
fn sha256(data: &[u8]) -> Option<[u8; 32]> {
    Some(sha2::Sha256::digest(data).into())
}

#[cfg(not(feature = "file-io"))]
fn sha256(_data: &[u8]) -> Option<[u8; 32]> {
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
