// Integration tests for the compress module.
//
// Tests the full pipeline: compress -> word stream -> decompress, across
// every legal dictionary length, structured and random data, and the
// error paths of both directions.

use oxilzss::compress::{self, CompressOptions, Compressor};
use oxilzss::lzss::{
    self, DecodeError, DictionaryError, EncodeError, HEADER_LEN, compress_into,
    compress_into_with_stats, decompress_into, max_compressed_len,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const ALL_DICTIONARIES: [u32; 13] = [
    4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384,
];

fn opts(dictionary_length: u32) -> CompressOptions {
    CompressOptions { dictionary_length }
}

fn roundtrip(data: &[u8], dictionary_length: u32) -> Vec<u8> {
    let packed = compress::compress(data, &opts(dictionary_length)).unwrap();
    let decoded = compress::decompress(&packed).unwrap();
    assert_eq!(
        decoded,
        data,
        "roundtrip mismatch (input={}, dictionary={}, packed={})",
        data.len(),
        dictionary_length,
        packed.len()
    );
    packed
}

fn random_data(size: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; size];
    rng.fill(&mut data[..]);
    data
}

/// Text-like data drawn from a small vocabulary.
fn wordy_data(size: usize, seed: u64) -> Vec<u8> {
    const WORDS: [&str; 8] = [
        "lorem ", "ipsum ", "dolor ", "sit ", "amet, ", "consectetur ", "adipiscing ", "elit. ",
    ];
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size + 16);
    while data.len() < size {
        data.extend_from_slice(WORDS[rng.random_range(0..WORDS.len())].as_bytes());
    }
    data.truncate(size);
    data
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn every_dictionary_roundtrips_text() {
    let data = wordy_data(3000, 1);
    for d in ALL_DICTIONARIES {
        let packed = roundtrip(&data, d);
        assert!(packed.len() < data.len(), "dictionary {d} did not shrink text");
    }
}

#[test]
fn every_dictionary_roundtrips_random() {
    let data = random_data(2000, 2);
    for d in ALL_DICTIONARIES {
        let packed = roundtrip(&data, d);
        assert!(packed.len() <= max_compressed_len(data.len()));
    }
}

#[test]
fn short_inputs() {
    for len in 0..70 {
        let data: Vec<u8> = (0..len).map(|i| (i % 5) as u8).collect();
        for d in [4, 16, 8192] {
            roundtrip(&data, d);
        }
    }
}

#[test]
fn empty_input_is_header_only() {
    for d in [4, 8192, 16384] {
        let packed = roundtrip(b"", d);
        assert_eq!(packed.len(), HEADER_LEN);
    }
}

#[test]
fn long_run_uses_overlapping_tokens() {
    for d in [4, 64, 16384] {
        let data = vec![0xA5u8; d as usize * 3 + 17];
        let (packed, stats) = compress::compress_with_stats(&data, &opts(d)).unwrap();
        let max_match = lzss::Dictionary::new(d).unwrap().max_match();
        // Three leading literals, full-length tokens, then a tail that is
        // either one more token or one or two literals.
        let rest = data.len() - 3;
        let (full, tail) = (rest / max_match, rest % max_match);
        if tail >= 3 {
            assert_eq!((stats.strings, stats.literals), (full + 1, 3));
        } else {
            assert_eq!((stats.strings, stats.literals), (full, 3 + tail));
        }
        assert_eq!(compress::decompress(&packed).unwrap(), data);
    }
}

#[test]
fn repeated_block_longer_than_window() {
    let block = random_data(100, 3);
    let data: Vec<u8> = block.iter().copied().cycle().take(5000).collect();
    // 64-byte window cannot see the previous copy of the block.
    let small = roundtrip(&data, 64);
    // 128-byte window can.
    let large = roundtrip(&data, 128);
    assert!(large.len() < small.len());
}

#[test]
fn random_bytes_are_all_literal() {
    // 256 distinct byte values never repeat a 3-byte substring.
    let mut data: Vec<u8> = (0..=255u8).collect();
    let mut rng = StdRng::seed_from_u64(4);
    for i in (1..data.len()).rev() {
        let j = rng.random_range(0..=i);
        data.swap(i, j);
    }
    let (packed, stats) = compress::compress_with_stats(&data, &opts(8192)).unwrap();
    assert_eq!(stats.strings, 0);
    assert_eq!(packed.len(), HEADER_LEN + 4 * (8 + 64));
}

#[test]
fn compressor_handles_many_inputs() {
    let mut c = Compressor::new(opts(1024)).unwrap();
    for seed in 0..8 {
        let data = wordy_data(500 + seed as usize * 37, seed);
        let packed = c.compress(&data).unwrap().to_vec();
        assert_eq!(compress::decompress(&packed).unwrap(), data);
    }
}

// ---------------------------------------------------------------------------
// Error paths
// ---------------------------------------------------------------------------

#[test]
fn dictionary_errors() {
    let data = b"whatever";
    assert_eq!(
        compress::compress(data, &opts(6)),
        Err(EncodeError::Dictionary(DictionaryError::NotPowerOfTwo(6)))
    );
    assert_eq!(
        compress::compress(data, &opts(32768)),
        Err(EncodeError::Dictionary(DictionaryError::TooLarge(32768)))
    );
    assert_eq!(
        compress::compress(data, &opts(2)),
        Err(EncodeError::Dictionary(DictionaryError::TooSmall(2)))
    );
}

#[test]
fn output_too_small_at_every_capacity() {
    let data = wordy_data(400, 5);
    let mut full = vec![0u8; max_compressed_len(data.len())];
    let needed = compress_into(&data, 256, &mut full).unwrap();

    for capacity in 0..needed {
        let mut out = vec![0u8; capacity];
        assert_eq!(
            compress_into(&data, 256, &mut out),
            Err(EncodeError::OutputTooSmall { capacity }),
            "capacity {capacity}"
        );
    }

    let mut exact = vec![0u8; needed];
    assert_eq!(compress_into(&data, 256, &mut exact), Ok(needed));
    assert_eq!(exact[..], full[..needed]);
}

#[test]
fn decode_into_exact_buffer() {
    let data = wordy_data(777, 6);
    let packed = compress::compress(&data, &opts(512)).unwrap();
    let mut out = vec![0u8; data.len()];
    assert_eq!(decompress_into(&packed, &mut out), Ok(data.len()));
    assert_eq!(out, data);

    let mut short = vec![0u8; data.len() - 1];
    assert_eq!(
        decompress_into(&packed, &mut short),
        Err(DecodeError::OutputTooSmall {
            required: data.len(),
            capacity: data.len() - 1
        })
    );
}

#[test]
fn truncation_is_always_detected() {
    let data = wordy_data(600, 7);
    let packed = compress::compress(&data, &opts(2048)).unwrap();
    for cut in 0..packed.len() {
        let err = compress::decompress(&packed[..cut]).unwrap_err();
        if cut < HEADER_LEN {
            assert_eq!(err, DecodeError::CorruptHeader { len: cut });
        } else {
            assert!(
                matches!(
                    err,
                    DecodeError::TruncatedInput { .. } | DecodeError::ImplausibleLength { .. }
                ),
                "cut {cut}: {err}"
            );
        }
    }
}

#[test]
fn corrupted_streams_never_panic() {
    let data = wordy_data(1000, 8);
    let packed = compress::compress(&data, &opts(4096)).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..200 {
        let mut bad = packed.clone();
        let idx = rng.random_range(HEADER_LEN..bad.len());
        bad[idx] ^= 1 << rng.random_range(0..8);
        // Either an error or some output of the declared length.
        if let Ok(out) = compress::decompress(&bad) {
            assert_eq!(out.len(), data.len());
        }
    }
}

#[test]
fn stats_match_layout() {
    let data = wordy_data(2500, 10);
    let mut out = vec![0u8; max_compressed_len(data.len())];
    let stats = compress_into_with_stats(&data, 8192, &mut out).unwrap();
    assert_eq!(stats.flag_words, stats.elements().div_ceil(32));
    assert_eq!(stats.string_words, stats.strings.div_ceil(2));
    assert_eq!(stats.byte_words, stats.literals.div_ceil(4));
    assert_eq!(
        stats.output_len,
        HEADER_LEN + 4 * (stats.flag_words + stats.string_words + stats.byte_words)
    );
}
