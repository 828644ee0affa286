#![no_main]
use libfuzzer_sys::fuzz_target;
use oxilzss::lzss::decoder;

fuzz_target!(|data: &[u8]| {
    let Ok(declared) = decoder::checked_decompressed_len(data) else {
        return;
    };
    let mut out = vec![0u8; declared];
    if let Ok(n) = decoder::decompress_into(data, &mut out) {
        assert_eq!(n, declared);
    }
});
