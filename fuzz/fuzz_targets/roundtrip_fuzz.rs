#![no_main]
use libfuzzer_sys::fuzz_target;
use oxilzss::compress::{CompressOptions, compress, decompress};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, input)) = data.split_first() else {
        return;
    };
    let shift = 2 + u32::from(selector) % 13;
    let opts = CompressOptions {
        dictionary_length: 1 << shift,
    };

    let packed = compress(input, &opts).expect("compress failed");
    let restored = decompress(&packed).expect("decompress failed");
    assert_eq!(restored, input);
});
