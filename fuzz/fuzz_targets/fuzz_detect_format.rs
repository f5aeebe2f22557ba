#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz content-based syntax detection.
///
/// Detection only inspects a prefix of the input and must never panic,
/// whatever the bytes look like.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = vocab_diff::parsers::detect_format(s);
    }
});
