#![no_main]
use libfuzzer_sys::fuzz_target;
use vocab_diff::parsers::{parse_graph_str, GraphFormat};

/// Fuzz both graph syntaxes with arbitrary UTF-8 input.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_graph_str(s, GraphFormat::NTriples);
        let _ = parse_graph_str(s, GraphFormat::Turtle);
    }
});
