#![no_main]
use libfuzzer_sys::fuzz_target;
use vocab_diff::parsers::{parse_graph_str, GraphFormat};
use vocab_diff::DiffEngine;

/// Split the input on the first NUL byte into two Turtle documents and
/// diff whatever parses. Exercises subtree extraction and composition on
/// arbitrary anonymous-node shapes.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (left, right) = s.split_once('\0').unwrap_or((s, ""));
    let (Ok(canonical), Ok(draft)) = (
        parse_graph_str(left, GraphFormat::Turtle),
        parse_graph_str(right, GraphFormat::Turtle),
    ) else {
        return;
    };
    let _ = DiffEngine::new().diff(&canonical, &draft);
    let _ = DiffEngine::new().diff(&draft, &canonical);
});
