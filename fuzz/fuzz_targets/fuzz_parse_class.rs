#![no_main]
use abicmp::parsers::{ClassParser, JsonClassParser};
use libfuzzer_sys::fuzz_target;

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the JSON class-node parser.
///
/// Also wraps the input as a method list so that member validation and
/// annotation value decoding are reached more often than a bare top-level
/// document would allow.
fuzz_target!(|data: &[u8]| {
    let parser = JsonClassParser::new();
    let _ = parser.parse_bytes("fuzz.class.json", data);

    if let Ok(s) = std::str::from_utf8(data) {
        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(r#"{{"name":"a/Fuzz","access":1,"methods":[{s}]}}"#);
            let _ = parser.parse_bytes("a/Fuzz.class.json", wrapped.as_bytes());
        }
    }
});
