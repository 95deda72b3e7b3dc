#![no_main]
use abicmp::diff::ClassComparer;
use abicmp::parsers::{ClassParser, JsonClassParser};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static COMPARER: OnceLock<Option<ClassComparer>> = OnceLock::new();

/// Fuzz the comparison engine with arbitrary parsed class pairs.
///
/// The input is split at the first NUL byte into the two class documents.
/// Malformed descriptors must be isolated by the engine, never panic.
fuzz_target!(|data: &[u8]| {
    let Some(comparer) = COMPARER.get_or_init(|| ClassComparer::new().ok()) else {
        return;
    };
    let Some(split) = data.iter().position(|&b| b == 0) else {
        return;
    };
    let parser = JsonClassParser::new();
    let (Ok(c1), Ok(c2)) = (
        parser.parse_bytes("1.class.json", &data[..split]),
        parser.parse_bytes("2.class.json", &data[split + 1..]),
    ) else {
        return;
    };
    let _ = comparer.compare("fuzz.jar", &c1, &c2);
});
