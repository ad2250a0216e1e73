#![no_main]

use fimcheck::parser::parse_sample_line;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Malformed lines must come back as errors, never panics
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = parse_sample_line(input);
    }
});
