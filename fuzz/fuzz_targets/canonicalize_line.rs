#![no_main]

use fimcheck::canonicalize::canonicalize_line;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(line) = canonicalize_line(input) {
            // Rewriting a canonical line is a no-op
            let again = canonicalize_line(&line.text).expect("canonical line must re-parse");
            assert_eq!(again.text, line.text);
        }
    }
});
