#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use stackplan::config::{parse_with_warnings, ConfigFormat};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let _ = parse_with_warnings(content, ConfigFormat::Yaml, Path::new("fuzz.yaml"));
    }
});
