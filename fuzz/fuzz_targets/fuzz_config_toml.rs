#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Parsing and synthesis must reject bad input with an error, never a panic
        if let Ok(config) = toml::from_str::<stackplan::DeploymentConfig>(content) {
            let _ = stackplan::synthesize(&config);
        }
    }
});
