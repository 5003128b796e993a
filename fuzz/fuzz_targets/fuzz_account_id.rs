#![no_main]

use libfuzzer_sys::fuzz_target;
use stackplan::domain::value_objects::AccountId;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = std::str::from_utf8(data) {
        if let Ok(id) = AccountId::parse(value) {
            assert_eq!(id.as_str().len(), AccountId::LEN);
        }
    }
});
