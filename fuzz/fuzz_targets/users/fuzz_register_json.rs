// Run with: cargo fuzz run fuzz_register_json
// Register JSON -> NewUser::new(user_name, password)
#![no_main]

use libfuzzer_sys::fuzz_target;
use quill::domain::NewUser;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    if let Ok(v) = serde_json::from_slice::<Value>(data) {
        let user_name = v
            .get("user_name")
            .and_then(|s| s.as_str())
            .unwrap_or("")
            .to_string();

        let password = v
            .get("password")
            .and_then(|p| p.as_str())
            .unwrap_or("")
            .to_string();

        // Grapheme counting in both parsers is the interesting part here.
        let _ = NewUser::new(user_name, password);
    }
});
