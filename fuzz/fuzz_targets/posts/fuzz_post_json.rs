// Run with: cargo fuzz run fuzz_post_json
// CreatePostPayload JSON -> NewPost::new(title, body)
#![no_main]

use libfuzzer_sys::fuzz_target;
use quill::domain::NewPost;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    if let Ok(v) = serde_json::from_slice::<Value>(data) {
        let title = v.get("title").and_then(|s| s.as_str()).unwrap_or("").to_string();
        let body = v.get("body").and_then(|s| s.as_str()).unwrap_or("").to_string();

        // Errors are expected for invalid inputs; only panics matter.
        let _ = NewPost::new(title, body);
    }
});
