// Run with: cargo fuzz run fuzz_comment_json
// CreateCommentPayload JSON -> NewComment::new(text, post_id, parent_comment_id)
#![no_main]

use libfuzzer_sys::fuzz_target;
use quill::domain::NewComment;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    if let Ok(v) = serde_json::from_slice::<Value>(data) {
        let text = v.get("text").and_then(|s| s.as_str()).unwrap_or("").to_string();
        let post_id = v.get("post_id").and_then(|s| s.as_str()).unwrap_or("").to_string();
        let parent_comment_id = v
            .get("parent_comment_id")
            .and_then(|s| s.as_str())
            .map(str::to_string);

        // Both ids go through Uuid::parse_str.
        let _ = NewComment::new(text, post_id, parent_comment_id);
    }
});
