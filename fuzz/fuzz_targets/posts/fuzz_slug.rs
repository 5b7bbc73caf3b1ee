// Run with: cargo fuzz run fuzz_slug
// Any accepted title must yield a non-empty, URL-safe slug.
#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quill::domain::{PostTitle, Slug};

#[derive(Arbitrary, Debug)]
struct Input {
    title: String,
    suffix: u32,
}

fuzz_target!(|input: Input| {
    let Ok(title) = PostTitle::parse(input.title) else {
        return;
    };

    let slug = Slug::from_title(&title);
    let s = slug.as_ref();
    assert!(!s.is_empty());
    assert!(!s.starts_with('-') && !s.ends_with('-'));
    assert!(!s.contains("--"));
    assert!(s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));

    let suffixed = slug.with_suffix(&format!("{:06}", input.suffix % 1_000_000));
    assert!(suffixed.as_ref().starts_with(s));
});
