use crate::domain::PostTitle;

const MAX_SLUG_BASE_LEN: usize = 80;
const FALLBACK_SLUG: &str = "post";

/// URL-safe post identifier: lowercase ASCII letters, digits and single dashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slug(String);

impl Slug {
    pub fn from_title(title: &PostTitle) -> Self {
        let mut slug = String::with_capacity(title.as_ref().len());

        for c in title.as_ref().chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if (c.is_whitespace() || c.is_ascii_punctuation()) && !slug.ends_with('-') {
                slug.push('-');
            }
        }

        // ASCII only from here on, so byte truncation is safe.
        slug.truncate(MAX_SLUG_BASE_LEN);
        let slug = slug.trim_matches('-');

        if slug.is_empty() {
            Self(FALLBACK_SLUG.to_string())
        } else {
            Self(slug.to_string())
        }
    }

    /// Disambiguates a slug that is already taken.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}-{}", self.0, suffix))
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
