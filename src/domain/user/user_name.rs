use unicode_segmentation::UnicodeSegmentation;

const FORBIDDEN_CHARACTERS: [char; 10] = ['/', '(', ')', '"', '<', '>', '\\', '{', '}', '\0'];

#[derive(Debug)]
pub struct UserName(String);

impl UserName {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Invalid user name: cannot be empty or whitespace.".to_string());
        }

        if trimmed.graphemes(true).count() > 256 {
            return Err("Invalid user name: cannot be longer than 256 characters.".to_string());
        }

        if trimmed.chars().any(|c| FORBIDDEN_CHARACTERS.contains(&c)) {
            return Err(
                "Invalid user name: the characters / ( ) \" < > \\ { } are not allowed."
                    .to_string(),
            );
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
