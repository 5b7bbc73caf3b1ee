use secrecy::Secret;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug)]
pub struct UserPassword(Secret<String>);

impl UserPassword {
    pub fn parse(s: String) -> Result<Self, String> {
        let length = s.graphemes(true).count();

        if s.trim().is_empty() {
            return Err("Invalid password: cannot be empty or whitespace.".to_string());
        }

        if length < 8 {
            return Err("Invalid password: must be at least 8 characters long.".to_string());
        }

        if length > 128 {
            return Err("Invalid password: cannot be longer than 128 characters.".to_string());
        }

        Ok(Self(Secret::new(s)))
    }

    pub fn into_secret(self) -> Secret<String> {
        self.0
    }
}
