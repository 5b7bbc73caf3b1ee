#[derive(Debug)]
pub struct PostBody(String);

impl PostBody {
    pub fn parse(s: String) -> Result<Self, String> {
        if s.trim().is_empty() {
            return Err("Invalid body: cannot be empty.".to_string());
        }

        if s.contains('\0') {
            return Err("Invalid body: cannot contain NUL characters.".to_string());
        }

        // Leading indentation can be meaningful in a post body, only the tail is trimmed.
        Ok(Self(s.trim_end().to_string()))
    }
}

impl AsRef<str> for PostBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
