mod comment_text;
mod thread;
mod types;

pub use comment_text::CommentText;
pub use thread::{group_into_threads, mask_deleted};
pub use types::*;

use uuid::Uuid;

/// Deepest level a comment may sit at: 0 is a root comment, 1 a reply.
pub const MAX_COMMENT_LEVEL: i16 = 1;

/// Level of a reply to a comment at `parent_level`, or `None` when the reply
/// would nest deeper than `MAX_COMMENT_LEVEL`.
pub fn reply_level(parent_level: i16) -> Option<i16> {
    let level = parent_level + 1;
    (level <= MAX_COMMENT_LEVEL).then_some(level)
}

#[derive(Debug)]
pub struct NewComment {
    pub text: CommentText,
    pub post_id: Uuid,
    pub parent_comment_id: Option<Uuid>,
}

impl NewComment {
    pub fn new(
        text: String,
        post_id: String,
        parent_comment_id: Option<String>,
    ) -> Result<Self, String> {
        let post_id = Uuid::parse_str(&post_id)
            .map_err(|_| "Invalid post_id: must be a valid UUID".to_string())?;

        let parent_comment_id = parent_comment_id
            .map(|id| {
                Uuid::parse_str(&id)
                    .map_err(|_| "Invalid parent_comment_id: must be a valid UUID".to_string())
            })
            .transpose()?;

        Ok(Self {
            text: CommentText::parse(text)?,
            post_id,
            parent_comment_id,
        })
    }
}
