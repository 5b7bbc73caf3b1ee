use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::NewComment;

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct CommentRecord {
    pub id: Uuid,
    pub text: String,
    pub post_id: Uuid,
    pub parent_comment_id: Option<Uuid>,
    pub level: i16,
    pub likes: i64,
    pub sub_comments_count: i64,
    pub author_id: Uuid,
    pub author_name: String,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentRecord {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

// Both fields are null once a deleted comment has been masked.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CommentAuthor {
    pub id: Option<Uuid>,
    pub user_name: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct CommentResponse {
    pub id: Uuid,
    pub text: String,
    pub post_id: Uuid,
    pub parent_comment_id: Option<Uuid>,
    pub level: i16,
    pub likes: i64,
    pub sub_comments_count: i64,
    pub author: CommentAuthor,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
}

impl From<CommentRecord> for CommentResponse {
    fn from(record: CommentRecord) -> Self {
        let is_deleted = record.is_deleted();
        Self {
            id: record.id,
            text: record.text,
            post_id: record.post_id,
            parent_comment_id: record.parent_comment_id,
            level: record.level,
            likes: record.likes,
            sub_comments_count: record.sub_comments_count,
            author: CommentAuthor {
                id: Some(record.author_id),
                user_name: Some(record.author_name),
            },
            created_at: record.created_at,
            updated_at: record.updated_at,
            is_deleted,
            is_liked: None,
        }
    }
}

/// A root comment with its direct replies.
#[derive(Serialize, Debug)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub sub_comments: Vec<CommentResponse>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CommentLikes {
    pub comment_id: Uuid,
    pub likes: i64,
}

#[derive(Deserialize, Debug)]
pub struct CreateCommentPayload {
    pub text: String,
    pub post_id: String,
    #[serde(default)]
    pub parent_comment_id: Option<String>,
}

impl TryFrom<CreateCommentPayload> for NewComment {
    type Error = String;

    fn try_from(value: CreateCommentPayload) -> Result<Self, Self::Error> {
        NewComment::new(value.text, value.post_id, value.parent_comment_id)
    }
}
