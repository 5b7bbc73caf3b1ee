use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::NewPost;

/// Posts per page of the cursor-paginated listing.
pub const POSTS_PAGE_SIZE: usize = 20;

// Posts joined with their author's name and their stats row.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct PostRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub likes: i64,
    pub comments: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PostStats {
    pub post_id: Uuid,
    pub likes: i64,
    pub comments: i64,
}

#[derive(Serialize, Debug, Clone)]
pub struct PostAuthor {
    pub id: Uuid,
    pub user_name: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct PostResponse {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub author: PostAuthor,
    pub stats: PostStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
}

impl From<PostRecord> for PostResponse {
    fn from(record: PostRecord) -> Self {
        Self {
            id: record.id,
            slug: record.slug,
            title: record.title,
            body: record.body,
            author: PostAuthor {
                id: record.author_id,
                user_name: record.author_name,
            },
            stats: PostStats {
                post_id: record.id,
                likes: record.likes,
                comments: record.comments,
            },
            created_at: record.created_at,
            updated_at: record.updated_at,
            is_liked: None,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct PostPage {
    pub posts: Vec<PostResponse>,
    pub next_cursor: Option<Uuid>,
}

#[derive(Deserialize, Debug)]
pub struct CreatePostPayload {
    pub title: String,
    pub body: String,
}

impl TryFrom<CreatePostPayload> for NewPost {
    type Error = String;

    fn try_from(payload: CreatePostPayload) -> Result<Self, Self::Error> {
        NewPost::new(payload.title, payload.body)
    }
}

#[derive(Deserialize, Debug)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub cursor: Option<Uuid>,
}

#[derive(Deserialize, Debug)]
pub struct SearchPostsQuery {
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug)]
pub struct SearchKeyword(String);

impl SearchKeyword {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Invalid keyword: cannot be empty.".to_string());
        }

        if trimmed.contains('\0') {
            return Err("Invalid keyword: cannot contain NUL characters.".to_string());
        }

        if trimmed.chars().count() > 100 {
            return Err("Invalid keyword: cannot exceed 100 characters.".to_string());
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for SearchKeyword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
