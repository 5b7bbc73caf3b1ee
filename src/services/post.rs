use std::collections::HashSet;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use uuid::Uuid;

use crate::domain::{
    NewPost, POSTS_PAGE_SIZE, PostPage, PostRecord, PostResponse, PostStats, SearchKeyword, Slug,
};
use crate::repository::PostRepository;
use crate::utils;

const SLUG_SUFFIX_LEN: usize = 6;
const MAX_SLUG_ATTEMPTS: usize = 5;

#[derive(thiserror::Error)]
pub enum PostError {
    #[error("{0}")]
    ValidationError(String),

    #[error("post not found")]
    NotFound,

    #[error("only the author may perform this action")]
    Unauthorized,

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for PostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        utils::error_chain_fmt(self, f)
    }
}

impl ResponseError for PostError {
    fn status_code(&self) -> StatusCode {
        match self {
            PostError::ValidationError(_) => StatusCode::BAD_REQUEST,
            PostError::NotFound => StatusCode::NOT_FOUND,
            PostError::Unauthorized => StatusCode::UNAUTHORIZED,
            PostError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            PostError::UnexpectedError(_) => utils::internal_error_response(),
            _ => utils::build_error_response(self.status_code(), self.to_string()),
        }
    }
}

/// Reads posts with their author and stats, and keeps the cached like
/// counter in line with the like rows.
pub struct PostService<R> {
    repository: R,
}

impl<R> PostService<R>
where
    R: PostRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(
        &self,
        post_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<PostResponse, PostError> {
        let record = self
            .repository
            .find_post_by_id(post_id)
            .await?
            .ok_or(PostError::NotFound)?;

        self.single_with_like_status(record, viewer).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_slug(
        &self,
        slug: &str,
        viewer: Option<Uuid>,
    ) -> Result<PostResponse, PostError> {
        let record = self
            .repository
            .find_post_by_slug(slug)
            .await?
            .ok_or(PostError::NotFound)?;

        self.single_with_like_status(record, viewer).await
    }

    /// One page of posts, newest first. `next_cursor` is only set when at
    /// least one more post exists after this page.
    #[tracing::instrument(skip(self))]
    pub async fn list_by_cursor(
        &self,
        cursor: Option<Uuid>,
        viewer: Option<Uuid>,
    ) -> Result<PostPage, PostError> {
        // One extra row tells whether another page exists.
        let fetch = i64::try_from(POSTS_PAGE_SIZE + 1).map_err(anyhow::Error::from)?;
        let mut records = self.repository.list_posts_after(cursor, fetch).await?;

        let has_more = records.len() > POSTS_PAGE_SIZE;
        records.truncate(POSTS_PAGE_SIZE);
        let next_cursor = if has_more {
            records.last().map(|r| r.id)
        } else {
            None
        };

        let posts = self.with_like_status(records, viewer).await?;
        Ok(PostPage { posts, next_cursor })
    }

    #[tracing::instrument(skip(self))]
    pub async fn search(
        &self,
        keyword: String,
        viewer: Option<Uuid>,
    ) -> Result<Vec<PostResponse>, PostError> {
        let keyword = SearchKeyword::parse(keyword).map_err(PostError::ValidationError)?;
        let records = self.repository.search_posts(keyword.as_ref()).await?;
        self.with_like_status(records, viewer).await
    }

    #[tracing::instrument(skip(self, post), fields(title = %post.title))]
    pub async fn create(&self, author_id: Uuid, post: NewPost) -> Result<PostResponse, PostError> {
        let base = Slug::from_title(&post.title);
        let mut slug = if self.repository.slug_exists(base.as_ref()).await? {
            base.with_suffix(&utils::random_suffix(SLUG_SUFFIX_LEN))
        } else {
            base.clone()
        };

        // A concurrent insert can still claim the slug between the check and
        // the insert, so draw a fresh suffix and try again.
        for _ in 0..MAX_SLUG_ATTEMPTS {
            if let Some(post_id) = self.repository.insert_post(&post, &slug, author_id).await? {
                tracing::info!(%post_id, %slug, "Post created");
                let record = self
                    .repository
                    .find_post_by_id(post_id)
                    .await?
                    .ok_or_else(|| anyhow::anyhow!("Post {post_id} vanished right after insert"))?;
                return Ok(PostResponse::from(record));
            }
            slug = base.with_suffix(&utils::random_suffix(SLUG_SUFFIX_LEN));
        }

        Err(anyhow::anyhow!("Could not find a free slug for \"{base}\"").into())
    }

    #[tracing::instrument(skip(self))]
    pub async fn like(&self, user_id: Uuid, post_id: Uuid) -> Result<PostStats, PostError> {
        self.ensure_exists(post_id).await?;
        self.repository.insert_post_like(post_id, user_id).await?;
        self.recount_likes(post_id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> Result<PostStats, PostError> {
        self.ensure_exists(post_id).await?;
        self.repository.delete_post_like(post_id, user_id).await?;
        self.recount_likes(post_id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, user_id: Uuid, post_id: Uuid) -> Result<(), PostError> {
        let post = self
            .repository
            .find_post_by_id(post_id)
            .await?
            .ok_or(PostError::NotFound)?;

        if post.author_id != user_id {
            return Err(PostError::Unauthorized);
        }

        if !self.repository.delete_post(post_id).await? {
            return Err(PostError::NotFound);
        }
        Ok(())
    }

    async fn ensure_exists(&self, post_id: Uuid) -> Result<(), PostError> {
        self.repository
            .find_post_by_id(post_id)
            .await?
            .map(|_| ())
            .ok_or(PostError::NotFound)
    }

    // The join table is the source of truth; the cached counter is derived
    // from it after every mutation instead of being incremented.
    async fn recount_likes(&self, post_id: Uuid) -> Result<PostStats, PostError> {
        let likes = self.repository.count_post_likes(post_id).await?;
        self.repository
            .update_post_likes(post_id, likes)
            .await?
            .ok_or(PostError::NotFound)
    }

    async fn single_with_like_status(
        &self,
        record: PostRecord,
        viewer: Option<Uuid>,
    ) -> Result<PostResponse, PostError> {
        let mut posts = self.with_like_status(vec![record], viewer).await?;
        posts
            .pop()
            .ok_or_else(|| anyhow::anyhow!("Like status merge dropped the post").into())
    }

    async fn with_like_status(
        &self,
        records: Vec<PostRecord>,
        viewer: Option<Uuid>,
    ) -> Result<Vec<PostResponse>, PostError> {
        let liked: Option<HashSet<Uuid>> = match viewer {
            Some(user_id) if !records.is_empty() => {
                let ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();
                Some(self.repository.find_liked_post_ids(user_id, &ids).await?)
            }
            Some(_) => Some(HashSet::new()),
            None => None,
        };

        Ok(records
            .into_iter()
            .map(|record| {
                let mut post = PostResponse::from(record);
                post.is_liked = liked.as_ref().map(|ids| ids.contains(&post.id));
                post
            })
            .collect())
    }
}
