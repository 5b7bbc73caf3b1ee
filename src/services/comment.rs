use std::collections::HashSet;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use uuid::Uuid;

use crate::domain::{
    CommentLikes, CommentRecord, CommentResponse, CommentThread, NewComment, group_into_threads,
    mask_deleted, reply_level,
};
use crate::repository::{CommentRepository, PostRepository};
use crate::utils;

#[derive(thiserror::Error)]
pub enum CommentError {
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("only the author may perform this action")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for CommentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        utils::error_chain_fmt(self, f)
    }
}

impl ResponseError for CommentError {
    fn status_code(&self) -> StatusCode {
        match self {
            CommentError::ValidationError(_) | CommentError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            CommentError::NotFound(_) => StatusCode::NOT_FOUND,
            CommentError::Unauthorized => StatusCode::UNAUTHORIZED,
            CommentError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            CommentError::UnexpectedError(_) => utils::internal_error_response(),
            _ => utils::build_error_response(self.status_code(), self.to_string()),
        }
    }
}

const POST_NOT_FOUND: &str = "post not found";
const COMMENT_NOT_FOUND: &str = "comment not found";
const PARENT_NOT_FOUND: &str = "parent comment not found";

/// Comments form a two-level tree under a post. Deleting one only marks
/// it, and readers get a masked placeholder in its place.
pub struct CommentService<R> {
    repository: R,
}

impl<R> CommentService<R>
where
    R: PostRepository + CommentRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Every comment on the post, grouped into root comments with their
    /// replies, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        slug: &str,
        viewer: Option<Uuid>,
    ) -> Result<Vec<CommentThread>, CommentError> {
        let post = self
            .repository
            .find_post_by_slug(slug)
            .await?
            .ok_or(CommentError::NotFound(POST_NOT_FOUND))?;

        let records = self.repository.list_comments_for_post(post.id).await?;
        let comments = self.with_like_status(records, viewer).await?;

        Ok(group_into_threads(mask_deleted(comments)))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(
        &self,
        comment_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<CommentResponse, CommentError> {
        let record = self.find_live(comment_id).await?;
        let mut comments = self.with_like_status(vec![record], viewer).await?;
        comments
            .pop()
            .ok_or_else(|| anyhow::anyhow!("Like status merge dropped the comment").into())
    }

    #[tracing::instrument(
        skip(self, comment),
        fields(post_id = %comment.post_id, parent_comment_id = ?comment.parent_comment_id)
    )]
    pub async fn create(
        &self,
        author_id: Uuid,
        comment: NewComment,
    ) -> Result<CommentResponse, CommentError> {
        self.repository
            .find_post_by_id(comment.post_id)
            .await?
            .ok_or(CommentError::NotFound(POST_NOT_FOUND))?;

        let level = match comment.parent_comment_id {
            None => 0,
            Some(parent_id) => {
                let parent = self
                    .repository
                    .find_comment_by_id(parent_id)
                    .await?
                    .filter(|p| !p.is_deleted())
                    .ok_or(CommentError::NotFound(PARENT_NOT_FOUND))?;

                if parent.post_id != comment.post_id {
                    return Err(CommentError::BadRequest(
                        "Parent comment belongs to a different post".to_string(),
                    ));
                }

                reply_level(parent.level).ok_or_else(|| {
                    CommentError::BadRequest("Replies to replies are not allowed".to_string())
                })?
            }
        };

        let comment_id = self
            .repository
            .insert_comment(&comment, level, author_id)
            .await?;
        tracing::info!(%comment_id, level, "Comment created");

        if let Some(parent_id) = comment.parent_comment_id {
            let replies = self.repository.count_replies(parent_id).await?;
            self.repository
                .update_sub_comments_count(parent_id, replies)
                .await?;
        }
        let total = self
            .repository
            .count_comments_for_post(comment.post_id)
            .await?;
        self.repository
            .update_post_comments(comment.post_id, total)
            .await?;

        let record = self
            .repository
            .find_comment_by_id(comment_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Comment {comment_id} vanished right after insert"))?;
        Ok(CommentResponse::from(record))
    }

    /// Marks the comment deleted. Replies, counters and like rows are left
    /// as they are.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, user_id: Uuid, comment_id: Uuid) -> Result<(), CommentError> {
        let comment = self.find_live(comment_id).await?;

        if comment.author_id != user_id {
            return Err(CommentError::Unauthorized);
        }

        // Lost a race with another delete of the same comment.
        if !self.repository.soft_delete_comment(comment_id).await? {
            return Err(CommentError::NotFound(COMMENT_NOT_FOUND));
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn like(&self, user_id: Uuid, comment_id: Uuid) -> Result<CommentLikes, CommentError> {
        self.find_live(comment_id).await?;
        self.repository
            .insert_comment_like(comment_id, user_id)
            .await?;
        self.recount_likes(comment_id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn unlike(
        &self,
        user_id: Uuid,
        comment_id: Uuid,
    ) -> Result<CommentLikes, CommentError> {
        self.find_live(comment_id).await?;
        self.repository
            .delete_comment_like(comment_id, user_id)
            .await?;
        self.recount_likes(comment_id).await
    }

    async fn find_live(&self, comment_id: Uuid) -> Result<CommentRecord, CommentError> {
        self.repository
            .find_comment_by_id(comment_id)
            .await?
            .filter(|c| !c.is_deleted())
            .ok_or(CommentError::NotFound(COMMENT_NOT_FOUND))
    }

    async fn recount_likes(&self, comment_id: Uuid) -> Result<CommentLikes, CommentError> {
        let likes = self.repository.count_comment_likes(comment_id).await?;
        let likes = self
            .repository
            .update_comment_likes(comment_id, likes)
            .await?
            .ok_or(CommentError::NotFound(COMMENT_NOT_FOUND))?;

        Ok(CommentLikes { comment_id, likes })
    }

    async fn with_like_status(
        &self,
        records: Vec<CommentRecord>,
        viewer: Option<Uuid>,
    ) -> Result<Vec<CommentResponse>, CommentError> {
        let liked: Option<HashSet<Uuid>> = match viewer {
            Some(user_id) => {
                let live: Vec<Uuid> = records
                    .iter()
                    .filter(|c| !c.is_deleted())
                    .map(|c| c.id)
                    .collect();
                if live.is_empty() {
                    Some(HashSet::new())
                } else {
                    Some(
                        self.repository
                            .find_liked_comment_ids(user_id, &live)
                            .await?,
                    )
                }
            }
            None => None,
        };

        Ok(records
            .into_iter()
            .map(|record| {
                let mut comment = CommentResponse::from(record);
                comment.is_liked = liked.as_ref().map(|ids| ids.contains(&comment.id));
                comment
            })
            .collect())
    }
}
