use std::collections::HashSet;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{CommentRecord, NewComment};
use crate::repository::PgRepository;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Includes soft-deleted comments.
    async fn find_comment_by_id(
        &self,
        comment_id: Uuid,
    ) -> Result<Option<CommentRecord>, anyhow::Error>;

    /// Every comment on the post, deleted or not, oldest first and roots
    /// before replies created at the same instant.
    async fn list_comments_for_post(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<CommentRecord>, anyhow::Error>;

    async fn insert_comment(
        &self,
        comment: &NewComment,
        level: i16,
        author_id: Uuid,
    ) -> Result<Uuid, anyhow::Error>;

    async fn count_replies(&self, parent_comment_id: Uuid) -> Result<i64, anyhow::Error>;

    async fn update_sub_comments_count(
        &self,
        comment_id: Uuid,
        count: i64,
    ) -> Result<(), anyhow::Error>;

    async fn count_comments_for_post(&self, post_id: Uuid) -> Result<i64, anyhow::Error>;

    async fn soft_delete_comment(&self, comment_id: Uuid) -> Result<bool, anyhow::Error>;

    async fn insert_comment_like(&self, comment_id: Uuid, user_id: Uuid)
    -> Result<(), anyhow::Error>;

    async fn delete_comment_like(&self, comment_id: Uuid, user_id: Uuid)
    -> Result<(), anyhow::Error>;

    async fn count_comment_likes(&self, comment_id: Uuid) -> Result<i64, anyhow::Error>;

    async fn update_comment_likes(
        &self,
        comment_id: Uuid,
        likes: i64,
    ) -> Result<Option<i64>, anyhow::Error>;

    async fn find_liked_comment_ids(
        &self,
        user_id: Uuid,
        comment_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, anyhow::Error>;
}

const COMMENT_SELECT: &str = r#"
    SELECT c.id, c.text, c.post_id, c.parent_comment_id, c.level, c.likes,
           c.sub_comments_count, c.author_id, u.user_name AS author_name,
           c.deleted_at, c.created_at, c.updated_at
    FROM comments c
    INNER JOIN users u ON u.id = c.author_id
"#;

#[async_trait]
impl CommentRepository for PgRepository {
    #[tracing::instrument(skip(self))]
    async fn find_comment_by_id(
        &self,
        comment_id: Uuid,
    ) -> Result<Option<CommentRecord>, anyhow::Error> {
        let query = format!("{COMMENT_SELECT} WHERE c.id = $1");
        sqlx::query_as::<_, CommentRecord>(&query)
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch comment by id")
    }

    #[tracing::instrument(skip(self))]
    async fn list_comments_for_post(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<CommentRecord>, anyhow::Error> {
        let query = format!(
            r#"
            {COMMENT_SELECT}
            WHERE c.post_id = $1
            ORDER BY c.created_at ASC, c.level ASC, c.id ASC
            "#
        );
        sqlx::query_as::<_, CommentRecord>(&query)
            .bind(post_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to load comments for post")
    }

    #[tracing::instrument(skip(self, comment), fields(post_id = %comment.post_id))]
    async fn insert_comment(
        &self,
        comment: &NewComment,
        level: i16,
        author_id: Uuid,
    ) -> Result<Uuid, anyhow::Error> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO comments (id, text, author_id, post_id, parent_comment_id, level)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(comment.text.as_ref())
        .bind(author_id)
        .bind(comment.post_id)
        .bind(comment.parent_comment_id)
        .bind(level)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert comment")
    }

    #[tracing::instrument(skip(self))]
    async fn count_replies(&self, parent_comment_id: Uuid) -> Result<i64, anyhow::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE parent_comment_id = $1")
            .bind(parent_comment_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count replies")
    }

    #[tracing::instrument(skip(self))]
    async fn update_sub_comments_count(
        &self,
        comment_id: Uuid,
        count: i64,
    ) -> Result<(), anyhow::Error> {
        sqlx::query("UPDATE comments SET sub_comments_count = $2 WHERE id = $1")
            .bind(comment_id)
            .bind(count)
            .execute(&self.pool)
            .await
            .context("Failed to update reply count")?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn count_comments_for_post(&self, post_id: Uuid) -> Result<i64, anyhow::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count comments for post")
    }

    #[tracing::instrument(skip(self))]
    async fn soft_delete_comment(&self, comment_id: Uuid) -> Result<bool, anyhow::Error> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET deleted_at = $1
            WHERE id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(Utc::now())
        .bind(comment_id)
        .execute(&self.pool)
        .await
        .context("Failed to mark comment as deleted")?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn insert_comment_like(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            INSERT INTO comment_likes (comment_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (comment_id, user_id) DO NOTHING
            "#,
        )
        .bind(comment_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .context("Failed to add like to comment")?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_comment_like(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), anyhow::Error> {
        sqlx::query("DELETE FROM comment_likes WHERE comment_id = $1 AND user_id = $2")
            .bind(comment_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("Failed to remove like from comment")?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn count_comment_likes(&self, comment_id: Uuid) -> Result<i64, anyhow::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comment_likes WHERE comment_id = $1")
            .bind(comment_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count comment likes")
    }

    #[tracing::instrument(skip(self))]
    async fn update_comment_likes(
        &self,
        comment_id: Uuid,
        likes: i64,
    ) -> Result<Option<i64>, anyhow::Error> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE comments SET likes = $2 WHERE id = $1 RETURNING likes",
        )
        .bind(comment_id)
        .bind(likes)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update comment likes count")
    }

    #[tracing::instrument(skip(self, comment_ids), fields(comments = comment_ids.len()))]
    async fn find_liked_comment_ids(
        &self,
        user_id: Uuid,
        comment_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, anyhow::Error> {
        let liked = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT comment_id
            FROM comment_likes
            WHERE user_id = $1 AND comment_id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(comment_ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch viewer's comment likes")?;

        Ok(liked.into_iter().collect())
    }
}
