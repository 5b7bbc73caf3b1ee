use std::collections::HashSet;

use anyhow::Context;
use async_trait::async_trait;
use tracing::Span;
use uuid::Uuid;

use crate::domain::{NewPost, PostRecord, PostStats, Slug};
use crate::repository::PgRepository;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_post_by_id(&self, post_id: Uuid) -> Result<Option<PostRecord>, anyhow::Error>;

    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, anyhow::Error>;

    /// Newest first, strictly after the post identified by `cursor`.
    async fn list_posts_after(
        &self,
        cursor: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<PostRecord>, anyhow::Error>;

    async fn search_posts(&self, keyword: &str) -> Result<Vec<PostRecord>, anyhow::Error>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, anyhow::Error>;

    /// Inserts the post together with a zeroed stats row.
    /// Returns `None` when the slug is already taken.
    async fn insert_post(
        &self,
        post: &NewPost,
        slug: &Slug,
        author_id: Uuid,
    ) -> Result<Option<Uuid>, anyhow::Error>;

    async fn delete_post(&self, post_id: Uuid) -> Result<bool, anyhow::Error>;

    async fn insert_post_like(&self, post_id: Uuid, user_id: Uuid) -> Result<(), anyhow::Error>;

    async fn delete_post_like(&self, post_id: Uuid, user_id: Uuid) -> Result<(), anyhow::Error>;

    async fn count_post_likes(&self, post_id: Uuid) -> Result<i64, anyhow::Error>;

    async fn update_post_likes(
        &self,
        post_id: Uuid,
        likes: i64,
    ) -> Result<Option<PostStats>, anyhow::Error>;

    async fn update_post_comments(&self, post_id: Uuid, comments: i64)
    -> Result<(), anyhow::Error>;

    /// The subset of `post_ids` that `user_id` has liked.
    async fn find_liked_post_ids(
        &self,
        user_id: Uuid,
        post_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, anyhow::Error>;
}

const POST_SELECT: &str = r#"
    SELECT p.id, p.slug, p.title, p.body, p.author_id, u.user_name AS author_name,
           s.likes, s.comments, p.created_at, p.updated_at
    FROM posts p
    INNER JOIN users u ON u.id = p.author_id
    INNER JOIN post_stats s ON s.post_id = p.id
"#;

#[async_trait]
impl PostRepository for PgRepository {
    #[tracing::instrument(skip(self))]
    async fn find_post_by_id(&self, post_id: Uuid) -> Result<Option<PostRecord>, anyhow::Error> {
        let query = format!("{POST_SELECT} WHERE p.id = $1");
        sqlx::query_as::<_, PostRecord>(&query)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch post by id")
    }

    #[tracing::instrument(skip(self))]
    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, anyhow::Error> {
        let query = format!("{POST_SELECT} WHERE p.slug = $1");
        sqlx::query_as::<_, PostRecord>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch post by slug")
    }

    #[tracing::instrument(skip(self))]
    async fn list_posts_after(
        &self,
        cursor: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<PostRecord>, anyhow::Error> {
        // An unknown cursor makes the row comparison NULL, which yields an empty page.
        let query = format!(
            r#"
            {POST_SELECT}
            WHERE $1::uuid IS NULL
               OR (p.created_at, p.id) < (SELECT c.created_at, c.id FROM posts c WHERE c.id = $1)
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $2
            "#
        );
        sqlx::query_as::<_, PostRecord>(&query)
            .bind(cursor)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch page of posts")
    }

    #[tracing::instrument(skip(self))]
    async fn search_posts(&self, keyword: &str) -> Result<Vec<PostRecord>, anyhow::Error> {
        // Case-sensitive substring match; the keyword is not a LIKE pattern.
        let query = format!(
            r#"
            {POST_SELECT}
            WHERE strpos(p.title, $1) > 0 OR strpos(p.body, $1) > 0
            ORDER BY p.created_at DESC, p.id DESC
            "#
        );
        sqlx::query_as::<_, PostRecord>(&query)
            .bind(keyword)
            .fetch_all(&self.pool)
            .await
            .context("Failed to search posts")
    }

    #[tracing::instrument(skip(self))]
    async fn slug_exists(&self, slug: &str) -> Result<bool, anyhow::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check whether slug exists")
    }

    #[tracing::instrument(
        skip(self, post),
        fields(post_id = tracing::field::Empty)
    )]
    async fn insert_post(
        &self,
        post: &NewPost,
        slug: &Slug,
        author_id: Uuid,
    ) -> Result<Option<Uuid>, anyhow::Error> {
        // Both inserts run in one statement, so a post never exists without its stats.
        let post_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            WITH new_post AS (
                INSERT INTO posts (id, slug, title, body, author_id)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (slug) DO NOTHING
                RETURNING id
            )
            INSERT INTO post_stats (post_id)
            SELECT id FROM new_post
            RETURNING post_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(slug.as_ref())
        .bind(post.title.as_ref())
        .bind(post.body.as_ref())
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to insert new post")?;

        if let Some(id) = post_id {
            Span::current().record("post_id", tracing::field::display(id));
        }
        Ok(post_id)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_post(&self, post_id: Uuid) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete post")?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn insert_post_like(&self, post_id: Uuid, user_id: Uuid) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            INSERT INTO post_likes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .context("Failed to add like to post")?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_post_like(&self, post_id: Uuid, user_id: Uuid) -> Result<(), anyhow::Error> {
        sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("Failed to remove like from post")?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn count_post_likes(&self, post_id: Uuid) -> Result<i64, anyhow::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post_likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count post likes")
    }

    #[tracing::instrument(skip(self))]
    async fn update_post_likes(
        &self,
        post_id: Uuid,
        likes: i64,
    ) -> Result<Option<PostStats>, anyhow::Error> {
        sqlx::query_as::<_, PostStats>(
            r#"
            UPDATE post_stats
            SET likes = $2
            WHERE post_id = $1
            RETURNING post_id, likes, comments
            "#,
        )
        .bind(post_id)
        .bind(likes)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update post likes count")
    }

    #[tracing::instrument(skip(self))]
    async fn update_post_comments(
        &self,
        post_id: Uuid,
        comments: i64,
    ) -> Result<(), anyhow::Error> {
        sqlx::query("UPDATE post_stats SET comments = $2 WHERE post_id = $1")
            .bind(post_id)
            .bind(comments)
            .execute(&self.pool)
            .await
            .context("Failed to update post comments count")?;

        Ok(())
    }

    #[tracing::instrument(skip(self, post_ids), fields(posts = post_ids.len()))]
    async fn find_liked_post_ids(
        &self,
        user_id: Uuid,
        post_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, anyhow::Error> {
        let liked = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT post_id
            FROM post_likes
            WHERE user_id = $1 AND post_id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch viewer's post likes")?;

        Ok(liked.into_iter().collect())
    }
}
