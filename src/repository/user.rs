use anyhow::Context;
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

use crate::domain::{UserName, UserSummary};
use crate::repository::PgRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns `None` when the user name is already taken.
    async fn insert_user(
        &self,
        user_name: &UserName,
        password_hash: Secret<String>,
    ) -> Result<Option<Uuid>, anyhow::Error>;

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<UserSummary>, anyhow::Error>;

    async fn get_stored_credentials(
        &self,
        user_name: &str,
    ) -> Result<Option<(Uuid, Secret<String>)>, anyhow::Error>;
}

#[async_trait]
impl UserRepository for PgRepository {
    #[tracing::instrument(skip(self, password_hash), fields(user_name = %user_name))]
    async fn insert_user(
        &self,
        user_name: &UserName,
        password_hash: Secret<String>,
    ) -> Result<Option<Uuid>, anyhow::Error> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (id, user_name, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_name) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_name.as_ref())
        .bind(password_hash.expose_secret())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to insert new user")
    }

    #[tracing::instrument(skip(self))]
    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<UserSummary>, anyhow::Error> {
        sqlx::query_as::<_, UserSummary>("SELECT id, user_name FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user by id")
    }

    #[tracing::instrument(skip(self))]
    async fn get_stored_credentials(
        &self,
        user_name: &str,
    ) -> Result<Option<(Uuid, Secret<String>)>, anyhow::Error> {
        let row = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT id, password_hash FROM users WHERE user_name = $1",
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to perform a query to retrieve stored credentials.")?
        .map(|(id, hash)| (id, Secret::new(hash)));

        Ok(row)
    }
}
