use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use anyhow::Context;
use uuid::Uuid;

use crate::authentication::{self, AuthError, Credentials};
use crate::domain::{NewUser, UserSummary};
use crate::repository::UserRepository;
use crate::{telemetry, utils};

#[derive(thiserror::Error)]
pub enum UserError {
    #[error("{0}")]
    ValidationError(String),

    #[error("user not found")]
    NotFound,

    #[error("user name is already taken")]
    Conflict,

    #[error("Authentication failed")]
    AuthError(#[source] anyhow::Error),

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        utils::error_chain_fmt(self, f)
    }
}

impl ResponseError for UserError {
    fn status_code(&self) -> StatusCode {
        match self {
            UserError::ValidationError(_) => StatusCode::BAD_REQUEST,
            UserError::NotFound => StatusCode::NOT_FOUND,
            UserError::Conflict => StatusCode::CONFLICT,
            UserError::AuthError(_) => StatusCode::UNAUTHORIZED,
            UserError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            UserError::UnexpectedError(_) => utils::internal_error_response(),
            _ => utils::build_error_response(self.status_code(), self.to_string()),
        }
    }
}

pub struct UserService<R> {
    repository: R,
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip_all, fields(user_name = %user.user_name))]
    pub async fn register(&self, user: NewUser) -> Result<UserSummary, UserError> {
        let NewUser {
            user_name,
            password,
        } = user;

        let password_hash = telemetry::spawn_blocking_with_tracing(move || {
            authentication::compute_password_hash(password.into_secret())
        })
        .await
        .context("Failed to spawn blocking task.")?
        .context("Failed to hash password")?;

        let id = self
            .repository
            .insert_user(&user_name, password_hash)
            .await?
            .ok_or(UserError::Conflict)?;
        tracing::info!(user_id = %id, "User registered");

        Ok(UserSummary {
            id,
            user_name: user_name.as_ref().to_string(),
        })
    }

    #[tracing::instrument(skip_all, fields(user_name = %credentials.user_name))]
    pub async fn authenticate(&self, credentials: Credentials) -> Result<Uuid, UserError> {
        authentication::validate_credentials(credentials, &self.repository)
            .await
            .map_err(|e| match e {
                AuthError::InvalidCredentials(_) => UserError::AuthError(e.into()),
                AuthError::UnexpectedError(_) => UserError::UnexpectedError(e.into()),
            })
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, user_id: Uuid) -> Result<UserSummary, UserError> {
        self.repository
            .find_user_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)
    }
}
