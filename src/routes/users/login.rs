use actix_web::{HttpResponse, web};
use tracing::Span;

use crate::{
    authentication::Credentials,
    domain::LoginData,
    repository::PgRepository,
    services::{UserError, UserService},
    session_state::TypedSession,
};

#[tracing::instrument(
    skip_all,
    fields(user_name = tracing::field::Empty, user_id = tracing::field::Empty)
)]
pub async fn login(
    payload: web::Json<LoginData>,
    users: web::Data<UserService<PgRepository>>,
    session: TypedSession,
) -> Result<HttpResponse, UserError> {
    // A malformed user name cannot match anyone; report it like any other bad login.
    let credentials: Credentials = payload
        .0
        .try_into()
        .map_err(|e: String| UserError::AuthError(anyhow::anyhow!(e)))?;

    Span::current().record("user_name", tracing::field::display(&credentials.user_name));

    let user_id = users.authenticate(credentials).await?;
    Span::current().record("user_id", tracing::field::display(&user_id));

    session.renew();
    session.insert_user_id(user_id)?;

    Ok(HttpResponse::Ok().finish())
}

pub async fn log_out(session: TypedSession) -> HttpResponse {
    session.log_out();
    HttpResponse::Ok().finish()
}
