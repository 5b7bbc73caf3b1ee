use actix_web::{HttpResponse, web};
use tracing::{Span, field};

use crate::{
    domain::{NewUser, RegisterData},
    repository::PgRepository,
    services::{UserError, UserService},
};

#[tracing::instrument(skip_all, fields(user_name = tracing::field::Empty))]
pub async fn register_user(
    payload: web::Json<RegisterData>,
    users: web::Data<UserService<PgRepository>>,
) -> Result<HttpResponse, UserError> {
    let new_user: NewUser = payload.0.try_into().map_err(UserError::ValidationError)?;
    Span::current().record("user_name", field::display(&new_user.user_name));

    let user = users.register(new_user).await?;

    Ok(HttpResponse::Created().json(user))
}
