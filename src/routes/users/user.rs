use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    repository::PgRepository,
    services::{UserError, UserService},
};

#[derive(Deserialize, Debug)]
pub struct UserPathParams {
    pub id: Uuid,
}

#[tracing::instrument(skip(users), fields(user_id = %path.id))]
pub async fn get_user(
    path: web::Path<UserPathParams>,
    users: web::Data<UserService<PgRepository>>,
) -> Result<HttpResponse, UserError> {
    let user = users.find_by_id(path.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": user })))
}
