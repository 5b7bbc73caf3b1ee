use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    authentication::{UserId, Viewer},
    domain::{CreateCommentPayload, NewComment},
    repository::PgRepository,
    services::{CommentError, CommentService},
};

type Comments = web::Data<CommentService<PgRepository>>;

#[derive(Deserialize, Debug)]
pub struct CommentPathParams {
    pub id: Uuid,
}

#[derive(Deserialize, Debug)]
pub struct PostSlugPathParams {
    pub slug: String,
}

#[tracing::instrument(skip(comments, viewer), fields(slug = %path.slug))]
pub async fn show_comments_for_post(
    path: web::Path<PostSlugPathParams>,
    comments: Comments,
    viewer: Viewer,
) -> Result<HttpResponse, CommentError> {
    let threads = comments
        .list(&path.slug, viewer.user_id())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "comments": threads })))
}

#[tracing::instrument(skip(comments, viewer), fields(comment_id = %path.id))]
pub async fn get_comment(
    path: web::Path<CommentPathParams>,
    comments: Comments,
    viewer: Viewer,
) -> Result<HttpResponse, CommentError> {
    let comment = comments.get_by_id(path.id, viewer.user_id()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "comment": comment })))
}

#[tracing::instrument(skip(payload, comments), fields(user_id = %&*user_id))]
pub async fn create_comment(
    payload: web::Json<CreateCommentPayload>,
    comments: Comments,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, CommentError> {
    let comment: NewComment = payload
        .0
        .try_into()
        .map_err(CommentError::ValidationError)?;

    let created = comments.create(**user_id, comment).await?;

    Ok(HttpResponse::Created().json(created))
}

#[tracing::instrument(skip(comments), fields(comment_id = %path.id, user_id = %&*user_id))]
pub async fn delete_comment(
    path: web::Path<CommentPathParams>,
    comments: Comments,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, CommentError> {
    comments.delete(**user_id, path.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "comment deleted successfully" })))
}

#[tracing::instrument(skip(comments), fields(comment_id = %path.id, user_id = %&*user_id))]
pub async fn like_comment(
    path: web::Path<CommentPathParams>,
    comments: Comments,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, CommentError> {
    let likes = comments.like(**user_id, path.id).await?;

    Ok(HttpResponse::Ok().json(likes))
}

#[tracing::instrument(skip(comments), fields(comment_id = %path.id, user_id = %&*user_id))]
pub async fn unlike_comment(
    path: web::Path<CommentPathParams>,
    comments: Comments,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, CommentError> {
    let likes = comments.unlike(**user_id, path.id).await?;

    Ok(HttpResponse::Ok().json(likes))
}
