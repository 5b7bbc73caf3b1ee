use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::authentication::{UserId, Viewer};
use crate::domain::{CreatePostPayload, ListPostsQuery, NewPost, SearchPostsQuery};
use crate::repository::PgRepository;
use crate::services::{PostError, PostService};

type Posts = web::Data<PostService<PgRepository>>;

#[derive(Deserialize, Debug)]
pub struct PostPathParams {
    pub id: Uuid,
}

#[derive(Deserialize, Debug)]
pub struct SlugPathParams {
    pub slug: String,
}

#[tracing::instrument(skip(query, posts, viewer), fields(cursor = ?query.cursor))]
pub async fn list_posts(
    query: web::Query<ListPostsQuery>,
    posts: Posts,
    viewer: Viewer,
) -> Result<HttpResponse, PostError> {
    let page = posts
        .list_by_cursor(query.into_inner().cursor, viewer.user_id())
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

#[tracing::instrument(skip(posts, viewer))]
pub async fn search_posts(
    query: web::Query<SearchPostsQuery>,
    posts: Posts,
    viewer: Viewer,
) -> Result<HttpResponse, PostError> {
    let found = posts
        .search(query.into_inner().keyword, viewer.user_id())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "posts": found })))
}

#[tracing::instrument(skip(posts, viewer), fields(post_id = %path.id))]
pub async fn get_post(
    path: web::Path<PostPathParams>,
    posts: Posts,
    viewer: Viewer,
) -> Result<HttpResponse, PostError> {
    let post = posts.get_by_id(path.id, viewer.user_id()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "post": post })))
}

#[tracing::instrument(skip(posts, viewer), fields(slug = %path.slug))]
pub async fn get_post_by_slug(
    path: web::Path<SlugPathParams>,
    posts: Posts,
    viewer: Viewer,
) -> Result<HttpResponse, PostError> {
    let post = posts.get_by_slug(&path.slug, viewer.user_id()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "post": post })))
}

#[tracing::instrument(skip(payload, posts), fields(user_id = %&*user_id))]
pub async fn create_post(
    payload: web::Json<CreatePostPayload>,
    posts: Posts,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, PostError> {
    let new_post: NewPost = payload.0.try_into().map_err(PostError::ValidationError)?;

    let post = posts.create(**user_id, new_post).await?;

    Ok(HttpResponse::Created().json(post))
}

#[tracing::instrument(skip(posts), fields(post_id = %path.id, user_id = %&*user_id))]
pub async fn like_post(
    path: web::Path<PostPathParams>,
    posts: Posts,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, PostError> {
    let stats = posts.like(**user_id, path.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "stats": stats })))
}

#[tracing::instrument(skip(posts), fields(post_id = %path.id, user_id = %&*user_id))]
pub async fn unlike_post(
    path: web::Path<PostPathParams>,
    posts: Posts,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, PostError> {
    let stats = posts.unlike(**user_id, path.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "stats": stats })))
}

#[tracing::instrument(skip(posts), fields(post_id = %path.id, user_id = %&*user_id))]
pub async fn delete_post(
    path: web::Path<PostPathParams>,
    posts: Posts,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, PostError> {
    posts.delete(**user_id, path.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "post deleted successfully" })))
}
