use crate::helpers::{id_of, spawn_app};
use serde_json::{Value, json};
use uuid::Uuid;

// ============================================================================
// Create Comment
// ============================================================================

#[tokio::test]
async fn create_comment_returns_201_for_valid_input() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = id_of(&app.create_sample_post("Post for comments").await);

    let response = app
        .create_comment(&json!({
            "text": "This is a test comment",
            "post_id": post_id.to_string()
        }))
        .await;
    assert_eq!(
        response.status().as_u16(),
        201,
        "Expected 201 Created for valid comment creation"
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["post_id"], post_id.to_string());
    assert_eq!(body["text"], "This is a test comment");
    assert_eq!(body["level"], 0);
    assert!(body["parent_comment_id"].is_null());
    assert_eq!(body["author"]["user_name"], app.test_user.user_name);

    let post: Value = app.get_post(&post_id).await.json().await.unwrap();
    assert_eq!(post["post"]["stats"]["comments"], 1);
}

#[tokio::test]
async fn create_comment_requires_login() {
    let app = spawn_app().await;

    let response = app
        .create_comment(&json!({ "text": "hello", "post_id": Uuid::new_v4().to_string() }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn create_comment_returns_400_for_invalid_payload() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = id_of(&app.create_sample_post("Validated").await).to_string();

    let cases = vec![
        (json!({ "text": "hi", "post_id": "not-a-uuid" }), "invalid post id"),
        (json!({ "text": "", "post_id": post_id }), "empty text"),
        (json!({ "text": "x".repeat(201), "post_id": post_id }), "text too long"),
        (
            json!({ "text": "hi", "post_id": post_id, "parent_comment_id": "nope" }),
            "invalid parent id",
        ),
        (json!({ "post_id": post_id }), "missing text"),
        (json!({ "text": "nul\0byte", "post_id": post_id }), "NUL in text"),
    ];

    for (payload, description) in cases {
        let response = app.create_comment(&payload).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "The API did not return 400 for {description}."
        );
    }
}

#[tokio::test]
async fn commenting_on_a_missing_post_returns_404() {
    let app = spawn_app().await;
    app.login().await;

    let response = app
        .create_comment(&json!({ "text": "hello?", "post_id": Uuid::new_v4().to_string() }))
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn reply_increments_parent_reply_count() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = id_of(&app.create_sample_post("Threaded").await);
    let root = app.create_sample_comment(&post_id, "root", None).await;

    app.create_sample_comment(&post_id, "reply one", Some(&root)).await;
    app.create_sample_comment(&post_id, "reply two", Some(&root)).await;

    let body: Value = app.get_comment(&root).await.json().await.unwrap();
    assert_eq!(body["comment"]["sub_comments_count"], 2);

    let post: Value = app.get_post(&post_id).await.json().await.unwrap();
    assert_eq!(post["post"]["stats"]["comments"], 3);
}

#[tokio::test]
async fn replying_to_a_reply_returns_400() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = id_of(&app.create_sample_post("Shallow").await);
    let root = app.create_sample_comment(&post_id, "root", None).await;
    let reply = app.create_sample_comment(&post_id, "reply", Some(&root)).await;

    let response = app
        .create_comment(&json!({
            "text": "too deep",
            "post_id": post_id.to_string(),
            "parent_comment_id": reply.to_string(),
        }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn replying_to_a_deleted_comment_returns_404() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = id_of(&app.create_sample_post("Gone parent").await);
    let root = app.create_sample_comment(&post_id, "root", None).await;
    app.delete_comment(&root).await.error_for_status().unwrap();

    let response = app
        .create_comment(&json!({
            "text": "anyone there?",
            "post_id": post_id.to_string(),
            "parent_comment_id": root.to_string(),
        }))
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

// ============================================================================
// List Comments
// ============================================================================

#[tokio::test]
async fn comments_are_grouped_under_their_root_with_deleted_ones_masked() {
    let app = spawn_app().await;
    app.login().await;
    let post = app.create_sample_post("Discussion").await;
    let post_id = id_of(&post);
    let slug = post["slug"].as_str().unwrap();

    let a = app.create_sample_comment(&post_id, "A", None).await;
    let b = app.create_sample_comment(&post_id, "B", None).await;
    let b1 = app.create_sample_comment(&post_id, "B1", Some(&b)).await;
    let c = app.create_sample_comment(&post_id, "C", None).await;
    let b2 = app.create_sample_comment(&post_id, "B2", Some(&b)).await;
    app.delete_comment(&c).await.error_for_status().unwrap();

    let response = app.list_comments(slug).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let threads = body["comments"].as_array().unwrap();

    let roots: Vec<Uuid> = threads.iter().map(id_of).collect();
    assert_eq!(roots, vec![a, b, c]);

    let replies: Vec<Uuid> = threads[1]["sub_comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(id_of)
        .collect();
    assert_eq!(replies, vec![b1, b2]);

    let deleted = &threads[2];
    assert_eq!(deleted["is_deleted"], true);
    assert_eq!(deleted["text"], "");
    assert_eq!(deleted["likes"], 0);
    assert!(deleted["author"]["id"].is_null());
    assert!(deleted["author"]["user_name"].is_null());
    assert_eq!(deleted["created_at"], "1970-01-01T00:00:00Z");
    assert!(deleted["sub_comments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deleted_comments_still_count_towards_post_comments() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = id_of(&app.create_sample_post("Counted").await);
    let comment = app.create_sample_comment(&post_id, "soon gone", None).await;

    app.delete_comment(&comment).await.error_for_status().unwrap();

    let post: Value = app.get_post(&post_id).await.json().await.unwrap();
    assert_eq!(post["post"]["stats"]["comments"], 1);
}

#[tokio::test]
async fn listing_comments_for_a_missing_post_returns_404() {
    let app = spawn_app().await;

    assert_eq!(app.list_comments("no-such-post").await.status().as_u16(), 404);
}

// ============================================================================
// Get / Delete Comment
// ============================================================================

#[tokio::test]
async fn deleted_comment_is_not_found_by_id() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = id_of(&app.create_sample_post("Ephemeral").await);
    let comment = app.create_sample_comment(&post_id, "bye", None).await;

    assert_eq!(app.get_comment(&comment).await.status().as_u16(), 200);
    assert_eq!(app.delete_comment(&comment).await.status().as_u16(), 200);

    assert_eq!(app.get_comment(&comment).await.status().as_u16(), 404);
    assert_eq!(app.delete_comment(&comment).await.status().as_u16(), 404);

    let (deleted_at_set,): (bool,) =
        sqlx::query_as("SELECT deleted_at IS NOT NULL FROM comments WHERE id = $1")
            .bind(comment)
            .fetch_one(&app.db_pool)
            .await
            .expect("Soft-deleted comment row should remain");
    assert!(deleted_at_set);
}

#[tokio::test]
async fn only_the_author_can_delete_a_comment() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = id_of(&app.create_sample_post("Mine").await);
    let comment = app.create_sample_comment(&post_id, "my words", None).await;

    let (_, other) = app.other_user().await;
    let response = app
        .delete_as(&other, &format!("v1/comment/me/delete/{comment}"))
        .await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(app.get_comment(&comment).await.status().as_u16(), 200);
}

// ============================================================================
// Comment Likes
// ============================================================================

#[tokio::test]
async fn comment_likes_count_distinct_users() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = id_of(&app.create_sample_post("Likes").await);
    let comment = app.create_sample_comment(&post_id, "like me", None).await;

    let first: Value = app.like_comment(&comment).await.json().await.unwrap();
    let again: Value = app.like_comment(&comment).await.json().await.unwrap();
    assert_eq!(first["likes"], 1);
    assert_eq!(again["likes"], 1);
    assert_eq!(again["comment_id"], comment.to_string());

    let (_, other) = app.other_user().await;
    let both: Value = app
        .patch_as(&other, &format!("v1/comment/me/like/{comment}"))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(both["likes"], 2);

    let after: Value = app.unlike_comment(&comment).await.json().await.unwrap();
    assert_eq!(after["likes"], 1);

    let listed: Value = app.get_comment(&comment).await.json().await.unwrap();
    assert_eq!(listed["comment"]["is_liked"], false);
}

#[tokio::test]
async fn liking_a_deleted_comment_returns_404() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = id_of(&app.create_sample_post("Unlikeable").await);
    let comment = app.create_sample_comment(&post_id, "removed", None).await;
    app.delete_comment(&comment).await.error_for_status().unwrap();

    assert_eq!(app.like_comment(&comment).await.status().as_u16(), 404);
    assert_eq!(app.unlike_comment(&comment).await.status().as_u16(), 404);
}
