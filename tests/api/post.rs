use crate::helpers::{id_of, spawn_app};
use serde_json::{Value, json};
use std::collections::HashSet;
use uuid::Uuid;

// ============================================================================
// Create Post
// ============================================================================

#[tokio::test]
async fn user_must_be_logged_in_to_create_post() {
    let app = spawn_app().await;

    let response = app
        .create_post(&json!({ "title": "Some title", "body": "Post content here..." }))
        .await;

    assert_eq!(
        401,
        response.status().as_u16(),
        "The API did not return 401 Unauthorized for unauthenticated user."
    );
}

#[tokio::test]
async fn create_post_returns_400_for_invalid_payload() {
    let app = spawn_app().await;
    app.login().await;

    let invalid_payloads = vec![
        json!({ "title": "", "body": "Some text" }),
        json!({ "title": "Title", "body": "   " }),
        json!({ "title": "a".repeat(101), "body": "Some text" }),
        json!({ "title": "Ti\0tle", "body": "Some text" }),
        json!({ "title": "Title", "body": "Some\0text" }),
        json!({}),
    ];

    for payload in invalid_payloads {
        let response = app.create_post(&payload).await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return 400 for invalid input: {payload:?}"
        );
    }
}

#[tokio::test]
async fn create_post_returns_201_with_slug_author_and_empty_stats() {
    let app = spawn_app().await;
    app.login().await;

    let post = app.create_sample_post("My First Blog Post!").await;

    assert_eq!(post["slug"], "my-first-blog-post");
    assert_eq!(post["title"], "My First Blog Post!");
    assert_eq!(post["author"]["id"], app.test_user.user_id.to_string());
    assert_eq!(post["author"]["user_name"], app.test_user.user_name);
    assert_eq!(post["stats"]["likes"], 0);
    assert_eq!(post["stats"]["comments"], 0);

    let (likes, comments): (i64, i64) =
        sqlx::query_as("SELECT likes, comments FROM post_stats WHERE post_id = $1")
            .bind(id_of(&post))
            .fetch_one(&app.db_pool)
            .await
            .expect("Stats row was not created with the post");
    assert_eq!((likes, comments), (0, 0));
}

#[tokio::test]
async fn duplicate_title_gets_a_distinct_slug() {
    let app = spawn_app().await;
    app.login().await;

    let first = app.create_sample_post("Same Title").await;
    let second = app.create_sample_post("Same Title").await;

    assert_eq!(first["slug"], "same-title");
    let second_slug = second["slug"].as_str().unwrap();
    assert!(second_slug.starts_with("same-title-"));
    assert_ne!(second_slug, "same-title");
}

// ============================================================================
// Read Post
// ============================================================================

#[tokio::test]
async fn post_can_be_read_by_id_and_by_slug() {
    let app = spawn_app().await;
    app.login().await;
    let post = app.create_sample_post("Readable").await;

    let by_id: Value = app.get_post(&id_of(&post)).await.json().await.unwrap();
    let by_slug: Value = app.get_post_by_slug("readable").await.json().await.unwrap();

    assert_eq!(by_id["post"]["id"], post["id"]);
    assert_eq!(by_slug["post"]["id"], post["id"]);
    assert_eq!(by_slug["post"]["body"], post["body"]);
}

#[tokio::test]
async fn missing_post_returns_404() {
    let app = spawn_app().await;

    assert_eq!(app.get_post(&Uuid::new_v4()).await.status().as_u16(), 404);
    assert_eq!(app.get_post_by_slug("nothing-here").await.status().as_u16(), 404);
}

#[tokio::test]
async fn anonymous_reader_gets_no_is_liked_flag() {
    let app = spawn_app().await;
    app.login().await;
    let post = app.create_sample_post("Flagged").await;
    app.like_post(&id_of(&post)).await.error_for_status().unwrap();

    let liked: Value = app.get_post(&id_of(&post)).await.json().await.unwrap();
    assert_eq!(liked["post"]["is_liked"], true);

    app.logout().await;
    let anonymous: Value = app.get_post(&id_of(&post)).await.json().await.unwrap();
    assert!(anonymous["post"].get("is_liked").is_none());
}

// ============================================================================
// List & Search
// ============================================================================

#[tokio::test]
async fn cursor_pagination_returns_every_post_once_newest_first() {
    let app = spawn_app().await;
    app.login().await;

    let mut created = Vec::new();
    for i in 0..45 {
        let post = app.create_sample_post(&format!("Post number {i}")).await;
        created.push(post["id"].as_str().unwrap().to_string());
    }
    created.reverse();

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    let mut page_sizes = Vec::new();
    loop {
        let response = app.list_posts(cursor.as_deref()).await;
        assert_eq!(response.status().as_u16(), 200);
        let page: Value = response.json().await.unwrap();

        let posts = page["posts"].as_array().unwrap();
        page_sizes.push(posts.len());
        seen.extend(posts.iter().map(|p| p["id"].as_str().unwrap().to_string()));

        match page["next_cursor"].as_str() {
            Some(next) => cursor = Some(next.to_string()),
            None => break,
        }
    }

    assert_eq!(page_sizes, vec![20, 20, 5]);
    assert_eq!(seen, created);
    assert_eq!(seen.iter().collect::<HashSet<_>>().len(), 45);
}

#[tokio::test]
async fn listing_with_an_unknown_cursor_returns_an_empty_page() {
    let app = spawn_app().await;
    app.login().await;
    app.create_sample_post("Lonely").await;

    let page: Value = app
        .list_posts(Some(&Uuid::new_v4().to_string()))
        .await
        .json()
        .await
        .unwrap();

    assert!(page["posts"].as_array().unwrap().is_empty());
    assert!(page["next_cursor"].is_null());
}

#[tokio::test]
async fn search_matches_title_or_body_substrings() {
    let app = spawn_app().await;
    app.login().await;

    let in_title = app.create_sample_post("Learning Rustacean habits").await;
    app.create_post(&json!({ "title": "Cooking", "body": "Rustacean stew recipe" }))
        .await
        .error_for_status()
        .unwrap();
    app.create_post(&json!({ "title": "Gardening", "body": "tomatoes" }))
        .await
        .error_for_status()
        .unwrap();

    let found: Value = app.search_posts("Rustacean").await.json().await.unwrap();
    let found = found["posts"].as_array().unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found[0]["title"], "Cooking");
    assert_eq!(found[1]["id"], in_title["id"]);
}

#[tokio::test]
async fn search_returns_400_for_blank_or_nul_keyword() {
    let app = spawn_app().await;

    assert_eq!(app.search_posts("").await.status().as_u16(), 400);
    assert_eq!(app.search_posts("%20%20").await.status().as_u16(), 400);
    assert_eq!(app.search_posts("rust%00").await.status().as_u16(), 400);
}

// ============================================================================
// Likes
// ============================================================================

#[tokio::test]
async fn likes_reflect_distinct_users_and_are_idempotent() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = id_of(&app.create_sample_post("Likeable").await);

    let first: Value = app.like_post(&post_id).await.json().await.unwrap();
    let again: Value = app.like_post(&post_id).await.json().await.unwrap();
    assert_eq!(first["stats"]["likes"], 1);
    assert_eq!(again["stats"]["likes"], 1);

    let (_, other) = app.other_user().await;
    let response = app
        .patch_as(&other, &format!("v1/post/me/like/{post_id}"))
        .await;
    let both: Value = response.json().await.unwrap();
    assert_eq!(both["stats"]["likes"], 2);

    let after: Value = app.unlike_post(&post_id).await.json().await.unwrap();
    assert_eq!(after["stats"]["likes"], 1);

    let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM post_likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn liking_requires_login_and_an_existing_post() {
    let app = spawn_app().await;

    assert_eq!(app.like_post(&Uuid::new_v4()).await.status().as_u16(), 401);

    app.login().await;
    assert_eq!(app.like_post(&Uuid::new_v4()).await.status().as_u16(), 404);
    assert_eq!(app.unlike_post(&Uuid::new_v4()).await.status().as_u16(), 404);
}

// ============================================================================
// Delete Post
// ============================================================================

#[tokio::test]
async fn author_can_delete_post_and_its_comments_go_with_it() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = id_of(&app.create_sample_post("Short lived").await);
    app.create_sample_comment(&post_id, "first!", None).await;

    let response = app.delete_post(&post_id).await;
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(app.get_post(&post_id).await.status().as_u16(), 404);
    let (comments,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(comments, 0);
}

#[tokio::test]
async fn only_the_author_can_delete_a_post() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = id_of(&app.create_sample_post("Not yours").await);

    let (_, other) = app.other_user().await;
    let response = app
        .delete_as(&other, &format!("v1/post/me/delete/{post_id}"))
        .await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(app.get_post(&post_id).await.status().as_u16(), 200);
}

#[tokio::test]
async fn deleting_a_missing_post_returns_404() {
    let app = spawn_app().await;
    app.login().await;

    assert_eq!(app.delete_post(&Uuid::new_v4()).await.status().as_u16(), 404);
}
