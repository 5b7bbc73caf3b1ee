use crate::helpers::TestApp;
use fake::Fake;
use fake::faker::lorem::en::Paragraph;
use reqwest::Response;
use serde_json::Value;
use uuid::Uuid;

impl TestApp {
    pub async fn create_post(&self, payload: &Value) -> Response {
        self.send_post("v1/post/me/create", payload).await
    }

    /// Creates a post with the given title and a generated body, returning
    /// the created post as JSON.
    pub async fn create_sample_post(&self, title: &str) -> Value {
        let body: String = Paragraph(2..4).fake();
        let payload = serde_json::json!({ "title": title, "body": body });

        let response = self.create_post(&payload).await;
        assert_eq!(
            response.status().as_u16(),
            201,
            "Failed to create sample post"
        );
        response.json().await.unwrap()
    }

    pub async fn get_post(&self, id: &Uuid) -> Response {
        self.send_get(&format!("v1/post/get/{id}")).await
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> Response {
        self.send_get(&format!("v1/post/slug/{slug}")).await
    }

    pub async fn list_posts(&self, cursor: Option<&str>) -> Response {
        match cursor {
            Some(cursor) => self.send_get(&format!("v1/post/get/all?cursor={cursor}")).await,
            None => self.send_get("v1/post/get/all").await,
        }
    }

    pub async fn search_posts(&self, keyword: &str) -> Response {
        self.send_get(&format!("v1/post/search?keyword={keyword}"))
            .await
    }

    pub async fn like_post(&self, id: &Uuid) -> Response {
        self.send_patch(&format!("v1/post/me/like/{id}")).await
    }

    pub async fn unlike_post(&self, id: &Uuid) -> Response {
        self.send_patch(&format!("v1/post/me/unlike/{id}")).await
    }

    pub async fn delete_post(&self, id: &Uuid) -> Response {
        self.send_delete(&format!("v1/post/me/delete/{id}")).await
    }
}
