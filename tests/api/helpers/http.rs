use crate::helpers::TestApp;
use reqwest::{Client, Response};
use serde_json::Value;

impl TestApp {
    pub async fn send_get(&self, endpoint: &str) -> Response {
        self.get_as(&self.api_client, endpoint).await
    }

    pub async fn send_post(&self, endpoint: &str, payload: &Value) -> Response {
        self.post_as(&self.api_client, endpoint, payload).await
    }

    pub async fn send_patch(&self, endpoint: &str) -> Response {
        self.patch_as(&self.api_client, endpoint).await
    }

    pub async fn send_delete(&self, endpoint: &str) -> Response {
        self.delete_as(&self.api_client, endpoint).await
    }

    pub async fn get_as(&self, client: &Client, endpoint: &str) -> Response {
        client
            .get(format!("{}/{}", self.address, endpoint))
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn post_as(&self, client: &Client, endpoint: &str, payload: &Value) -> Response {
        client
            .post(format!("{}/{}", self.address, endpoint))
            .json(payload)
            .send()
            .await
            .expect("POST request failed")
    }

    pub async fn patch_as(&self, client: &Client, endpoint: &str) -> Response {
        client
            .patch(format!("{}/{}", self.address, endpoint))
            .send()
            .await
            .expect("Failed to execute PATCH request.")
    }

    pub async fn delete_as(&self, client: &Client, endpoint: &str) -> Response {
        client
            .delete(format!("{}/{}", self.address, endpoint))
            .send()
            .await
            .expect("Failed to execute DELETE request.")
    }
}
