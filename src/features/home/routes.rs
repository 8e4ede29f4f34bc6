use axum::{routing::get, Router};

use crate::features::home::handlers::{health_check, hello, index};

pub fn routes() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/hello", get(hello))
        .route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_index_and_hello() {
        let server = TestServer::new(routes()).expect("test server");

        let index = server.get("/").await;
        index.assert_status_ok();
        index.assert_text("Welcome to the Flask API!");

        let hello = server.get("/hello").await;
        hello.assert_status_ok();
        hello.assert_json(&json!({ "message": "Hello from Flask!" }));

        server.get("/health").await.assert_status(StatusCode::OK);
    }
}
