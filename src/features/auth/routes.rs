use crate::core::middleware::session_middleware;
use crate::features::auth::handlers;
use crate::features::auth::services::{AuthService, SessionService};
use axum::{middleware::from_fn_with_state, routing::post, Router};
use std::sync::Arc;

/// Public auth routes (no session required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
        .with_state(service)
}

/// Auth routes that require a live session token
pub fn protected_routes(service: Arc<AuthService>, sessions: Arc<SessionService>) -> Router {
    Router::new()
        .route("/logout", post(handlers::logout))
        .route_layer(from_fn_with_state(sessions, session_middleware))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use fake::faker::internet::en::{Password, SafeEmail};
    use fake::Fake;
    use serde_json::{json, Value};
    use sqlx::SqlitePool;
    use std::time::Duration;

    async fn server() -> (TestServer, SqlitePool) {
        let pool = test_pool().await;
        let sessions = Arc::new(SessionService::new(pool.clone(), Duration::from_secs(3600)));
        let service = Arc::new(AuthService::new(pool.clone(), Arc::clone(&sessions)));

        let app = Router::new()
            .merge(public_routes(Arc::clone(&service)))
            .merge(protected_routes(service, sessions));

        (TestServer::new(app).expect("test server"), pool)
    }

    fn credentials() -> (String, String, String) {
        let email: String = SafeEmail().fake();
        let password: String = Password(12..20).fake();
        let local: String = email
            .split('@')
            .next()
            .unwrap_or_default()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        let username = format!("user_{}", local);
        (username, email, password)
    }

    #[tokio::test]
    async fn test_signup_twice_conflicts() {
        let (server, pool) = server().await;
        let (username, email, password) = credentials();

        let first = server
            .post("/signup")
            .json(&json!({ "username": username, "email": email, "password": password }))
            .await;
        first.assert_status(StatusCode::CREATED);
        first.assert_json(&json!({ "message": "User created successfully" }));

        let second = server
            .post("/signup")
            .json(&json!({ "username": "someone_else", "email": email, "password": password }))
            .await;
        second.assert_status(StatusCode::CONFLICT);
        let body: Value = second.json();
        assert!(body["error"].is_string());

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_signup_validation_and_content_type() {
        let (server, _pool) = server().await;

        let bad_email = server
            .post("/signup")
            .json(&json!({ "username": "jane", "email": "nope", "password": "longenough" }))
            .await;
        bad_email.assert_status(StatusCode::BAD_REQUEST);

        let missing_field = server
            .post("/signup")
            .json(&json!({ "username": "jane" }))
            .await;
        missing_field.assert_status(StatusCode::BAD_REQUEST);

        let not_json = server.post("/signup").text("username=jane").await;
        not_json.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_login_then_logout() {
        let (server, _pool) = server().await;
        let (username, email, password) = credentials();

        server
            .post("/signup")
            .json(&json!({ "username": username, "email": email, "password": password }))
            .await
            .assert_status(StatusCode::CREATED);

        let login = server
            .post("/login")
            .json(&json!({ "email": email, "password": password }))
            .await;
        login.assert_status(StatusCode::OK);
        let body: Value = login.json();
        assert_eq!(body["message"], "Login successful");
        assert_eq!(body["user"]["username"], username.as_str());
        assert_eq!(body["user"]["email"], email.to_lowercase().as_str());
        let token = body["token"].as_str().expect("token").to_string();

        let logout = server
            .post("/logout")
            .authorization_bearer(&token)
            .await;
        logout.assert_status(StatusCode::OK);
        logout.assert_json(&json!({ "message": "Logged out successfully" }));

        // The session is gone after logout
        server
            .post("/logout")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (server, _pool) = server().await;
        let (username, email, password) = credentials();

        server
            .post("/signup")
            .json(&json!({ "username": username, "email": email, "password": password }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/login")
            .json(&json!({ "email": email, "password": format!("{}x", password) }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_json(&json!({ "error": "Invalid email or password" }));
    }

    #[tokio::test]
    async fn test_logout_without_session() {
        let (server, _pool) = server().await;

        let response = server.post("/logout").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_json(&json!({ "error": "Authentication required" }));

        server
            .post("/logout")
            .authorization_bearer("not-a-real-token")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
