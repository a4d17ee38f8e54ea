pub mod auth;
pub mod health;
pub mod resume;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Persistence gateway wire contract
        .route("/resume/load", get(resume::handle_load))
        .route("/resume/save", post(resume::handle_save))
        // Authentication collaborator
        .route("/auth/register", post(auth::handle_register))
        .route("/auth/login", post(auth::handle_login))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::resolve_token;
    use crate::auth::{AuthService, MemoryUserDirectory};
    use crate::config::{Config, StorageBackend};
    use crate::models::resume::ResumeData;
    use crate::store::memory::MemoryResumeStore;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use chrono::Utc;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn test_router() -> Router {
        let state = AppState {
            store: Arc::new(MemoryResumeStore::new()),
            auth: AuthService::new(Arc::new(MemoryUserDirectory::new())),
            config: Config {
                port: 0,
                rust_log: "info".to_string(),
                storage: StorageBackend::Memory,
            },
        };
        build_router(state)
    }

    async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let router = test_router();
        let (status, body) = get_json(&router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_load_without_user_id_is_bad_request() {
        let router = test_router();
        let (status, body) = get_json(&router, "/resume/load").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "User ID is required");
    }

    #[tokio::test]
    async fn test_load_with_malformed_user_id_is_bad_request() {
        let router = test_router();
        let (status, body) = get_json(&router, "/resume/load?userId=not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "User ID is invalid");
    }

    #[tokio::test]
    async fn test_load_absent_document_returns_nulls() {
        let router = test_router();
        let uri = format!("/resume/load?userId={}", Uuid::new_v4());
        let (status, body) = get_json(&router, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resumeData"], Value::Null);
        assert_eq!(body["style"], Value::Null);
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let router = test_router();
        let user_id = Uuid::new_v4();

        let mut data = ResumeData::empty();
        data.personal_info.name = "Round Trip".to_string();
        let (status, body) = post_json(
            &router,
            "/resume/save",
            json!({
                "userId": user_id,
                "resumeData": data,
                "style": "style-2",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["style"], "style-2");

        let uri = format!("/resume/load?userId={user_id}");
        let (status, body) = get_json(&router, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resumeData"]["personalInfo"]["name"], "Round Trip");
        assert_eq!(body["style"], "style-2");
    }

    #[tokio::test]
    async fn test_save_is_idempotent_per_user() {
        let router = test_router();
        let user_id = Uuid::new_v4();
        let payload = json!({
            "userId": user_id,
            "resumeData": ResumeData::empty(),
            "style": "style-1",
        });

        for _ in 0..3 {
            let (status, _) = post_json(&router, "/resume/save", payload.clone()).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = get_json(&router, &format!("/resume/load?userId={user_id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["style"], "style-1");
    }

    #[tokio::test]
    async fn test_register_login_flow_with_distinct_failure_messages() {
        let router = test_router();

        let credentials = json!({
            "email": "ada@example.com",
            "password": "s3cret",
            "name": "Ada",
        });
        let (status, body) = post_json(&router, "/auth/register", credentials.clone()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["email"], "ada@example.com");
        assert!(body.get("password").is_none());

        let (status, body) = post_json(&router, "/auth/register", credentials).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email already exists");

        let (status, body) = post_json(
            &router,
            "/auth/login",
            json!({"email": "ada@example.com", "password": "wrong"}),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid email or password");

        let (status, body) = post_json(
            &router,
            "/auth/login",
            json!({"email": "ada@example.com", "password": "s3cret", "language": "en"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Ada");

        // The returned token resolves to this user's session.
        let token = body["token"].as_str().unwrap();
        let session = resolve_token(token, Utc::now()).unwrap();
        assert_eq!(session.display_name, "Ada");
    }
}
