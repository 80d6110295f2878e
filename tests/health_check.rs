use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use chat_relay::config::{GoogleConfig, ModelConfig, RelayConfig};
use chat_relay::services::providers::mock::{MockBehavior, MockTextProvider};
use chat_relay::startup::{AppState, build_router};
use std::sync::Arc;
use tower::util::ServiceExt;

fn test_app() -> axum::Router {
    let state = AppState {
        config: RelayConfig {
            port: 0,
            models: ModelConfig {
                text_model: "gemini-pro".to_string(),
            },
            google: GoogleConfig {
                api_key: "test-key".to_string(),
            },
        },
        text_provider: Arc::new(MockTextProvider::new(MockBehavior::Reply(
            "ok".to_string(),
        ))),
    };
    build_router(state)
}

#[tokio::test]
async fn liveness_routes_return_static_status() {
    for uri in ["/", "/api/test", "/health"] {
        let response = test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "uri {uri}");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "chat-relay");
    }
}

#[tokio::test]
async fn readiness_reflects_provider_health() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
