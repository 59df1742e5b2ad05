use axum_test::TestServer;
use bistrobot::server::config::configure_app;
use bistrobot::server::services::gemini::GeminiService;
use std::sync::Arc;

#[tokio::test]
async fn health_check_works() {
    // Arrange
    let gemini = Arc::new(
        GeminiService::with_base_url(None, "http://127.0.0.1:9".to_string())
            .expect("Failed to build AI client"),
    );
    let app = configure_app(gemini, None);

    // Create test server
    let server = TestServer::new(app).unwrap();

    // Act
    let response = server.get("/health").await;

    // Assert
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}
