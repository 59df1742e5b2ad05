use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::server::{
    handlers::{chat::chat, health::health_check},
    services::{gemini::GeminiService, menu::MenuService, rules::RuleTable},
};

#[derive(Clone)]
pub struct AppState {
    pub rules: Arc<RuleTable>,
    pub gemini: Arc<GeminiService>,
    pub menu: Option<Arc<MenuService>>,
}

/// Assemble the application router. A configured pool switches the menu rule
/// from its canned reply to a live lookup.
pub fn configure_app(gemini: Arc<GeminiService>, pool: Option<PgPool>) -> Router {
    let menu = pool.map(|pool| Arc::new(MenuService::new(pool)));
    let rules = Arc::new(if menu.is_some() {
        RuleTable::with_live_menu()
    } else {
        RuleTable::new()
    });

    app_router(AppState {
        rules,
        gemini,
        menu,
    })
}

async fn log_request(request: Request, next: Next) -> Response {
    info!("{} {}", request.method(), request.uri().path());
    next.run(request).await
}

fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/chat", post(chat))
        .route("/api/chat", post(chat))
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
