use axum::extract::{Json, State};
use tracing::{info, warn};

use crate::server::{
    config::AppState,
    models::chat::{ChatRequest, ChatResponse},
    services::menu::MENU_UNAVAILABLE_REPLY,
    services::rules::RuleAction,
};

/// Answer a chat message: first matching rule wins, otherwise the message is
/// forwarded to the AI fallback. Every path answers HTTP 200; degraded
/// collaborator failures are delivered as normal reply text.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let message = request.message;

    let response = match state.rules.first_match(&message) {
        Some(RuleAction::Reply(text)) => {
            info!("Rule matched for message");
            text.to_string()
        }
        Some(RuleAction::Menu) => menu_reply(&state).await,
        None => {
            info!("No rule matched; deferring to AI fallback");
            state.gemini.ask(&message).await
        }
    };

    Json(ChatResponse { response })
}

async fn menu_reply(state: &AppState) -> String {
    let Some(menu) = &state.menu else {
        warn!("Menu rule fired without a configured datastore");
        return MENU_UNAVAILABLE_REPLY.to_string();
    };

    match menu.fetch_menu().await {
        Ok(text) => text,
        Err(e) => {
            warn!("Menu lookup failed: {}", e);
            MENU_UNAVAILABLE_REPLY.to_string()
        }
    }
}
