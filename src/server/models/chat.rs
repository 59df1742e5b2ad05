use serde::{Deserialize, Serialize};

/// Incoming chat payload. A missing `message` field is treated as an empty
/// message rather than rejected.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}
