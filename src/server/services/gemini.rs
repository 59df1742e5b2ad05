//! Fallback client for the Gemini generateContent API.
//!
//! `ask` never fails: every failure class collapses to a fixed, human-readable
//! reply so the request handler stays free of error handling.

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;
use tracing::warn;

use crate::configuration::AiSettings;

pub const CREDENTIALS_MISSING_REPLY: &str =
    "Sorry, I can’t answer that right now because no AI credentials are configured.";
pub const PROVIDER_TROUBLE_REPLY: &str =
    "Sorry, I’m having trouble generating a response right now.";

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("no API credentials configured")]
    CredentialsMissing,
    #[error("provider returned status {0}")]
    Provider(StatusCode),
    #[error("request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider response carried no generated text")]
    MalformedResponse,
}

pub struct GeminiService {
    client: Client,
    api_key: Option<Secret<String>>,
    base_url: String,
    model: String,
}

impl GeminiService {
    pub fn new(api_key: Option<Secret<String>>, settings: &AiSettings) -> Result<Self> {
        let base_url =
            std::env::var("GEMINI_API_URL").unwrap_or_else(|_| settings.base_url.clone());

        Self::build(api_key, base_url, settings)
    }

    pub fn with_base_url(api_key: Option<Secret<String>>, base_url: String) -> Result<Self> {
        Self::build(api_key, base_url, &AiSettings::default())
    }

    fn build(
        api_key: Option<Secret<String>>,
        base_url: String,
        settings: &AiSettings,
    ) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(settings.request_timeout_secs))
                .build()?,
            api_key,
            base_url,
            model: settings.model.clone(),
        })
    }

    /// Forward the user message as the prompt and return the completion text.
    /// Always returns a reply string; failures are logged and degraded here.
    pub async fn ask(&self, message: &str) -> String {
        match self.generate(message).await {
            Ok(text) => clean_markdown(&text),
            Err(AiError::CredentialsMissing) => {
                warn!("AI fallback skipped: no API credentials configured");
                CREDENTIALS_MISSING_REPLY.to_string()
            }
            Err(e) => {
                warn!("AI fallback failed: {}", e);
                PROVIDER_TROUBLE_REPLY.to_string()
            }
        }
    }

    async fn generate(&self, message: &str) -> Result<String, AiError> {
        let api_key = self.api_key.as_ref().ok_or(AiError::CredentialsMissing)?;

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.expose_secret())])
            .json(&serde_json::json!({
                "contents": [{
                    "parts": [{
                        "text": message
                    }]
                }]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AiError::Provider(response.status()));
        }

        let body: serde_json::Value = response.json().await?;
        body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or(AiError::MalformedResponse)
    }
}

lazy_static! {
    static ref MD_BOLD: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
    static ref MD_ITALIC: Regex = Regex::new(r"\*(.+?)\*").unwrap();
    static ref MD_BOLD_U: Regex = Regex::new(r"__(.+?)__").unwrap();
    static ref MD_ITALIC_U: Regex = Regex::new(r"_(.+?)_").unwrap();
    static ref MD_HEADER: Regex = Regex::new(r"#{1,6}\s?(.+)").unwrap();
    static ref MD_CODE: Regex = Regex::new(r"`(.+?)`").unwrap();
    static ref MD_CODE_BLOCK: Regex = Regex::new(r"(?s)```.*?```").unwrap();
    static ref MD_LINK: Regex = Regex::new(r"\[(.+?)\]\(.+?\)").unwrap();
    static ref MD_BULLET: Regex = Regex::new(r"(?m)^\s*[-*+]\s+").unwrap();
    static ref MD_NUMBERED: Regex = Regex::new(r"(?m)^\s*\d+\.\s+").unwrap();
}

/// Strip markdown formatting so replies read as plain text in the chat UI.
pub fn clean_markdown(text: &str) -> String {
    let text = MD_BOLD.replace_all(text, "$1");
    let text = MD_ITALIC.replace_all(&text, "$1");
    let text = MD_BOLD_U.replace_all(&text, "$1");
    let text = MD_ITALIC_U.replace_all(&text, "$1");
    let text = MD_HEADER.replace_all(&text, "$1");
    let text = MD_CODE.replace_all(&text, "$1");
    let text = MD_CODE_BLOCK.replace_all(&text, "");
    let text = MD_LINK.replace_all(&text, "$1");
    let text = MD_BULLET.replace_all(&text, "• ");
    let text = MD_NUMBERED.replace_all(&text, "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_credentials_degrade_to_the_fixed_reply() {
        let service = GeminiService::with_base_url(None, "http://127.0.0.1:9".to_string())
            .expect("failed to build service");
        assert_eq!(service.ask("anything at all").await, CREDENTIALS_MISSING_REPLY);
    }

    #[test]
    fn clean_markdown_strips_emphasis_and_headers() {
        assert_eq!(clean_markdown("**bold** and *italic*"), "bold and italic");
        assert_eq!(clean_markdown("## Today's specials"), "Today's specials");
        assert_eq!(clean_markdown("__warm__ _welcome_"), "warm welcome");
    }

    #[test]
    fn clean_markdown_rewrites_lists_and_links() {
        assert_eq!(
            clean_markdown("- Amok Trey\n- Lok Lak"),
            "• Amok Trey\n• Lok Lak"
        );
        assert_eq!(clean_markdown("1. first\n2. second"), "first\nsecond");
        assert_eq!(clean_markdown("see [our menu](https://example.com)"), "see our menu");
    }

    #[test]
    fn clean_markdown_leaves_plain_text_untouched() {
        assert_eq!(
            clean_markdown("We open at 9 AM and close at 10 PM."),
            "We open at 9 AM and close at 10 PM."
        );
    }
}
