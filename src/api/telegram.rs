//! Telegram Bot API client
//!
//! Just enough of the Bot API for a command bot: long-polling
//! `getUpdates` and plain-text `sendMessage`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Telegram's hard limit on message length (in characters)
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Telegram API errors
#[derive(Debug, Error)]
pub enum TelegramError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Telegram API returned an error
    #[error("Telegram API error: {0}")]
    Api(String),
}

/// Incoming update (only message updates are modelled)
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// The bot's own account, from `getMe`
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
}

/// Bot API response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Telegram Bot API client
#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    bot_token: String,
    base_url: String,
}

impl TelegramClient {
    /// Create a new Telegram client
    pub fn new(client: reqwest::Client, bot_token: impl Into<String>) -> Self {
        Self::with_base_url(client, bot_token, "https://api.telegram.org")
    }

    /// Create a client whose requests give up after `timeout`
    ///
    /// `getUpdates` sets its own per-request timeout to cover the long-poll
    /// window, so this bounds `sendMessage` and `getMe`.
    pub fn with_timeout(bot_token: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self::new(client, bot_token)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(
        client: reqwest::Client,
        bot_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            bot_token: bot_token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.bot_token, method)
    }

    /// Fetch the bot's own account
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        let resp = self.client.post(self.method_url("getMe")).send().await?;
        Self::handle_response(resp).await
    }

    /// Long-poll for updates with id >= `offset`
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let resp = self
            .client
            .post(self.method_url("getUpdates"))
            // The HTTP timeout must outlive the long-poll window
            .timeout(Duration::from_secs(timeout_secs + 10))
            .json(&json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message"]
            }))
            .send()
            .await?;

        Self::handle_response(resp).await
    }

    /// Send a plain text message, split to fit Telegram's size limit
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        for chunk in split_message(text, MAX_MESSAGE_LEN) {
            let resp = self
                .client
                .post(self.method_url("sendMessage"))
                .json(&json!({
                    "chat_id": chat_id,
                    "text": chunk,
                    "disable_web_page_preview": true
                }))
                .send()
                .await?;

            let _: serde_json::Value = Self::handle_response(resp).await?;
        }

        Ok(())
    }

    async fn handle_response<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, TelegramError> {
        let status = resp.status();
        let body = resp.text().await?;

        let envelope: ApiResponse<T> = serde_json::from_str(&body)
            .map_err(|e| TelegramError::Api(format!("HTTP {}: {}", status.as_u16(), e)))?;

        match envelope {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } if status.is_success() => Ok(result),
            ApiResponse { description, .. } => Err(TelegramError::Api(
                description.unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            )),
        }
    }
}

/// Split text into chunks of at most `max_chars` characters
///
/// Breaks on line boundaries when possible; a single line longer than the
/// limit is cut at a character boundary.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    let mut has_line = false;

    for line in text.split('\n') {
        let mut line = line;
        let mut line_len = line.chars().count();

        // Flush if this line (plus the joining newline) would overflow
        if has_line && current_len + 1 + line_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
            has_line = false;
        }

        while line_len > max_chars {
            let cut = line
                .char_indices()
                .nth(max_chars)
                .map(|(i, _)| i)
                .unwrap_or(line.len());
            chunks.push(line[..cut].to_string());
            line = &line[cut..];
            line_len -= max_chars;
        }

        if has_line {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
        has_line = true;
    }

    if has_line {
        chunks.push(current);
    }

    chunks
}
