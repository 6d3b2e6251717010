use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::{ConfigError, DeliveryError};

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Destination for outgoing text messages
#[async_trait]
pub trait Notifier {
    async fn notify(&self, message: &str) -> Result<(), DeliveryError>;
}

/// Telegram Bot API client bound to one chat
pub struct TelegramNotifier {
    client: Client,
    send_url: String,
    chat_id: String,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        if config.telegram_token.trim().is_empty() {
            return Err(ConfigError::Missing("TELEGRAM_TOKEN"));
        }
        if config.chat_id.trim().is_empty() {
            return Err(ConfigError::Missing("TELEGRAM_CHAT_ID"));
        }

        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| ConfigError::Invalid {
                name: "TELEGRAM_API_URL",
                value: config.telegram_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            send_url: format!(
                "{}/bot{}/sendMessage",
                config.telegram_url.trim_end_matches('/'),
                config.telegram_token
            ),
            chat_id: config.chat_id.clone(),
        })
    }

    /// sendMessage POST for `message` in HTML parse mode
    fn request(&self, message: &str) -> RequestBuilder {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text: message,
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };
        self.client.post(&self.send_url).json(&payload)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), DeliveryError> {
        // reqwest errors carry the URL, which embeds the bot token
        let response = self
            .request(message)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DeliveryError::Transport(e.without_url()))?;

        check_response(status.as_u16(), status.is_success(), &body)?;
        debug!("Telegram message delivered to chat {}", self.chat_id);
        Ok(())
    }
}

/// Telegram answers `{"ok": false, "description": ...}` on rejection
fn check_response(status: u16, success: bool, body: &str) -> Result<(), DeliveryError> {
    let parsed: Option<ApiResponse> = serde_json::from_str(body).ok();

    match parsed {
        Some(resp) if success && resp.ok => Ok(()),
        Some(resp) => Err(DeliveryError::Rejected {
            status,
            description: resp
                .description
                .unwrap_or_else(|| "request not accepted".to_string()),
        }),
        None if success => Ok(()),
        None => Err(DeliveryError::Rejected {
            status,
            description: body.trim().chars().take(300).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: &str, chat: &str) -> Config {
        let token = token.to_string();
        let chat = chat.to_string();
        let mut config = Config::from_lookup(|name| match name {
            "TELEGRAM_TOKEN" => Some("placeholder".to_string()),
            "TELEGRAM_CHAT_ID" => Some("placeholder".to_string()),
            "TELEGRAM_API_URL" => Some("https://tg.example/".to_string()),
            _ => None,
        })
        .unwrap();
        config.telegram_token = token;
        config.chat_id = chat;
        config
    }

    #[test]
    fn test_blank_token_fails_construction() {
        let err = TelegramNotifier::new(&config("", "-100")).err().unwrap();
        assert!(matches!(err, ConfigError::Missing("TELEGRAM_TOKEN")));

        let err = TelegramNotifier::new(&config("123:abc", " ")).err().unwrap();
        assert!(matches!(err, ConfigError::Missing("TELEGRAM_CHAT_ID")));
    }

    #[test]
    fn test_send_url() {
        let notifier = TelegramNotifier::new(&config("123:abc", "-100")).unwrap();
        assert_eq!(notifier.send_url, "https://tg.example/bot123:abc/sendMessage");
        assert_eq!(notifier.chat_id, "-100");
    }

    #[test]
    fn test_send_request_shape() {
        let notifier = TelegramNotifier::new(&config("123:abc", "-100")).unwrap();

        let request = notifier.request("<b>hi</b>").build().unwrap();
        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://tg.example/bot123:abc/sendMessage"
        );
        assert_eq!(request.headers()[reqwest::header::CONTENT_TYPE], "application/json");

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(value["chat_id"], "-100");
        assert_eq!(value["text"], "<b>hi</b>");
        assert_eq!(value["parse_mode"], "HTML");
        assert_eq!(value["disable_web_page_preview"], true);
    }

    #[test]
    fn test_accepted_response() {
        assert!(check_response(200, true, r#"{"ok":true,"result":{"message_id":1}}"#).is_ok());
    }

    #[test]
    fn test_rejected_response_uses_description() {
        let err = check_response(
            400,
            false,
            r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
        )
        .unwrap_err();
        match err {
            DeliveryError::Rejected { status, description } => {
                assert_eq!(status, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_json_failure_keeps_body() {
        let err = check_response(502, false, "Bad Gateway").unwrap_err();
        assert!(err.to_string().contains("Bad Gateway"));
    }
}
