//! Telegram Bot API notifier
//!
//! Sends the report with `sendMessage` in HTML parse mode. The bot token is
//! part of the URL path and is never logged.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::adapters::types::create_http_client;
use crate::core::delivery::{Notifier, SubscriberId};
use crate::error::{AppError, Result};

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: SubscriberId,
    text: &'a str,
    parse_mode: &'static str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// reqwest errors display the URL, which contains the token
fn transport_error(e: reqwest::Error) -> AppError {
    let kind = if e.is_timeout() {
        "request timed out"
    } else if e.is_connect() {
        "connection failed"
    } else if e.is_body() || e.is_decode() {
        "unreadable response body"
    } else {
        "request failed"
    };
    AppError::Delivery(kind.to_string())
}

pub struct TelegramNotifier {
    api_url: String,
    token: String,
    http_client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>, request_timeout: Duration) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            http_client: create_http_client("telegram", request_timeout),
        }
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, recipient: &SubscriberId, payload: &str) -> Result<()> {
        let body = SendMessage {
            chat_id: *recipient,
            text: payload,
            parse_mode: "HTML",
        };

        let response = self
            .http_client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(transport_error)?;
        let parsed: Option<ApiResponse> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            let reason = parsed
                .and_then(|r| r.description)
                .unwrap_or(text);
            return Err(AppError::Delivery(format!("HTTP {}: {}", status.as_u16(), reason)));
        }

        match parsed {
            Some(ApiResponse { ok: true, .. }) => Ok(()),
            Some(ApiResponse { description, .. }) => Err(AppError::Delivery(
                description.unwrap_or_else(|| "sendMessage returned ok=false".to_string()),
            )),
            None => Err(AppError::Delivery(format!("unexpected sendMessage response: {}", text))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const TOKEN: &str = "123456:TEST-token";

    fn notifier_for(server: &mockito::ServerGuard) -> TelegramNotifier {
        TelegramNotifier::new(server.url(), TOKEN, Duration::from_secs(2))
    }

    #[tokio::test]
    async fn test_sends_html_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/bot123456:TEST-token/sendMessage")
            .match_body(Matcher::Json(json!({
                "chat_id": 42,
                "text": "<b>BTC</b>",
                "parse_mode": "HTML"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok":true,"result":{"message_id":1}}"#)
            .create_async()
            .await;

        notifier_for(&server).deliver(&42, "<b>BTC</b>").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_error_is_delivery_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Any)
            .with_status(403)
            .with_body(r#"{"ok":false,"error_code":403,"description":"Forbidden: bot was blocked by the user"}"#)
            .create_async()
            .await;

        let err = notifier_for(&server).deliver(&7, "hi").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("403"), "Got: {}", msg);
        assert!(msg.contains("blocked"), "Got: {}", msg);
        assert!(!msg.contains("TEST-token"), "Token leaked: {}", msg);
    }

    #[tokio::test]
    async fn test_ok_false_is_delivery_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Any)
            .with_status(200)
            .with_body(r#"{"ok":false,"description":"Bad Request: chat not found"}"#)
            .create_async()
            .await;

        let err = notifier_for(&server).deliver(&7, "hi").await.unwrap_err();
        assert!(err.to_string().contains("chat not found"));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let notifier = TelegramNotifier::new("https://api.telegram.org/", TOKEN, Duration::from_secs(1));
        assert_eq!(
            notifier.send_message_url(),
            "https://api.telegram.org/bot123456:TEST-token/sendMessage"
        );
    }
}
