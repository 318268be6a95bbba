//! Telegram Bot API delivery via `sendMessage`.

use async_trait::async_trait;
use serde::Serialize;

use relay_common::config::AppConfig;
use relay_common::error::RelayError;

use crate::Notifier;

/// Body of a `sendMessage` call.
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// Sends Markdown messages through a Telegram bot.
pub struct TelegramNotifier {
    client: reqwest::Client,
    send_url: String,
}

impl TelegramNotifier {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &AppConfig) -> Self {
        Self {
            client,
            send_url: format!(
                "{}/bot{}/sendMessage",
                config.telegram_api_url.trim_end_matches('/'),
                config.telegram_bot_token
            ),
        }
    }

    /// Build the `sendMessage` request without sending it.
    pub fn send_request(&self, chat_id: &str, text: &str) -> Result<reqwest::Request, RelayError> {
        let body = SendMessage {
            chat_id,
            text,
            parse_mode: "Markdown",
        };
        let request = self.client.post(&self.send_url).json(&body).build()?;
        Ok(request)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, recipient: &str, text: &str) -> Result<(), RelayError> {
        let request = self.send_request(recipient, text)?;
        let response = self.client.execute(request).await?;

        if !response.status().is_success() {
            return Err(RelayError::from_response(self.name(), response).await);
        }

        tracing::info!(chat_id = recipient, "Message sent to Telegram");
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(chat_id = recipient, response = %body, "Telegram response");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}
