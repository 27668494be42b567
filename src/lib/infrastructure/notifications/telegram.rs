//! Telegram bot notifier

use std::fmt;

use async_trait::async_trait;
use clap::Parser;
use serde_json::json;

use crate::{
    domain::waitlist::{errors::NotifierError, Notifier},
    infrastructure::outbound::{HttpClient, HttpRequest},
};

/// Telegram configuration
#[derive(Clone, Default, Parser)]
pub struct TelegramConfig {
    /// The bot token
    #[clap(long = "telegram-api-key", env = "TELEGRAM_API_KEY")]
    pub api_key: String,

    /// The chat signups are posted to
    #[clap(long = "telegram-chat-id", env = "TELEGRAM_CHAT_ID")]
    pub chat_id: String,
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_key", &"***")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Posts notifications to a Telegram chat through the Bot API
#[derive(Debug, Clone)]
pub struct TelegramNotifier<H>
where
    H: HttpClient,
{
    config: TelegramConfig,
    http: H,
}

impl<H> TelegramNotifier<H>
where
    H: HttpClient,
{
    /// Create a new notifier
    pub fn new(config: TelegramConfig, http: H) -> Self {
        Self { config, http }
    }

    fn send_message_url(&self) -> String {
        format!(
            "https://api.telegram.org/bot{}/sendMessage",
            self.config.api_key
        )
    }
}

#[async_trait]
impl<H> Notifier for TelegramNotifier<H>
where
    H: HttpClient,
{
    async fn notify(&self, text: &str) -> Result<(), NotifierError> {
        let request = HttpRequest::post(self.send_message_url()).json(json!({
            "chat_id": self.config.chat_id,
            "text": text,
        }));

        let response = self
            .http
            .call(request)
            .await
            .ok_or(NotifierError::Unreachable)?;

        if !response.status.is_success() {
            return Err(NotifierError::Rejected {
                status: response.status.as_u16(),
            });
        }

        Ok(())
    }
}
