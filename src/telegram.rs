//! Telegram client using teloxide.

use teloxide::prelude::*;
use tracing::info;

use crate::config::ConfigError;

/// Telegram API client.
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Build the bot and check the token with `getMe`.
    pub async fn connect(token: &str) -> Result<Self, ConfigError> {
        let bot = Bot::new(token);
        let me = bot
            .get_me()
            .await
            .map_err(|source| ConfigError::Rejected { source })?;
        info!("Authorized on account @{} ({})", me.username(), me.id);
        Ok(Self::new(bot))
    }

    /// Send plain text. Generated text is relayed as-is, so no parse mode.
    pub async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<i64, String> {
        self.bot
            .send_message(chat_id, text)
            .await
            .map(|msg| msg.id.0 as i64)
            .map_err(|e| format!("Failed to send: {e}"))
    }
}
