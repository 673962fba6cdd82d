//! Transport seams used by the dispatcher.

use async_trait::async_trait;
use teloxide::types::ChatId;

use crate::inference::{self, InferenceClient};
use crate::telegram::TelegramClient;

/// Text generation backend.
#[async_trait]
pub trait InferenceApi: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, inference::Error>;
}

/// Outbound chat messages. Returns the sent message id.
#[async_trait]
pub trait TelegramApi: Send + Sync {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<i64, String>;
}

#[async_trait]
impl InferenceApi for InferenceClient {
    async fn generate(&self, prompt: &str) -> Result<String, inference::Error> {
        InferenceClient::generate(self, prompt).await
    }
}

#[async_trait]
impl TelegramApi for TelegramClient {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<i64, String> {
        TelegramClient::send_message(self, chat_id, text).await
    }
}
