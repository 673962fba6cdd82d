//! Webhook dispatcher - turns one Telegram update into at most one reply.

use std::sync::Arc;

use teloxide::types::ChatId;
use tracing::{error, info, warn};

use crate::api::{InferenceApi, TelegramApi};
use crate::update::Update;

pub const WELCOME_TRIGGER: &str = "/start";
pub const WELCOME_MESSAGE: &str = "Welcome! Type anything to receive an AI-generated response.";
pub const APOLOGY_MESSAGE: &str = "Sorry, I couldn't process your request. Please try again later.";

/// What happened to one inbound update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Body was not a valid update. Nothing sent.
    Dropped,
    /// No message text. Nothing sent.
    Ignored,
    Welcomed,
    /// Generated text was relayed.
    Replied,
    /// Inference failed and the apology was sent instead.
    Apologized,
}

impl Outcome {
    /// Whether the caller gets the processed acknowledgment.
    pub fn acknowledged(self) -> bool {
        matches!(self, Outcome::Welcomed | Outcome::Replied | Outcome::Apologized)
    }
}

pub struct Dispatcher {
    telegram: Arc<dyn TelegramApi>,
    inference: Arc<dyn InferenceApi>,
}

impl Dispatcher {
    pub fn new(telegram: Arc<dyn TelegramApi>, inference: Arc<dyn InferenceApi>) -> Self {
        Self { telegram, inference }
    }

    pub async fn handle(&self, body: &[u8]) -> Outcome {
        info!("Received a request");

        let update = match Update::decode(body) {
            Ok(u) => u,
            Err(e) => {
                warn!("Failed to decode update: {e}");
                return Outcome::Dropped;
            }
        };

        let Some(msg) = update.text_message() else {
            return Outcome::Ignored;
        };

        if msg.text == WELCOME_TRIGGER {
            info!("👋 /start from {} (chat {})", msg.username, msg.chat_id);
            self.send(msg.chat_id, WELCOME_MESSAGE).await;
            return Outcome::Welcomed;
        }

        let preview: String = msg.text.chars().take(100).collect();
        info!("Message from {} (chat {}): \"{preview}\"", msg.username, msg.chat_id);

        match self.inference.generate(&msg.text).await {
            Ok(reply) => {
                self.send(msg.chat_id, &reply).await;
                Outcome::Replied
            }
            Err(e) => {
                error!("Error getting AI response: {e}");
                self.send(msg.chat_id, APOLOGY_MESSAGE).await;
                Outcome::Apologized
            }
        }
    }

    /// Best effort: a failed send is logged and otherwise ignored.
    async fn send(&self, chat_id: ChatId, text: &str) {
        if let Err(e) = self.telegram.send_message(chat_id, text).await {
            warn!("Reply to chat {chat_id} not delivered: {e}");
        }
    }
}
