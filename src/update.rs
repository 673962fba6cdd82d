//! Inbound Telegram updates, decoded from the webhook body.
//!
//! Only the fields the relay acts on are modelled; everything else in the
//! update is ignored.

use serde::Deserialize;
use teloxide::types::ChatId;

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: i64,
    /// Absent for edits, callbacks, member changes and the like.
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub chat: Chat,
    pub text: Option<String>,
    pub from: Option<Sender>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: String,
}

/// A message with text, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    pub chat_id: ChatId,
    pub username: String,
    pub text: String,
}

impl Update {
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// The text message carried by this update, if any.
    pub fn text_message(&self) -> Option<TextMessage> {
        let msg = self.message.as_ref()?;
        let text = msg.text.as_deref().filter(|t| !t.is_empty())?;

        let username = msg
            .from
            .as_ref()
            .map(|u| u.username.clone().unwrap_or_else(|| u.first_name.clone()))
            .unwrap_or_else(|| "unknown".to_string());

        Some(TextMessage {
            chat_id: ChatId(msg.chat.id),
            username,
            text: text.to_string(),
        })
    }
}
