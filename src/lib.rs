//! Telegram webhook that relays chat messages to a hosted text-generation model.

pub mod api;
pub mod config;
pub mod dispatcher;
pub mod inference;
pub mod server;
pub mod telegram;
pub mod update;

pub use config::{Config, ConfigError};
pub use dispatcher::{Dispatcher, Outcome};
pub use inference::InferenceClient;
pub use telegram::TelegramClient;
