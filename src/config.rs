use std::fmt;

pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const HF_API_TOKEN_VAR: &str = "HF_API_TOKEN";

/// Errors that can occur when loading configuration or validating it at startup.
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is not set (or is empty).
    Missing(&'static str),
    /// Validation error.
    Validation(String),
    /// Telegram rejected the bot token.
    Rejected { source: teloxide::RequestError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(var) => write!(f, "environment variable {} is required", var),
            Self::Validation(msg) => write!(f, "config validation error: {}", msg),
            Self::Rejected { source } => write!(f, "telegram rejected the bot token: {}", source),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rejected { source } => Some(source),
            Self::Missing(_) | Self::Validation(_) => None,
        }
    }
}

pub struct Config {
    pub telegram_token: String,
    /// Hugging Face token. Absence does not stop startup; every inference call fails instead.
    pub hf_api_token: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("telegram_token", &"<redacted>")
            .field("hf_api_token", &self.hf_api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let telegram_token = lookup(TELEGRAM_TOKEN_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::Missing(TELEGRAM_TOKEN_VAR))?;

        // Telegram tokens are formatted as {bot_id}:{secret} where bot_id is numeric
        let token_parts: Vec<&str> = telegram_token.split(':').collect();
        if token_parts.len() != 2 || token_parts[0].parse::<u64>().is_err() || token_parts[1].is_empty() {
            return Err(ConfigError::Validation(format!(
                "{} appears invalid (expected format: 123456789:ABCdefGHI...)",
                TELEGRAM_TOKEN_VAR
            )));
        }

        let hf_api_token = lookup(HF_API_TOKEN_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            telegram_token,
            hf_api_token,
        })
    }
}
