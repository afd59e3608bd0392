use std::time::Duration;

use serde::Deserialize;
use teloxide::types::ChatId;

use crate::error::{BotError, Result};

/// Homework statuses endpoint. The bot only ever talks to this one URL.
pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Fixed delay between polls.
pub const RETRY_PERIOD: Duration = Duration::from_secs(600);

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl Config {
    /// Load the three required secrets from the environment (`.env` honored).
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let config = config::Config::builder()
            .set_default("practicum_token", "")?
            .set_default("telegram_token", "")?
            .set_default("telegram_chat_id", "")?
            .add_source(config::Environment::default())
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// All three secrets must be non-empty; anything missing is fatal at startup.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.practicum_token.is_empty() {
            missing.push("PRACTICUM_TOKEN".to_string());
        }
        if self.telegram_token.is_empty() {
            missing.push("TELEGRAM_TOKEN".to_string());
        }
        if self.telegram_chat_id.is_empty() {
            missing.push("TELEGRAM_CHAT_ID".to_string());
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(BotError::MissingEnv(missing))
        }
    }

    pub fn chat_id(&self) -> Result<ChatId> {
        let id: i64 = self
            .telegram_chat_id
            .parse()
            .map_err(|e| BotError::InvalidConfig(format!("Invalid TELEGRAM_CHAT_ID: {}", e)))?;
        Ok(ChatId(id))
    }
}
