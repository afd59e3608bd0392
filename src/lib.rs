pub mod config;
pub mod error;
pub mod poller;
pub mod practicum;
pub mod telegram;

pub use config::Config;
pub use error::{BotError, Result};
