use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::{debug, error, info};

/// Outbound chat notifications. Sending never fails from the caller's point
/// of view; delivery errors are logged and swallowed so a Telegram hiccup
/// cannot take down the polling loop.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str);
}

pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(token: &str, chat_id: ChatId) -> Self {
        Self {
            bot: Bot::new(token),
            chat_id,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) {
        info!("Sending message to chat {}", self.chat_id);

        match self.bot.send_message(self.chat_id, text).await {
            Ok(_) => debug!("Message delivered to chat {}", self.chat_id),
            Err(e) => error!("Failed to send message to chat {}: {}", self.chat_id, e),
        }
    }
}
