use std::fmt;

use async_trait::async_trait;
use hwbot_proto::{DeliveryError, Notifier};
use tracing::{error, info};

use crate::bot::{BotApi, ChatTarget, TelegramBot};
use crate::error::TelegramResult;

/// Sends notifications to one fixed Telegram chat.
pub struct TelegramNotifier<B = TelegramBot> {
    bot: B,
    chat: ChatTarget,
}

impl TelegramNotifier<TelegramBot> {
    /// Build a notifier from a bot token and a chat identifier string.
    pub fn from_token(bot_token: &str, chat_id: &str) -> TelegramResult<Self> {
        let chat = chat_id.parse::<ChatTarget>()?;
        Ok(Self::new(TelegramBot::new(bot_token)?, chat))
    }
}

impl<B: BotApi> TelegramNotifier<B> {
    pub fn new(bot: B, chat: ChatTarget) -> Self {
        Self { bot, chat }
    }

    pub fn chat(&self) -> &ChatTarget {
        &self.chat
    }
}

#[async_trait]
impl<B: BotApi> Notifier for TelegramNotifier<B> {
    async fn notify(&self, text: &str) -> Result<(), DeliveryError> {
        match self.bot.send_message(&self.chat, text).await {
            Ok(message_id) => {
                info!(chat = %self.chat, message_id, "Message sent: {}", text);
                Ok(())
            }
            Err(e) => {
                error!(critical = true, chat = %self.chat, "Failed to send message: {}", e);
                Err(DeliveryError::new("telegram", e.to_string()))
            }
        }
    }
}

impl<B> fmt::Debug for TelegramNotifier<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat", &self.chat)
            .finish_non_exhaustive()
    }
}
