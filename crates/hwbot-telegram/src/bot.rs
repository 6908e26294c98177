use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::error::{TelegramError, TelegramResult};

/// Destination of a Telegram message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    /// Numeric chat id (users, groups, supergroups).
    Id(i64),
    /// Public channel or supergroup username, including the leading `@`.
    Username(String),
}

impl FromStr for ChatTarget {
    type Err = TelegramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(id) = trimmed.parse::<i64>() {
            return Ok(ChatTarget::Id(id));
        }
        match trimmed.strip_prefix('@') {
            Some(name) if !name.is_empty() && !name.contains(char::is_whitespace) => {
                Ok(ChatTarget::Username(trimmed.to_string()))
            }
            _ => Err(TelegramError::InvalidChatId(s.to_string())),
        }
    }
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatTarget::Id(id) => write!(f, "{id}"),
            ChatTarget::Username(name) => f.write_str(name),
        }
    }
}

impl From<&ChatTarget> for teloxide::types::Recipient {
    fn from(target: &ChatTarget) -> Self {
        match target {
            ChatTarget::Id(id) => teloxide::types::Recipient::Id(teloxide::types::ChatId(*id)),
            ChatTarget::Username(name) => teloxide::types::Recipient::ChannelUsername(name.clone()),
        }
    }
}

/// Trait abstracting Telegram bot operations for testability.
///
/// Production code uses [`TelegramBot`]; tests can provide a mock implementation.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// Send a plain-text message to the given chat.
    ///
    /// Returns the Telegram message ID of the sent message.
    async fn send_message(&self, chat: &ChatTarget, text: &str) -> TelegramResult<i32>;
}

/// Wraps a `teloxide::Bot`.
pub struct TelegramBot {
    bot: teloxide::Bot,
}

impl TelegramBot {
    /// Create a new TelegramBot from a bot token.
    pub fn new(token: &str) -> TelegramResult<Self> {
        if token.is_empty() {
            return Err(TelegramError::MissingBotToken);
        }
        Ok(Self {
            bot: teloxide::Bot::new(token),
        })
    }
}

#[async_trait]
impl BotApi for TelegramBot {
    async fn send_message(&self, chat: &ChatTarget, text: &str) -> TelegramResult<i32> {
        use teloxide::prelude::*;

        let result = self
            .bot
            .send_message(teloxide::types::Recipient::from(chat), text)
            .await
            .map_err(|e| TelegramError::Send(e.to_string()))?;

        Ok(result.id.0)
    }
}
