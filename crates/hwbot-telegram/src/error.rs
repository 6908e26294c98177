use thiserror::Error;

/// Result type alias for telegram operations.
pub type TelegramResult<T> = std::result::Result<T, TelegramError>;

/// Errors that can occur during Telegram bot operations.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Bot token is empty.
    #[error("telegram bot token not found: set TELEGRAM_TOKEN")]
    MissingBotToken,

    /// Chat identifier is empty or malformed.
    #[error("invalid telegram chat id '{0}': expected a number or an @username")]
    InvalidChatId(String),

    /// The Bot API rejected or failed the request.
    #[error("failed to send telegram message: {0}")]
    Send(String),
}
