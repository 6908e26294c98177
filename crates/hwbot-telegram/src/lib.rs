//! # hwbot-telegram
//!
//! Telegram delivery for hwbot notifications.
//!
//! - [`BotApi`] — the send primitive, with [`TelegramBot`] as the teloxide-backed implementation
//! - [`TelegramNotifier`] — binds a bot to one chat and implements [`hwbot_proto::Notifier`]
//! - [`ChatTarget`] — numeric chat id or `@channel` username
//! - [`error`] — error types for configuration and send failures

mod bot;
pub mod error;
mod notifier;

pub use bot::{BotApi, ChatTarget, TelegramBot};
pub use error::{TelegramError, TelegramResult};
pub use notifier::TelegramNotifier;
