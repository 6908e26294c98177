use std::fmt;

use tracing::{error, info};

use crate::error::{HomeworkError, Result};

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// The three secrets the poller needs before it may start.
///
/// Absent values are kept as empty strings so the startup check can report
/// every missing one at once instead of failing on the first.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl Credentials {
    pub fn new(
        practicum_token: impl Into<String>,
        telegram_token: impl Into<String>,
        telegram_chat_id: impl Into<String>,
    ) -> Self {
        Self {
            practicum_token: practicum_token.into(),
            telegram_token: telegram_token.into(),
            telegram_chat_id: telegram_chat_id.into(),
        }
    }

    /// Names of the secrets that are empty.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN_VAR, &self.practicum_token),
            (TELEGRAM_TOKEN_VAR, &self.telegram_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Startup check: true iff every secret is present.
    ///
    /// Logs at info on success and at critical severity otherwise. Never
    /// fails; the caller decides whether to start the loop.
    pub fn check(&self) -> bool {
        match self.ensure_present() {
            Ok(()) => {
                info!("All required environment variables are set");
                true
            }
            Err(e) => {
                error!(critical = true, "Not all environment variables are set: {}", e);
                false
            }
        }
    }

    /// Like [`Credentials::check`] but returns the typed error and does not log.
    pub fn ensure_present(&self) -> Result<()> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(HomeworkError::MissingCredentials(missing))
        }
    }
}

/// Show only the first and last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else if chars.is_empty() {
        "<unset>".to_string()
    } else {
        "****".to_string()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &mask_secret(&self.practicum_token))
            .field("telegram_token", &mask_secret(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}
