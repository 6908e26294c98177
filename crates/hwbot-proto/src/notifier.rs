//! Outbound notification abstraction.
//!
//! Defines the [`Notifier`] trait that messaging adapters (Telegram, etc.)
//! implement. The destination is fixed when the adapter is built, so the
//! poll loop only ever hands over the message text.

use async_trait::async_trait;
use thiserror::Error;

/// A message could not be delivered to its recipient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to deliver message via {channel}: {reason}")]
pub struct DeliveryError {
    /// Short name of the channel that failed (e.g. `"telegram"`).
    pub channel: String,
    /// Underlying failure, rendered as text.
    pub reason: String,
}

impl DeliveryError {
    pub fn new(channel: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            reason: reason.into(),
        }
    }
}

/// Sends a text message to a destination fixed at construction time.
///
/// Implementors perform no retries. A returned error means the message
/// was not delivered, and the caller decides what happens next.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text` to the configured recipient.
    async fn notify(&self, text: &str) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for Recorder {
        async fn notify(&self, text: &str) -> Result<(), DeliveryError> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn delivery_error_display_names_channel() {
        let err = DeliveryError::new("telegram", "chat not found");
        assert_eq!(
            err.to_string(),
            "failed to deliver message via telegram: chat not found"
        );
    }

    #[tokio::test]
    async fn notifier_is_object_safe() {
        let recorder = Recorder {
            sent: Mutex::new(Vec::new()),
        };
        let notifier: &dyn Notifier = &recorder;
        notifier.notify("hello").await.unwrap();
        assert_eq!(recorder.sent.lock().unwrap().as_slice(), ["hello"]);
    }
}
