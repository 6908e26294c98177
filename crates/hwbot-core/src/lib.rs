//! # hwbot-core
//!
//! Polls the homework review API and turns status changes into
//! notification messages.
//!
//! - [`Credentials`] — the three secrets and the startup presence check
//! - [`PollerConfig`] — endpoint, interval, timeouts and [`RetryPolicy`]
//! - [`PracticumClient`] — the HTTP adapter behind the [`HomeworkApi`] trait
//! - [`check_response`] — shape validation of the decoded response
//! - [`VerdictTable`] — status → verdict translation
//! - [`StatusPoller`] — the poll loop
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hwbot_core::{Credentials, PollerConfig, PracticumClient, StatusPoller};
//! # use hwbot_proto::{DeliveryError, Notifier};
//! # struct Stdout;
//! # #[async_trait::async_trait]
//! # impl Notifier for Stdout {
//! #     async fn notify(&self, text: &str) -> Result<(), DeliveryError> {
//! #         println!("{text}");
//! #         Ok(())
//! #     }
//! # }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let var = |name: &str| std::env::var(name).unwrap_or_default();
//!     let credentials = Credentials::new(
//!         var("PRACTICUM_TOKEN"),
//!         var("TELEGRAM_TOKEN"),
//!         var("TELEGRAM_CHAT_ID"),
//!     );
//!     if !credentials.check() {
//!         return Ok(());
//!     }
//!
//!     let config = PollerConfig::default();
//!     let api = PracticumClient::new(&config, credentials.practicum_token.clone())?;
//!     let mut poller = StatusPoller::new(Arc::new(api), Arc::new(Stdout), &config);
//!     poller.run().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod poller;
pub mod types;
pub mod validate;
pub mod verdict;

pub use api::{HomeworkApi, PracticumClient};
pub use config::{ConfigFile, PollerConfig, RetryPolicy};
pub use credentials::{Credentials, mask_secret};
pub use error::{HomeworkError, Result};
pub use poller::{PollOutcome, StatusPoller, preview_latest};
pub use types::{HomeworkRecord, HomeworkStatus};
pub use validate::check_response;
pub use verdict::VerdictTable;
