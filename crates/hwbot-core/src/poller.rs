//! The poll loop.
//!
//! One iteration: fetch statuses since the cursor, validate the response,
//! notify if the most recent homework changed status, advance the cursor.
//! Every step runs sequentially on the calling task; nothing is spawned.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use hwbot_proto::Notifier;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::api::HomeworkApi;
use crate::config::{PollerConfig, RetryPolicy};
use crate::error::Result;
use crate::types::HomeworkRecord;
use crate::validate::{check_response, current_date};
use crate::verdict::{VerdictTable, extract_record};

/// Result of a single successful poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The latest homework changed status and a message was sent.
    Notified { homework: String, status: String },
    /// The latest homework still has the last notified status.
    NoUpdates,
}

/// Polls the review API and notifies on status changes.
pub struct StatusPoller {
    api: Arc<dyn HomeworkApi>,
    notifier: Arc<dyn Notifier>,
    verdicts: VerdictTable,
    interval: Duration,
    retry: RetryPolicy,
    cursor: i64,
    last_status: Option<String>,
}

impl StatusPoller {
    /// Create a poller whose cursor starts at the current time.
    pub fn new(
        api: Arc<dyn HomeworkApi>,
        notifier: Arc<dyn Notifier>,
        config: &PollerConfig,
    ) -> Self {
        Self {
            api,
            notifier,
            verdicts: VerdictTable::default(),
            interval: config.poll_interval,
            retry: config.retry,
            cursor: chrono::Utc::now().timestamp(),
            last_status: None,
        }
    }

    /// Start polling from `cursor` instead of now.
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    /// Lower bound of the next query window (Unix seconds).
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Status of the most recently notified homework.
    pub fn last_status(&self) -> Option<&str> {
        self.last_status.as_deref()
    }

    /// Run one poll iteration without sleeping.
    ///
    /// The cursor moves to the server's `current_date` only when the whole
    /// iteration succeeds.
    pub async fn poll_once(&mut self) -> Result<PollOutcome> {
        let response = self.api.fetch_statuses(self.cursor).await?;
        let homeworks = check_response(&response)?;
        let latest = &homeworks[0];
        let status = latest.get("status").and_then(Value::as_str);

        let outcome = if status.is_some() && status == self.last_status.as_deref() {
            info!("No updates");
            PollOutcome::NoUpdates
        } else {
            let message = self.verdicts.parse_status(latest)?;
            let record = extract_record(latest)?;
            self.notifier.notify(&message).await?;
            info!(
                homework = %record.name,
                status = %record.status,
                "Homework status check completed"
            );
            self.last_status = Some(record.status.clone());
            PollOutcome::Notified {
                homework: record.name,
                status: record.status,
            }
        };

        if let Some(date) = current_date(&response) {
            debug!("Advancing cursor {} -> {}", self.cursor, date);
            self.cursor = date;
        }

        Ok(outcome)
    }

    /// Poll forever, sleeping the fixed interval between iterations.
    ///
    /// Only returns on a fatal error, after logging it at critical severity
    /// and sleeping one more interval. Transient errors are retried with
    /// backoff while the retry budget lasts.
    pub async fn run(&mut self) -> Result<Infallible> {
        info!(
            interval_secs = self.interval.as_secs(),
            max_transient_retries = self.retry.max_transient_retries,
            "Starting homework status polling"
        );

        let mut transient_failures: u32 = 0;
        loop {
            match self.poll_once().await {
                Ok(_) => {
                    transient_failures = 0;
                    tokio::time::sleep(self.interval).await;
                }
                Err(e)
                    if e.is_transient() && transient_failures < self.retry.max_transient_retries =>
                {
                    let delay = self.retry.backoff_delay(transient_failures);
                    transient_failures += 1;
                    warn!(
                        attempt = transient_failures,
                        max_attempts = self.retry.max_transient_retries,
                        delay_secs = delay.as_secs(),
                        "Transient failure, retrying: {}",
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    error!(critical = true, "Program failure: {}", e);
                    tokio::time::sleep(self.interval).await;
                    return Err(e);
                }
            }
        }
    }
}

/// Fetch, validate and translate the latest homework without notifying.
pub async fn preview_latest(
    api: &dyn HomeworkApi,
    from_date: i64,
) -> Result<(HomeworkRecord, String)> {
    let response = api.fetch_statuses(from_date).await?;
    let homeworks = check_response(&response)?;
    let record = extract_record(&homeworks[0])?;
    let message = VerdictTable::default().parse_status(&homeworks[0])?;
    Ok((record, message))
}
