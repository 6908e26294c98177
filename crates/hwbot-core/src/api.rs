use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;
use tracing::{debug, error};

use crate::config::PollerConfig;
use crate::error::{HomeworkError, Result};

/// Source of homework statuses.
///
/// Production code uses [`PracticumClient`]; tests can provide a scripted
/// implementation.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetch statuses changed since `from_date` (Unix seconds).
    ///
    /// Returns the decoded JSON body on HTTP 200. Performs no retries.
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value>;
}

/// HTTP client for the homework review API.
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(config: &PollerConfig, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token: token.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Replace an absent or zero timestamp with the current time.
pub fn effective_timestamp(from_date: i64) -> i64 {
    if from_date == 0 {
        chrono::Utc::now().timestamp()
    } else {
        from_date
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value> {
        let timestamp = effective_timestamp(from_date);
        debug!("Requesting homework statuses from {}", timestamp);

        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", timestamp)])
            .send()
            .await
            .map_err(|e| {
                error!(critical = true, "Review API request failed: {}", e);
                HomeworkError::Transport(e)
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            error!(critical = true, "Review API responded with {} != 200", status.as_u16());
            return Err(HomeworkError::ApiStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            error!(critical = true, "Failed to read review API body: {}", e);
            HomeworkError::Transport(e)
        })?;

        serde_json::from_str(&body).map_err(|e| {
            error!("Review API body is not valid JSON: {}", e);
            HomeworkError::Decode(e)
        })
    }
}
