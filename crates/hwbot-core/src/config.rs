use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HomeworkError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BACKOFF_BASE_SECS: u64 = 5;
pub const DEFAULT_BACKOFF_CAP_SECS: u64 = 300;

/// How the poll loop treats transient failures.
///
/// With `max_transient_retries == 0` every error is fatal after one sleep
/// of the poll interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_transient_retries: u32,
    pub backoff_base: Duration,
    pub backoff_cap: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_transient_retries: 0,
            backoff_base: Duration::from_secs(DEFAULT_BACKOFF_BASE_SECS),
            backoff_cap: Duration::from_secs(DEFAULT_BACKOFF_CAP_SECS),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based): `base * 2^attempt`, capped.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.backoff_base
            .checked_mul(factor)
            .unwrap_or(self.backoff_cap)
            .min(self.backoff_cap)
    }
}

/// Non-secret poller settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    pub endpoint: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
        }
    }
}

/// On-disk form of [`PollerConfig`]. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub poll_interval_secs: Option<u64>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub retry: RetryFile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryFile {
    #[serde(default)]
    pub max_transient_retries: Option<u32>,
    #[serde(default)]
    pub backoff_base_secs: Option<u64>,
    #[serde(default)]
    pub backoff_cap_secs: Option<u64>,
}

impl ConfigFile {
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| HomeworkError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HomeworkError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }
}

impl PollerConfig {
    /// Defaults, overlaid with whatever the file sets.
    pub fn from_file(file: &ConfigFile) -> Result<Self> {
        let mut config = Self::default();
        config.apply(file);
        config.validate()?;
        Ok(config)
    }

    /// Overlay the fields `file` sets onto `self`.
    pub fn apply(&mut self, file: &ConfigFile) {
        if let Some(endpoint) = &file.endpoint {
            self.endpoint.clone_from(endpoint);
        }
        if let Some(secs) = file.poll_interval_secs {
            self.poll_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(n) = file.retry.max_transient_retries {
            self.retry.max_transient_retries = n;
        }
        if let Some(secs) = file.retry.backoff_base_secs {
            self.retry.backoff_base = Duration::from_secs(secs);
        }
        if let Some(secs) = file.retry.backoff_cap_secs {
            self.retry.backoff_cap = Duration::from_secs(secs);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(HomeworkError::Config("endpoint must not be empty".into()));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(HomeworkError::Config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.poll_interval.is_zero() {
            return Err(HomeworkError::Config(
                "poll interval must be greater than zero".into(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(HomeworkError::Config(
                "request timeout must be greater than zero".into(),
            ));
        }
        if self.retry.backoff_cap < self.retry.backoff_base {
            return Err(HomeworkError::Config(
                "retry backoff cap must not be below the backoff base".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults() {
        let config = PollerConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.poll_interval, Duration::from_secs(600));
        assert_eq!(config.retry.max_transient_retries, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_overrides_only_what_it_sets() {
        let file = ConfigFile::parse("poll_interval_secs: 60\nretry:\n  max_transient_retries: 3\n")
            .unwrap();
        let config = PollerConfig::from_file(&file).unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.retry.max_transient_retries, 3);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn empty_file_is_defaults() {
        let file = ConfigFile::parse("{}").unwrap();
        assert_eq!(PollerConfig::from_file(&file).unwrap(), PollerConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ConfigFile::parse("poll_interval: 60\n").unwrap_err();
        assert!(matches!(err, HomeworkError::Config(_)));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let file = ConfigFile::parse("poll_interval_secs: 0\n").unwrap();
        let err = PollerConfig::from_file(&file).unwrap_err();
        assert!(err.to_string().contains("poll interval"));
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let file = ConfigFile::parse("endpoint: ftp://example.com\n").unwrap();
        assert!(PollerConfig::from_file(&file).is_err());
    }

    #[test]
    fn load_reads_from_disk() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "endpoint: http://localhost:8080/api/").unwrap();
        writeln!(tmp, "request_timeout_secs: 5").unwrap();

        let file = ConfigFile::load(tmp.path()).unwrap();
        let config = PollerConfig::from_file(&file).unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/api/");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigFile::load(&dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, HomeworkError::Config(_)));
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_transient_retries: 5,
            backoff_base: Duration::from_secs(5),
            backoff_cap: Duration::from_secs(30),
        };
        assert_eq!(policy.backoff_delay(0), Duration::from_secs(5));
        assert_eq!(policy.backoff_delay(1), Duration::from_secs(10));
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(20));
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(30));
        assert_eq!(policy.backoff_delay(40), Duration::from_secs(30));
    }
}
