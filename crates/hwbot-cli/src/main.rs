//! # hwbot-cli
//!
//! Binary entry point for hwbot.
//!
//! This crate provides:
//! - CLI argument parsing using `clap`, with secrets read from the environment
//! - Logging setup via `tracing-subscriber`
//! - `hwbot run`: the status poll loop (default when no subcommand is given)
//! - `hwbot check`: a one-shot fetch that prints the latest verdict

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hwbot_core::{ConfigFile, Credentials, PollerConfig, PracticumClient, StatusPoller};
use hwbot_telegram::TelegramNotifier;
use tracing::info;

/// hwbot - homework review status notifications for Telegram
#[derive(Parser, Debug)]
#[command(name = "hwbot", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    secrets: SecretArgs,

    #[command(flatten)]
    overrides: ConfigOverrides,
}

/// Required secrets. Values are never echoed in `--help`.
#[derive(Args, Debug, Default)]
struct SecretArgs {
    /// Review API OAuth token
    #[arg(long, env = "PRACTICUM_TOKEN", hide_env_values = true, global = true)]
    practicum_token: Option<String>,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true, global = true)]
    telegram_token: Option<String>,

    /// Telegram chat id (number) or channel @username
    #[arg(long, env = "TELEGRAM_CHAT_ID", hide_env_values = true, global = true)]
    telegram_chat_id: Option<String>,
}

impl SecretArgs {
    fn credentials(&self) -> Credentials {
        Credentials::new(
            self.practicum_token.clone().unwrap_or_default(),
            self.telegram_token.clone().unwrap_or_default(),
            self.telegram_chat_id.clone().unwrap_or_default(),
        )
    }
}

/// Settings that take precedence over the configuration file.
#[derive(Args, Debug, Default)]
struct ConfigOverrides {
    /// Review API endpoint URL
    #[arg(long, env = "HWBOT_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Seconds between polls
    #[arg(long, value_name = "SECS", global = true)]
    poll_interval: Option<u64>,

    /// Per-request HTTP timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    request_timeout: Option<u64>,

    /// Transient failures to absorb with backoff before giving up (0 = none)
    #[arg(long, value_name = "N", global = true)]
    max_transient_retries: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Poll for status changes and send notifications (default)
    Run,

    /// Fetch once and print the latest homework verdict without sending it
    Check(CheckArgs),
}

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
struct CheckArgs {
    /// Start of the query window as a Unix timestamp (0 = now)
    #[arg(long, default_value_t = 0)]
    from_date: i64,
}

/// Resolve poller settings: defaults, then the file, then CLI flags.
fn resolve_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<PollerConfig> {
    let mut config = PollerConfig::default();

    if let Some(path) = path {
        let file = ConfigFile::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        config.apply(&file);
    }

    if let Some(endpoint) = &overrides.endpoint {
        config.endpoint.clone_from(endpoint);
    }
    if let Some(secs) = overrides.poll_interval {
        config.poll_interval = Duration::from_secs(secs);
    }
    if let Some(secs) = overrides.request_timeout {
        config.request_timeout = Duration::from_secs(secs);
    }
    if let Some(n) = overrides.max_transient_retries {
        config.retry.max_transient_retries = n;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing so clap's `env` lookups see its values
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = resolve_config(cli.config.as_deref(), &cli.overrides)?;
    let credentials = cli.secrets.credentials();

    match cli.command {
        None | Some(Commands::Run) => run_command(&config, &credentials).await,
        Some(Commands::Check(args)) => check_command(&config, &credentials, &args).await,
    }
}

async fn run_command(config: &PollerConfig, credentials: &Credentials) -> Result<()> {
    if !credentials.check() {
        // Missing secrets end the process cleanly; a supervisor restart would not help.
        return Ok(());
    }

    let api = PracticumClient::new(config, credentials.practicum_token.clone())
        .context("Failed to build review API client")?;
    let notifier =
        TelegramNotifier::from_token(&credentials.telegram_token, &credentials.telegram_chat_id)
            .context("Failed to set up Telegram notifier")?;

    info!(endpoint = %api.endpoint(), chat = %notifier.chat(), "hwbot starting");

    let mut poller = StatusPoller::new(Arc::new(api), Arc::new(notifier), config);
    let never = poller.run().await.context("Homework polling stopped")?;
    match never {}
}

async fn check_command(
    config: &PollerConfig,
    credentials: &Credentials,
    args: &CheckArgs,
) -> Result<()> {
    credentials.ensure_present()?;

    let api = PracticumClient::new(config, credentials.practicum_token.clone())
        .context("Failed to build review API client")?;
    let (record, message) = hwbot_core::preview_latest(&api, args.from_date)
        .await
        .context("Status check failed")?;

    info!(homework = %record.name, status = %record.status, "Latest homework fetched");
    println!("{message}");
    Ok(())
}
