//! Pulp Purge CLI
//!
//! Deletes every OSTree repository and distribution on a Pulp server, then
//! runs an orphan cleanup and waits for it to finish.

mod config;
mod error;
mod purge;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use purge_client::{Credentials, PulpApi, PulpClient};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use purge::Purger;

#[derive(Parser)]
#[command(name = "pulp-purge")]
#[command(about = "Delete all OSTree content from a Pulp server", long_about = None)]
struct Cli {
    /// Pulp server URL
    #[arg(long, env = "PULP_URL", default_value = config::DEFAULT_PULP_URL)]
    pulp_url: String,

    /// Pulp API root
    #[arg(long, env = "PULP_API_ROOT", default_value = purge_client::DEFAULT_API_ROOT)]
    api_root: String,

    /// Username for basic auth
    #[arg(long, env = "PULP_USERNAME", default_value = "admin")]
    username: String,

    /// Password for basic auth; requests are unauthenticated when unset
    #[arg(long, env = "PULP_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Seconds between cleanup task status reads
    #[arg(long, env = "PULP_POLL_INTERVAL", default_value_t = 2)]
    poll_interval: u64,

    /// Give up on the cleanup task after this many seconds (waits forever when unset)
    #[arg(long, env = "PULP_TASK_TIMEOUT")]
    timeout: Option<u64>,

    /// List what would be deleted without deleting anything
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            pulp_url: self.pulp_url,
            api_root: self.api_root,
            credentials: self
                .password
                .map(|password| Credentials::new(self.username, password)),
            poll_interval: Duration::from_secs(self.poll_interval),
            task_timeout: self.timeout.map(Duration::from_secs),
            dry_run: self.dry_run,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the progress report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulp_purge=info,purge_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Cli::parse().into_config();
    config.validate().context("Invalid configuration")?;

    info!(
        "Purging {}{} (auth: {})",
        config.pulp_url,
        config.api_root,
        if config.credentials.is_some() { "basic" } else { "none" }
    );

    let client = build_client(&config)?;
    let purger = Purger::from_config(client, &config);

    if config.dry_run {
        let plan = purger.plan().await?;
        purge::print_plan(&plan);
        return Ok(());
    }

    let summary = purger.run().await?;
    purge::print_summary(&summary);

    Ok(())
}

fn build_client(config: &Config) -> Result<Arc<dyn PulpApi>> {
    let http = reqwest::Client::builder()
        .user_agent(concat!("pulp-purge/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let mut client = PulpClient::with_client(config.pulp_url.clone(), http)
        .with_api_root(&config.api_root);
    if let Some(creds) = &config.credentials {
        client = client.with_credentials(creds.clone());
    }

    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = Cli::parse_from(["pulp-purge"]).into_config();
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert!(config.task_timeout.is_none());
        assert!(!config.dry_run);
    }

    #[test]
    fn test_password_enables_credentials() {
        let config = Cli::parse_from([
            "pulp-purge",
            "--pulp-url",
            "https://pulp.example.com",
            "--username",
            "ops",
            "--password",
            "hunter2",
            "--timeout",
            "300",
            "--dry-run",
        ])
        .into_config();

        assert!(config.validate().is_ok());
        assert_eq!(config.task_timeout, Some(Duration::from_secs(300)));
        assert!(config.dry_run);

        let creds = config.credentials.expect("credentials");
        assert_eq!(creds.username, "ops");
        assert_eq!(creds.password, "hunter2");
    }
}
