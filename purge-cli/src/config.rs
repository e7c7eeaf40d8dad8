//! Configuration module
//!
//! Connection and polling settings for a purge run, assembled from CLI flags
//! and environment variables.

use std::time::Duration;

use purge_client::Credentials;

/// Default Pulp API address
pub const DEFAULT_PULP_URL: &str = "http://localhost:24817";

/// Default interval between task status reads
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Purge configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Pulp server
    pub pulp_url: String,

    /// Pulp API root (e.g. "/pulp/")
    pub api_root: String,

    /// Basic-auth credentials, if any
    pub credentials: Option<Credentials>,

    /// How often to read the cleanup task's state
    pub poll_interval: Duration,

    /// Give up waiting on the cleanup task after this long; unbounded when `None`
    pub task_timeout: Option<Duration>,

    /// List what would be deleted without deleting anything
    pub dry_run: bool,
}

impl Config {
    /// Creates a configuration with defaults for everything but the URL
    pub fn new(pulp_url: impl Into<String>) -> Self {
        Self {
            pulp_url: pulp_url.into(),
            api_root: purge_client::DEFAULT_API_ROOT.to_string(),
            credentials: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            task_timeout: None,
            dry_run: false,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.pulp_url.is_empty() {
            anyhow::bail!("pulp_url cannot be empty");
        }

        if !self.pulp_url.starts_with("http://") && !self.pulp_url.starts_with("https://") {
            anyhow::bail!("pulp_url must start with http:// or https://");
        }

        if !self.api_root.starts_with('/') || !self.api_root.ends_with('/') {
            anyhow::bail!("api_root must start and end with '/'");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.task_timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("task_timeout must be greater than 0");
        }

        if let Some(creds) = &self.credentials {
            if creds.username.is_empty() {
                anyhow::bail!("username cannot be empty when a password is set");
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_PULP_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.pulp_url, "http://localhost:24817");
        assert_eq!(config.api_root, "/pulp/");
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert!(config.task_timeout.is_none());
        assert!(!config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.pulp_url = "localhost:24817".to_string();
        assert!(config.validate().is_err());

        config.pulp_url = "https://pulp.example.com".to_string();
        assert!(config.validate().is_ok());

        config.api_root = "pulp".to_string();
        assert!(config.validate().is_err());
        config.api_root = "/pulp/".to_string();

        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
        config.poll_interval = Duration::from_secs(1);

        config.task_timeout = Some(Duration::ZERO);
        assert!(config.validate().is_err());
        config.task_timeout = Some(Duration::from_secs(600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_credentials_need_username() {
        let mut config = Config::default();
        config.credentials = Some(Credentials::new("", "secret"));
        assert!(config.validate().is_err());

        config.credentials = Some(Credentials::new("admin", "secret"));
        assert!(config.validate().is_ok());
    }
}
