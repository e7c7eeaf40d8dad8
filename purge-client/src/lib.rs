//! Pulp HTTP Client
//!
//! A small, typed HTTP client for the subset of the Pulp REST API the purge
//! tool needs: OSTree repositories and distributions, orphan cleanup, and
//! task status.
//!
//! The [`PulpApi`] trait is the seam between HTTP and the purge logic, so the
//! latter can be driven by an in-memory implementation in tests.
//!
//! # Example
//!
//! ```no_run
//! use purge_client::{Credentials, PulpApi, PulpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), purge_client::ClientError> {
//!     let client = PulpClient::new("http://localhost:24817")
//!         .with_credentials(Credentials::new("admin", "password"));
//!
//!     for repo in client.list_repositories().await? {
//!         println!("{} -> {}", repo.name, repo.pulp_href);
//!     }
//!     Ok(())
//! }
//! ```

mod api;
pub mod error;
mod resources;
mod tasks;

pub use api::PulpApi;
pub use error::{ClientError, Result};

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Default API root of a Pulp installation
pub const DEFAULT_API_ROOT: &str = "/pulp/";

/// Basic-auth credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// HTTP client for the Pulp API
///
/// Endpoints are grouped by concern:
/// - OSTree repositories and distributions (list, delete)
/// - Orphan cleanup and task status
#[derive(Debug, Clone)]
pub struct PulpClient {
    /// Base URL of the server (e.g., "http://localhost:24817")
    base_url: String,
    /// API root, always starting and ending with '/'
    api_root: String,
    /// Optional basic-auth credentials
    credentials: Option<Credentials>,
    /// HTTP client instance
    client: Client,
}

impl PulpClient {
    /// Create a new Pulp client using the default API root
    ///
    /// # Example
    /// ```
    /// use purge_client::PulpClient;
    ///
    /// let client = PulpClient::new("http://localhost:24817/");
    /// assert_eq!(client.base_url(), "http://localhost:24817");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new Pulp client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_root: DEFAULT_API_ROOT.to_string(),
            credentials: None,
            client,
        }
    }

    /// Use a non-default API root (Pulp's `API_ROOT` setting)
    pub fn with_api_root(mut self, api_root: impl AsRef<str>) -> Self {
        let trimmed = api_root.as_ref().trim_matches('/');
        self.api_root = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };
        self
    }

    /// Authenticate every request with basic auth
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the API root
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    // =============================================================================
    // URL Construction
    // =============================================================================

    /// Absolute URL of an endpoint under `{api_root}api/v3/`
    fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}{}api/v3/{}",
            self.base_url,
            self.api_root,
            path.trim_start_matches('/')
        )
    }

    /// Absolute URL of a server-relative href
    ///
    /// Hrefs returned by Pulp are paths such as `/pulp/api/v3/tasks/<id>/`.
    /// Absolute URLs are passed through untouched.
    fn href_url(&self, href: &str) -> Result<String> {
        let href = href.trim();
        if href.is_empty() {
            return Err(ClientError::InvalidRequest("empty href".to_string()));
        }

        if href.starts_with("http://") || href.starts_with("https://") {
            return Ok(href.to_string());
        }

        if href.starts_with('/') {
            Ok(format!("{}{}", self.base_url, href))
        } else {
            Ok(format!("{}/{}", self.base_url, href))
        }
    }

    /// Start a request, attaching credentials when configured
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match &self.credentials {
            Some(creds) => builder.basic_auth(&creds.username, Some(&creds.password)),
            None => builder,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-success statuses become [`ClientError::ApiError`] carrying the raw
    /// response body.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
