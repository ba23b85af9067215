//! Client configuration.
//!
//! Settings come from environment variables or are set directly:
//!
//! - `PROJECTS_AUTH_TOKEN` (required) - Bearer token for the API
//! - `PROJECTS_API_URL` (optional) - Base URL (defaults to `https://projects.api.cloud.ibm.com`)
//! - `PROJECTS_TIMEOUT_SECS` (optional) - Request timeout in seconds (defaults to 300)

use std::env;
use std::time::Duration;

use crate::error::{ProjectsError, Result};

/// Default base URL of the Cloud Projects API.
pub const DEFAULT_API_URL: &str = "https://projects.api.cloud.ibm.com";

/// Environment variable holding the bearer token.
pub const TOKEN_ENV: &str = "PROJECTS_AUTH_TOKEN";

/// Environment variable overriding the base URL.
pub const URL_ENV: &str = "PROJECTS_API_URL";

/// Environment variable overriding the request timeout.
pub const TIMEOUT_ENV: &str = "PROJECTS_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Settings used to build a [`ProjectsClient`](crate::ProjectsClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// Bearer token sent with every request.
    pub token: String,
    /// Base URL of the API.
    pub base_url: String,
    /// Timeout applied to each request.
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Create a configuration with the default timeout.
    pub fn new(token: &str, base_url: &str) -> Self {
        Self {
            token: token.to_string(),
            base_url: base_url.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PROJECTS_AUTH_TOKEN` is not set or
    /// `PROJECTS_TIMEOUT_SECS` is not a number.
    pub fn from_env() -> Result<Self> {
        let token = env::var(TOKEN_ENV).map_err(|_| {
            ProjectsError::ConfigMissing(format!("{TOKEN_ENV} environment variable not set"))
        })?;

        let base_url = env::var(URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout = match env::var(TIMEOUT_ENV) {
            Ok(secs) => Duration::from_secs(secs.trim().parse().map_err(|_| {
                ProjectsError::ConfigMissing(format!("{TIMEOUT_ENV} must be a whole number of seconds, got '{secs}'"))
            })?),
            Err(_) => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            token,
            base_url,
            timeout,
        })
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
