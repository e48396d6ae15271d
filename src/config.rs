//! Configuration loading for todoist-mcp
//!
//! Configuration comes entirely from the environment:
//! 1. TODOIST_API_TOKEN (required)
//! 2. TODOIST_API_URL (optional base-URL override, e.g. a proxy)
//! 3. TODOIST_TIMEOUT_SECS (optional HTTP timeout, default 30)

use anyhow::{bail, Context, Result};

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Todoist personal API token
    pub api_token: String,
    /// Base URL covering both the REST and Sync endpoints
    pub api_url: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.todoist.com".to_string()
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Returns `Err` if `TODOIST_API_TOKEN` is not set or is empty; the
    /// server cannot reach Todoist without it, so `main` treats this as
    /// fatal before serving.
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var("TODOIST_API_TOKEN")
            .context("TODOIST_API_TOKEN environment variable is not set")?;
        if api_token.is_empty() {
            bail!("TODOIST_API_TOKEN environment variable is empty");
        }

        let api_url = std::env::var("TODOIST_API_URL").unwrap_or_else(|_| default_api_url());

        let timeout_secs = match std::env::var("TODOIST_TIMEOUT_SECS") {
            Ok(value) => value
                .parse()
                .context("TODOIST_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => 30,
        };

        Ok(Self {
            api_token,
            api_url,
            timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_token() {
        // Env vars are process-global, so this test covers both the set and
        // missing cases sequentially instead of racing a sibling test.
        std::env::remove_var("TODOIST_API_URL");
        std::env::remove_var("TODOIST_TIMEOUT_SECS");

        std::env::set_var("TODOIST_API_TOKEN", "tok-123");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_token, "tok-123");
        assert_eq!(config.api_url, "https://api.todoist.com");
        assert_eq!(config.timeout_secs, 30);

        std::env::remove_var("TODOIST_API_TOKEN");
        assert!(Config::from_env().is_err());
    }
}
