//! Configuration module
//!
//! Handles CLI configuration: where the admin service lives and how long a
//! single request may take. Built once in `main` and passed down explicitly.

use anyhow::{Context, Result};
use attrctl_client::AdminClient;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the admin service
    pub admin_url: String,

    /// Per-request timeout for admin calls
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a new configuration with the default timeout
    pub fn new(admin_url: String) -> Self {
        Self {
            admin_url,
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.admin_url.is_empty() {
            anyhow::bail!("admin_url cannot be empty");
        }

        if !self.admin_url.starts_with("http://") && !self.admin_url.starts_with("https://") {
            anyhow::bail!("admin_url must start with http:// or https://");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }

    /// Builds an admin client honoring the configured timeout
    pub fn client(&self) -> Result<AdminClient> {
        AdminClient::with_timeout(&self.admin_url, self.request_timeout)
            .context("Failed to build admin client")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:8088".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.admin_url = String::new();
        assert!(config.validate().is_err());

        config.admin_url = "localhost:8088".to_string();
        assert!(config.validate().is_err());

        config.admin_url = "https://admin.example.com".to_string();
        assert!(config.validate().is_ok());

        let config = config.with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_client_uses_admin_url() {
        let config = Config::new("http://localhost:30080/".to_string());
        let client = config.client().unwrap();
        assert_eq!(client.base_url(), "http://localhost:30080");
    }
}
