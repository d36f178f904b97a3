//! attrctl Admin Client
//!
//! A small, type-safe HTTP client for the attribute endpoints of the
//! workflow platform's admin service.
//!
//! # Example
//!
//! ```no_run
//! use attrctl_client::AdminClient;
//! use attrctl_core::domain::resource::MatchableResource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), attrctl_client::ClientError> {
//!     let client = AdminClient::new("http://localhost:8088");
//!
//!     let attrs = client
//!         .fetch_project_attributes("flytesnacks", MatchableResource::ExecutionQueue)
//!         .await?;
//!
//!     println!("{:?}", attrs.attributes);
//!     Ok(())
//! }
//! ```

pub mod error;
mod attributes;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the admin API
///
/// Attribute endpoints come in three flavours, one per scope:
/// - project attributes
/// - project + domain attributes
/// - workflow attributes
#[derive(Debug, Clone)]
pub struct AdminClient {
    /// Base URL of the admin service (e.g., "http://localhost:8088")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl AdminClient {
    /// Create a new admin client
    ///
    /// # Example
    /// ```
    /// use attrctl_client::AdminClient;
    ///
    /// let client = AdminClient::new("http://localhost:8088");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new admin client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Get the base URL of the admin service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    ///
    /// A 404 is reported as [`ClientError::NotFound`] so callers can tell
    /// "nothing stored yet" apart from real failures.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        Self::check_status(response).await?;
        Ok(())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!("{} returned 404: {}", url, error_text);
            return Err(ClientError::NotFound(url));
        }

        Err(ClientError::api_error(status.as_u16(), error_text))
    }
}
