//! Error types for attribute synchronization

use attrctl_client::ClientError;
use attrctl_core::domain::scope::Scope;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end an update, delete or get run
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Required input missing or inconsistent
    #[error("{0}")]
    Validation(String),

    /// Attribute file could not be read
    #[error("unable to read from {} yaml file", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Attribute file does not match the expected schema
    #[error("unable to decode {}: {}", .path.display(), .source)]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Stored or desired attributes could not be rendered for the diff
    #[error("unable to render attributes for {scope}: {source}")]
    Render {
        scope: Scope,
        #[source]
        source: serde_yaml::Error,
    },

    /// The operator declined the confirmation prompt
    #[error("{action} aborted by user")]
    AbortedByUser { action: &'static str },

    /// Admin service call failed
    #[error(transparent)]
    Remote(#[from] ClientError),

    /// Reading the confirmation answer failed
    #[error("confirmation prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("operation cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;

    #[test]
    fn test_render_error_names_scope_not_file() {
        let err = UpdateError::Render {
            scope: Scope::Project {
                project: "flytesnacks".to_string(),
            },
            source: serde_yaml::Error::custom("unsupported value"),
        };

        let message = err.to_string();
        assert!(message.starts_with("unable to render attributes for flytesnacks project"));
        assert!(!message.contains("yaml file"));
    }
}
