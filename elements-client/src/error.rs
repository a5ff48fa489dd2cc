//! Error types for the manifest client

use elements_core::ElementsError;
use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while fetching manifests
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Manifest request for '{name}' returned HTTP {status}")]
    Status { name: String, status: u16 },

    /// No manifest is known for this item
    #[error("Manifest not found: {0}")]
    NotFound(String),

    /// Response body was not a valid manifest
    #[error("Malformed manifest: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Error from the core library
    #[error(transparent)]
    Core(#[from] ElementsError),
}

impl ClientError {
    /// Map onto the core error taxonomy for a given item
    pub fn into_core(self, name: &str) -> ElementsError {
        match self {
            ClientError::Status { name, status } => ElementsError::ManifestStatus { name, status },
            ClientError::NotFound(name) => ElementsError::ItemNotFound { name },
            ClientError::Serialization(err) => ElementsError::JsonError(err),
            ClientError::Core(err) => err,
            other => ElementsError::ManifestFetchError {
                name: name.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_core() {
        let err = ClientError::Status {
            name: "logos".to_string(),
            status: 503,
        };
        assert_eq!(err.into_core("logos").error_code(), "MANIFEST_STATUS");

        let err = ClientError::NotFound("logos".to_string());
        assert_eq!(err.into_core("logos").http_status_code(), 404);

        let err = ClientError::Config("empty base url".to_string()).into_core("logos");
        assert!(err.is_recoverable());
    }
}
