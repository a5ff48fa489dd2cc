//! Error types for Elements operations
//!
//! Every variant carries:
//! - A human-readable message
//! - A stable error code (e.g., `ITEM_NOT_FOUND`) for programmatic handling
//! - A category for grouping
//! - An HTTP status code for server integrations
//!
//! Note that "no match" from the match engine or the file resolver is not an
//! error. Those operations return `Option` and callers fall back to a default
//! view.
//!
//! # Example
//!
//! ```rust
//! use elements_core::error::{ElementsError, ErrorCategory};
//!
//! fn handle_error(err: ElementsError) {
//!     match err.category() {
//!         ErrorCategory::NotFound => println!("Item not found"),
//!         ErrorCategory::Validation => println!("Invalid input"),
//!         _ => println!("Other error"),
//!     }
//!
//!     let status = err.http_status_code();
//!     if err.is_recoverable() {
//!         println!("Retry may succeed ({})", status);
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for Elements operations
pub type Result<T> = std::result::Result<T, ElementsError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Resource not found (404)
    NotFound,
    /// Input validation failed (400)
    Validation,
    /// State conflict (409)
    Conflict,
    /// Internal error (500)
    Internal,
    /// External service or I/O error (502)
    External,
}

/// Errors that can occur in Elements operations
#[derive(Error, Debug)]
pub enum ElementsError {
    // ═══════════════════════════════════════════════════════════════════════
    // Registry errors (loading and looking up registry documents)
    // ═══════════════════════════════════════════════════════════════════════

    /// Registry item with the given name does not exist
    #[error("Registry item not found: '{name}'. Check the name or run `elements resolve` to find the closest item.")]
    ItemNotFound { name: String },

    /// Registry document is malformed or missing required fields
    #[error("Invalid registry manifest: {reason}")]
    InvalidManifest { reason: String },

    /// Two items in one registry share a canonical name
    #[error("Duplicate registry item: '{name}'. Item names must be unique.")]
    DuplicateItem { name: String },

    /// Failed to read a registry document from disk
    #[error("Failed to load registry from '{path}': {reason}")]
    RegistryLoadError { path: String, reason: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Remote manifest errors (fetching /r/{name}.json)
    // ═══════════════════════════════════════════════════════════════════════

    /// Network or transport failure while fetching an item manifest
    #[error("Failed to fetch manifest for '{name}': {reason}")]
    ManifestFetchError { name: String, reason: String },

    /// Remote server answered with a non-success status
    #[error("Manifest request for '{name}' returned HTTP {status}")]
    ManifestStatus { name: String, status: u16 },

    // ═══════════════════════════════════════════════════════════════════════
    // Input errors
    // ═══════════════════════════════════════════════════════════════════════

    /// Unknown package manager name
    #[error("Unknown package manager: '{value}'. Expected one of bun, npm, pnpm, yarn.")]
    UnknownPackageManager { value: String },

    /// Auth flow received an event that is not valid in its current state
    #[error("Invalid auth transition: cannot {action} while {state}")]
    InvalidTransition { state: String, action: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Infrastructure errors (serialization, caches, I/O)
    // ═══════════════════════════════════════════════════════════════════════

    /// JSON serialization or deserialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Cache lock is poisoned (panic occurred while holding lock)
    #[error("Cache lock poisoned. This is a bug; please report it.")]
    CacheLocked,

    /// I/O operation failed
    #[error("IO error: {message}")]
    IoError { message: String },

    /// Internal error that shouldn't happen
    #[error("Internal error: {reason}. This is a bug; please report it.")]
    InternalError { reason: String },
}

impl ElementsError {
    /// Returns true if this error might succeed on retry
    ///
    /// Only transport-level failures are worth retrying. A manifest that
    /// parsed but was rejected, or an unknown item, will fail the same way
    /// next time.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ElementsError::ManifestFetchError { .. } | ElementsError::CacheLocked => true,
            ElementsError::ManifestStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if this error is a client error (4xx equivalent)
    pub fn is_client_error(&self) -> bool {
        matches!(self.http_status_code(), 400..=499)
    }

    /// Returns true if this error is a server error (5xx equivalent)
    pub fn is_server_error(&self) -> bool {
        matches!(self.http_status_code(), 500..=599)
    }

    /// Returns the error category for grouping
    pub fn category(&self) -> ErrorCategory {
        match self {
            ElementsError::ItemNotFound { .. } => ErrorCategory::NotFound,

            ElementsError::InvalidManifest { .. }
            | ElementsError::UnknownPackageManager { .. } => ErrorCategory::Validation,

            ElementsError::DuplicateItem { .. }
            | ElementsError::InvalidTransition { .. } => ErrorCategory::Conflict,

            ElementsError::CacheLocked | ElementsError::InternalError { .. } => {
                ErrorCategory::Internal
            }

            ElementsError::RegistryLoadError { .. }
            | ElementsError::ManifestFetchError { .. }
            | ElementsError::ManifestStatus { .. }
            | ElementsError::JsonError(_)
            | ElementsError::IoError { .. } => ErrorCategory::External,
        }
    }

    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ElementsError::ItemNotFound { .. } => "ITEM_NOT_FOUND",
            ElementsError::InvalidManifest { .. } => "INVALID_MANIFEST",
            ElementsError::DuplicateItem { .. } => "DUPLICATE_ITEM",
            ElementsError::RegistryLoadError { .. } => "REGISTRY_LOAD_ERROR",
            ElementsError::ManifestFetchError { .. } => "MANIFEST_FETCH_ERROR",
            ElementsError::ManifestStatus { .. } => "MANIFEST_STATUS",
            ElementsError::UnknownPackageManager { .. } => "UNKNOWN_PACKAGE_MANAGER",
            ElementsError::InvalidTransition { .. } => "INVALID_TRANSITION",
            ElementsError::JsonError(_) => "JSON_ERROR",
            ElementsError::CacheLocked => "CACHE_LOCKED",
            ElementsError::IoError { .. } => "IO_ERROR",
            ElementsError::InternalError { .. } => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client sent invalid data
            ElementsError::InvalidManifest { .. }
            | ElementsError::UnknownPackageManager { .. } => 400,

            // 404 Not Found
            ElementsError::ItemNotFound { .. } => 404,

            // 409 Conflict
            ElementsError::DuplicateItem { .. }
            | ElementsError::InvalidTransition { .. } => 409,

            // 500 Internal Server Error
            ElementsError::CacheLocked | ElementsError::InternalError { .. } => 500,

            // 502 Bad Gateway - External dependency failed
            ElementsError::RegistryLoadError { .. }
            | ElementsError::ManifestFetchError { .. }
            | ElementsError::ManifestStatus { .. }
            | ElementsError::JsonError(_)
            | ElementsError::IoError { .. } => 502,
        }
    }

    /// Converts this error to a JSON-serializable response object
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                category: self.category(),
                recoverable: self.is_recoverable(),
            },
        }
    }
}

impl From<std::io::Error> for ElementsError {
    fn from(err: std::io::Error) -> Self {
        ElementsError::IoError {
            message: err.to_string(),
        }
    }
}

/// JSON-serializable error response for APIs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,
}

/// Error detail for JSON responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable error code (e.g., "ITEM_NOT_FOUND")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Error category
    pub category: ErrorCategory,
    /// Whether retry might succeed
    pub recoverable: bool,
}
