//! Custom error types for xs.
//!
//! Failures fall into three categories: credential/config problems are fatal
//! and detected before any network activity, feed interruptions end the
//! session with partial data retained, and storage failures are fatal (rows
//! already committed survive).

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for xs operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling better error messages and programmatic error handling.
#[derive(Error, Debug)]
pub enum XsError {
    // =========================================================================
    // Credential / Configuration Errors (fatal, pre-network)
    // =========================================================================
    /// No bearer token configured for the feed.
    #[error(
        "No bearer token configured.\nSet the XS_BEARER_TOKEN environment variable or add it under [credentials] in the config file."
    )]
    MissingCredentials,

    /// Invalid command-line argument.
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // =========================================================================
    // Feed Errors
    // =========================================================================
    /// The feed rejected the supplied credentials.
    #[error("Feed rejected credentials (HTTP {status}). Check that the bearer token is valid.")]
    AuthRejected { status: u16 },

    /// The feed returned a non-success status on connect.
    #[error("Could not open stream: {reason}")]
    FeedConnect { reason: String },

    /// The connection dropped mid-session. Posts collected so far are kept.
    #[error("Feed interrupted after {collected} post(s): {reason}")]
    FeedInterrupted { collected: usize, reason: String },

    /// A line from the feed could not be parsed as a post.
    #[error("Malformed post from feed: {reason}")]
    MalformedPost { reason: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// Database file not found (no session has run yet).
    #[error(
        "No collected posts found. Run 'xs stream <keyword>' first.\nExpected database at: {path}"
    )]
    DatabaseNotFound { path: PathBuf },

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    /// File read/write error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for xs operations.
pub type Result<T> = std::result::Result<T, XsError>;

impl XsError {
    /// Create a feed connect error.
    pub fn feed_connect(reason: impl Into<String>) -> Self {
        Self::FeedConnect {
            reason: reason.into(),
        }
    }

    /// Create a malformed post error.
    pub fn malformed_post(reason: impl Into<String>) -> Self {
        Self::MalformedPost {
            reason: reason.into(),
        }
    }

    /// Create a database not found error.
    pub fn database_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DatabaseNotFound { path: path.into() }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// True when the session can still end usefully with partial data.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::FeedInterrupted { .. } | Self::MalformedPost { .. }
        )
    }

    /// Get a suggestion for how to fix this error, if applicable.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MissingCredentials | Self::AuthRejected { .. } => {
                Some("Run 'xs config --init' to create a config file, then set the bearer token.")
            }
            Self::DatabaseNotFound { .. } => {
                Some("Run 'xs stream <keyword>' to collect posts first.")
            }
            Self::FeedConnect { .. } | Self::FeedInterrupted { .. } => {
                Some("Check network connectivity and the configured feed endpoint.")
            }
            _ => None,
        }
    }
}
