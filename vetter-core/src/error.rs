//! Error types for application reviews

use thiserror::Error;

/// Result type alias for review operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for review operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No reviewer is signed in at submit time
    #[error("No reviewer is signed in; cannot submit a review")]
    NotAuthenticated,

    /// The issue has no applications to review
    #[error("Issue #{0} has no applications")]
    NoRequests(u64),

    /// A request index does not point into the current list
    #[error("Request index {index} is out of range ({len} requests)")]
    RequestIndexOutOfRange { index: usize, len: usize },

    /// A type index does not point into the current label list
    #[error("Type index {index} is out of range ({len} types)")]
    TypeIndexOutOfRange { index: usize, len: usize },

    /// The session was opened read-only
    #[error("Session is read-only; decisions are disabled")]
    ReadOnly,

    /// The active application already carries a review
    #[error("Application from {0} has already been reviewed")]
    AlreadyReviewed(String),

    /// Content-addressed store failure
    #[error("Content store error: {0}")]
    Store(String),

    /// Review-recording call failure
    #[error("Review record error: {0}")]
    Record(String),
}
