//! Source error types.

use thiserror::Error;

/// Errors that can occur while fetching a question bank.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file or URL does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server returned an error response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The document was fetched but could not be decoded.
    #[error("failed to parse {location}: {message}")]
    Parse { location: String, message: String },

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
