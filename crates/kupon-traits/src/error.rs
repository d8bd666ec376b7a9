//! Error types for market data sources.

use thiserror::Error;

/// A specialized Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Error reported by a market data source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// Transport failure talking to the provider
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The per-request deadline elapsed
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Provider answered with a non-success status
    #[error("provider returned HTTP {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Response body is not the expected JSON envelope
    #[error("cannot decode response: {0}")]
    Decode(String),

    /// A row field has the wrong runtime type at its position
    #[error("schema mismatch in {table} row {row}, column {index} ({column}): expected {expected}, found {found}")]
    SchemaMismatch {
        /// Table name
        table: String,
        /// Row number within the page
        row: usize,
        /// Column position
        index: usize,
        /// Column name
        column: String,
        /// Expected type
        expected: String,
        /// Found JSON value kind
        found: String,
    },

    /// Cursor or page payload is structurally incomplete
    #[error("malformed schedule: {0}")]
    MalformedSchedule(String),
}

impl SourceError {
    /// Creates a malformed schedule error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        SourceError::MalformedSchedule(reason.into())
    }

    /// True for transport-level failures (fetch, timeout, status, decode).
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            SourceError::Fetch(_)
                | SourceError::Timeout(_)
                | SourceError::Status { .. }
                | SourceError::Decode(_)
        )
    }
}
