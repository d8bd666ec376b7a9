//! Engine error types.

use serde::Serialize;
use thiserror::Error;

use kupon_analytics::AnalyticsError;
use kupon_traits::SourceError;

/// Engine error type.
///
/// Source and analytics failures are carried unchanged, so the message is
/// the one of the step that failed.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Provider failure
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Calculation failure
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Flat classification of [`EngineError`], for mapping to statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Network, timeout, HTTP status or undecodable body
    Fetch,
    /// A row field has the wrong type
    SchemaMismatch,
    /// Cursor or page structurally incomplete
    MalformedSchedule,
    /// A date field cannot be parsed
    DateParse,
    /// No last price
    NoMarketData,
    /// Zero-length yield horizon
    DegenerateHorizon,
    /// Zero full price
    DegeneratePrice,
    /// Engine misconfigured
    Config,
}

impl ErrorKind {
    /// Stable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Fetch => "fetch",
            ErrorKind::SchemaMismatch => "schema_mismatch",
            ErrorKind::MalformedSchedule => "malformed_schedule",
            ErrorKind::DateParse => "date_parse",
            ErrorKind::NoMarketData => "no_market_data",
            ErrorKind::DegenerateHorizon => "degenerate_horizon",
            ErrorKind::DegeneratePrice => "degenerate_price",
            ErrorKind::Config => "config",
        }
    }
}

impl EngineError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::ConfigError(_) => ErrorKind::Config,
            EngineError::Source(err) => match err {
                SourceError::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
                SourceError::MalformedSchedule(_) => ErrorKind::MalformedSchedule,
                SourceError::Fetch(_)
                | SourceError::Timeout(_)
                | SourceError::Status { .. }
                | SourceError::Decode(_) => ErrorKind::Fetch,
            },
            EngineError::Analytics(err) => match err {
                AnalyticsError::DateParse { .. } | AnalyticsError::InvalidDate(_) => {
                    ErrorKind::DateParse
                }
                AnalyticsError::NoMarketData { .. } => ErrorKind::NoMarketData,
                AnalyticsError::DegenerateHorizon(_) => ErrorKind::DegenerateHorizon,
                AnalyticsError::DegeneratePrice(_) => ErrorKind::DegeneratePrice,
            },
        }
    }
}
