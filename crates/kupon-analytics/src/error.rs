//! Error types for indicator calculations.

use thiserror::Error;

/// Error type for all analytics operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// A date field does not match the `YYYY-MM-DD` calendar format
    #[error("cannot parse {field} date {value:?}")]
    DateParse {
        /// Name of the field
        field: String,
        /// Raw value
        value: String,
    },

    /// Date arithmetic left the representable range
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The quote carries no last price
    #[error("no market data for {isin}: last price is missing")]
    NoMarketData {
        /// Instrument
        isin: String,
    },

    /// The yield horizon collapsed to zero (or is not finite)
    #[error("degenerate yield horizon: {0}")]
    DegenerateHorizon(String),

    /// The full price is zero, so no return can be expressed against it
    #[error("degenerate price: {0}")]
    DegeneratePrice(String),
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl From<kupon_core::CoreError> for AnalyticsError {
    fn from(err: kupon_core::CoreError) -> Self {
        AnalyticsError::InvalidDate(err.to_string())
    }
}
