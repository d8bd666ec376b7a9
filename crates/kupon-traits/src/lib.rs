//! # Kupon Traits
//!
//! Trait definitions for the Kupon indicator engine.
//!
//! This crate contains ONLY trait definitions with ZERO runtime dependencies.
//! All implementations are in separate extension crates.
//!
//! ## Module Structure
//!
//! - [`market_data`]: Traits for the exchange data sources (security static
//!   data, quotes, coupon and amortization schedules, dividends)
//! - [`config`]: Engine configuration (tax rule, precision, fetch mode)
//! - [`error`]: The error every source reports
//! - [`ids`]: Identifier types
//!
//! ## Dependency Injection
//!
//! The indicator engine receives its provider explicitly:
//!
//! ```ignore
//! IndicatorEngineBuilder::new()
//!     .with_market_data(Arc::new(MarketDataProvider::from_source(iss_provider)))
//!     .with_config(EngineConfig::default())
//!     .build()
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod ids;
pub mod market_data;

// Re-export commonly used types
pub use config::{EngineConfig, FetchMode};
pub use error::{SourceError, SourceResult};
pub use ids::InstrumentId;
pub use market_data::{
    CouponCursor, DividendSource, MarketDataProvider, ScheduleSource, SecuritySource,
};
