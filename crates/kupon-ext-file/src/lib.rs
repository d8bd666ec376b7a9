//! # Kupon Ext File
//!
//! Offline market data for the Kupon indicator engine.
//!
//! This crate provides source implementations for tests, demos and replaying
//! captured exchange data:
//! - [`InMemorySource`]: maps filled through builder methods
//! - [`JsonFixtureSource`]: the same, loaded from a JSON fixture file
//!
//! Both serve coupon schedules in pages, so the engine's cursor walk runs
//! exactly as it does against the exchange.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod fixture;
mod memory;

pub use fixture::JsonFixtureSource;
pub use memory::{InMemorySource, DEFAULT_PAGE_SIZE};

use std::path::Path;
use std::sync::Arc;

use kupon_traits::error::SourceResult;
use kupon_traits::market_data::MarketDataProvider;

/// Create a fixture-file market data provider.
pub fn create_file_market_data(fixtures_json: impl AsRef<Path>) -> SourceResult<MarketDataProvider> {
    Ok(MarketDataProvider::from_source(Arc::new(
        JsonFixtureSource::load(fixtures_json)?,
    )))
}
