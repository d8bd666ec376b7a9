//! # Kupon Engine
//!
//! The indicator engine for Kupon.
//!
//! This crate provides:
//! - [`IndicatorEngine`]: computes [`BondIndicators`](kupon_core::BondIndicators)
//!   for one ISIN, and serves the raw schedules and dividends
//! - [`IndicatorEngineBuilder`]: wires the engine to a market data provider
//! - [`Stage`]: the linear pipeline one computation walks
//!
//! ## Pipeline
//!
//! ```text
//! FetchBondStatic ─> FetchMarketQuote ─> ResolveEventDate ─> ResolveSettlementDate
//!     ─> FetchCoupons ─> FetchAmortizations ─> ComputeNetPeriod ─> ComputeYields
//! ```
//!
//! `ComputeYields` returns the finished record, so there is no separate
//! assembly step.
//!
//! With `FetchMode::Concurrent` the four fetches run together and coupon
//! pages are requested in parallel once the cursor is known; the first
//! failure aborts the rest.
//!
//! ## Usage
//!
//! ```ignore
//! let engine = IndicatorEngineBuilder::new()
//!     .with_market_data(Arc::new(market_data_provider))
//!     .with_config(EngineConfig::default())
//!     .build()?;
//!
//! let indicators = engine.compute_bond_indicators("RU000A101QE0").await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod engine;
pub mod error;
pub mod stage;

// Re-exports
pub use builder::IndicatorEngineBuilder;
pub use engine::IndicatorEngine;
pub use error::{EngineError, EngineResult, ErrorKind};
pub use stage::Stage;
