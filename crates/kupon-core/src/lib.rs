//! # Kupon Core
//!
//! Core types for the Kupon bond indicator engine.
//!
//! This crate provides the foundational building blocks used throughout Kupon:
//!
//! - **Date**: A day-granular calendar date with the arithmetic yield horizons need
//! - **Records**: Instrument static data, market quotes, coupon and amortization
//!   schedule entries, dividends, and the computed [`BondIndicators`]
//!
//! ## Design Philosophy
//!
//! - **Raw where the provider is raw**: schedule dates stay as the provider's
//!   strings until a calculation needs them, so a bad date fails the calculation
//!   that depends on it rather than the fetch
//! - **Explicit absence**: a quote with no last price is `None`, never `0.0`
//!
//! ## Example
//!
//! ```rust
//! use kupon_core::prelude::*;
//!
//! let settle = Date::parse("2020-01-01").unwrap();
//! let event = Date::from_ymd(2020, 1, 30).unwrap();
//! assert_eq!(event - settle, 29);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        Amortization, Bond, BondIndicators, Coupon, Date, Dividend, MarketQuote,
    };
}

pub use error::{CoreError, CoreResult};
pub use types::{Amortization, Bond, BondIndicators, Coupon, Date, Dividend, MarketQuote};
