//! # Kupon Ext ISS
//!
//! Market data provider for the Moscow Exchange ISS JSON API.
//!
//! This crate implements the Kupon source traits:
//! - Bond static data and last price (`engines/{engine}/markets/{market}/securities`)
//! - Coupon cursor, coupon pages and amortizations (`statistics/.../bondization`)
//! - Share dividends (`securities/{isin}/dividends`)
//!
//! Positional ISS tables are checked against a [`TableSchema`] before any
//! record is built, so a column of the wrong type is an error rather than a
//! silently zeroed field.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod provider;
mod schedule;
mod securities;
mod table;
mod transport;

pub use config::IssConfig;
pub use provider::IssProvider;
pub use schedule::{
    parse_amortizations, parse_coupons, parse_cursor, AMORTIZATION_SCHEMA, COUPON_SCHEMA,
    CURSOR_SCHEMA,
};
pub use securities::{
    parse_bond, parse_dividends, parse_quote, BOND_COLUMNS, BOND_SCHEMA, DIVIDEND_SCHEMA,
    QUOTE_SCHEMA,
};
pub use table::{decode_rows, Column, ColumnKind, Row, TableSchema};
pub use transport::{HttpTransport, IssTransport, Query};

use kupon_traits::error::SourceResult;
use kupon_traits::market_data::MarketDataProvider;

/// Create an ISS-backed market data provider.
pub fn create_iss_market_data(config: IssConfig) -> SourceResult<MarketDataProvider> {
    Ok(IssProvider::connect(config)?.into_market_data())
}
