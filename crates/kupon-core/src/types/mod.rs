//! Domain types for Kupon.
//!
//! - [`Date`]: day-granular calendar date
//! - [`Bond`], [`MarketQuote`]: instrument static data and last trade
//! - [`Coupon`], [`Amortization`], [`Dividend`]: payment schedule records
//! - [`BondIndicators`]: the computed indicator record

mod bond;
mod date;
mod indicators;
mod schedule;

pub use bond::{Bond, MarketQuote};
pub use date::{Date, DATE_FORMAT};
pub use indicators::BondIndicators;
pub use schedule::{Amortization, Coupon, Dividend};
