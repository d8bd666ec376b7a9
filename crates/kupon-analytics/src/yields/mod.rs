//! Yield and tax calculations.
//!
//! # Indicators
//!
//! - **Price**: last price applied to the face value, rounded to cents, plus
//!   accrued interest.
//!
//! - **Simple Yield**: remaining coupons plus redemption gain over the price,
//!   annualized linearly over the horizon. No compounding.
//!
//! - **Current Yield**: coupon rate over the last price.
//!
//! - **Net (after-tax) yields**: coupons taxed at the income tax rate; the
//!   redemption gain is taxed unless the event falls after the long-holding
//!   threshold (see [`credit_date`]).
//!
//! # Horizon
//!
//! The denominator of the simple yields is the net period from settlement
//! when the bond has future amortizations, and the calendar days from today
//! to the event date otherwise. These two measures are not on the same basis;
//! see [`horizon_days`].

mod calculator;
mod tax;

pub use calculator::{
    coupons_amount, days_to_event, full_price, horizon_days, YieldCalculator, YieldInput,
};
pub use tax::{credit_date, maturity_tax};
