//! # Kupon Analytics
//!
//! Indicator calculations for amortizing, coupon-bearing bonds.
//!
//! - **Net period**: weighted remaining life from settlement, where each
//!   interval between amortizations counts by the share of principal still
//!   outstanding
//! - **Yields**: full price, simple yield, current yield, their after-tax
//!   variants, and the estimated tax on redemption gain
//!
//! Everything here is synchronous and pure: schedules in, numbers out.
//!
//! ## Usage
//!
//! ```rust
//! use kupon_analytics::net_period;
//! use kupon_core::{Amortization, Date};
//!
//! let schedule = vec![Amortization {
//!     amort_date: "2020-01-30".into(),
//!     face_value: 1000.0,
//!     value: 100.0,
//!     ..Default::default()
//! }];
//! let settle = Date::from_ymd(2020, 1, 1).unwrap();
//! assert_eq!(net_period(&schedule, settle).unwrap(), 29.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod net_period;
pub mod rounding;
pub mod yields;

mod dates;

pub use dates::parse_date;
pub use error::{AnalyticsError, AnalyticsResult};
pub use net_period::net_period;
pub use rounding::round_to;
pub use yields::{YieldCalculator, YieldInput};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::net_period::net_period;
    pub use crate::yields::{
        coupons_amount, days_to_event, horizon_days, YieldCalculator, YieldInput,
    };
}
