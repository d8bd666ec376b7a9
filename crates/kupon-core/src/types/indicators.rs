//! Computed bond indicators.

use serde::{Deserialize, Serialize};

/// Investor-facing indicators of a traded bond.
///
/// Derived on every request; never persisted. Rates are fractions per
/// annum rounded to the configured precision, amounts are in face-value
/// currency rounded to cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BondIndicators {
    /// Instrument
    pub isin: String,
    /// Current face value
    #[serde(rename = "facevalue")]
    pub face_value: f64,
    /// Accrued interest
    #[serde(rename = "accruedint")]
    pub accrued_int: f64,
    /// Coupon amount
    pub coupon: f64,
    /// Last price, percent of face value
    pub percent_price: f64,
    /// Full price: clean price in currency plus accrued interest
    pub price: f64,
    /// Calendar days from today to the event date
    pub days_to_event: i64,
    /// Maturity date
    #[serde(rename = "matdate")]
    pub mat_date: String,
    /// Offer date
    #[serde(rename = "offerdate")]
    pub offer_date: String,
    /// Simple yield
    pub simple_yield: f64,
    /// Simple yield after tax
    pub net_simple_yield: f64,
    /// Current yield; zero when the last price is zero
    pub current_yield: f64,
    /// Current yield after tax; zero when the last price is zero
    pub net_current_yield: f64,
    /// Estimated tax on redemption gain
    pub maturity_tax: f64,
}
