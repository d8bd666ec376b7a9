//! Payment schedule records.

use serde::{Deserialize, Serialize};

/// One scheduled coupon payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// ISIN code
    pub isin: String,
    /// Coupon payment date
    #[serde(rename = "coupondate")]
    pub coupon_date: String,
    /// Holder record date
    #[serde(rename = "recorddate")]
    pub record_date: Option<String>,
    /// Initial face value
    #[serde(rename = "initialfacevalue")]
    pub initial_face_value: f64,
    /// Face value at record time
    #[serde(rename = "facevalue")]
    pub face_value: f64,
    /// Face-value currency unit
    #[serde(rename = "faceunit")]
    pub face_unit: String,
    /// Coupon amount in face-value currency; `None` until the rate is fixed
    pub value: Option<f64>,
    /// Coupon rate, percent
    #[serde(rename = "valueprc")]
    pub value_prc: Option<f64>,
    /// Coupon amount in the reference currency (RUB)
    pub value_rub: Option<f64>,
}

/// One scheduled partial repayment of principal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Amortization {
    /// ISIN code
    pub isin: String,
    /// Amortization date
    #[serde(rename = "amortdate")]
    pub amort_date: String,
    /// Face value the payment is computed against (before this payment)
    #[serde(rename = "facevalue")]
    pub face_value: f64,
    /// Initial face value
    #[serde(rename = "initialfacevalue")]
    pub initial_face_value: f64,
    /// Face-value currency unit
    #[serde(rename = "faceunit")]
    pub face_unit: String,
    /// Payment amount in face-value currency
    pub value: f64,
    /// Payment amount in the reference currency (RUB)
    pub value_rub: Option<f64>,
}

/// A declared dividend of a share.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dividend {
    /// Exchange ticker
    pub secid: String,
    /// ISIN code
    pub isin: String,
    /// Registry close date
    #[serde(rename = "registryclosedate")]
    pub registry_close_date: String,
    /// Dividend per share
    pub value: f64,
    /// Currency of the dividend
    #[serde(rename = "currencyid")]
    pub currency: String,
}
