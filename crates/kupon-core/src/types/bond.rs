//! Instrument static data and market quotes.

use serde::{Deserialize, Serialize};

/// Static data of a traded bond as published by the exchange.
///
/// Snapshot fetched once per indicator computation. Dates are kept in the
/// exchange's `YYYY-MM-DD` string form; empty strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    /// ISIN code
    pub isin: String,
    /// Short name
    #[serde(rename = "shortname")]
    pub short_name: String,
    /// Accrued interest as of the settlement date, in face-value currency
    #[serde(rename = "accruedint")]
    pub accrued_int: f64,
    /// Current (remaining) face value
    #[serde(rename = "facevalue")]
    pub face_value: f64,
    /// Maturity date
    #[serde(rename = "matdate")]
    pub mat_date: String,
    /// Coupon period length in days
    #[serde(rename = "couponperiod")]
    pub coupon_period: i32,
    /// Coupon rate, percent per annum
    #[serde(rename = "couponpercent")]
    pub coupon_percent: f64,
    /// Coupon amount in face-value currency
    #[serde(rename = "couponvalue")]
    pub coupon_value: f64,
    /// Full security name
    #[serde(rename = "secname")]
    pub sec_name: String,
    /// Face-value currency unit
    #[serde(rename = "faceunit")]
    pub face_unit: String,
    /// Offer (put/call) date, only for structures with an offer
    #[serde(rename = "offerdate", default, skip_serializing_if = "Option::is_none")]
    pub offer_date: Option<String>,
    /// Settlement date of a trade concluded today
    #[serde(rename = "settledate", default, skip_serializing_if = "Option::is_none")]
    pub settle_date: Option<String>,
}

impl Bond {
    /// Creates an empty record for an instrument the exchange returned no row for.
    pub fn empty(isin: impl Into<String>) -> Self {
        Self {
            isin: isin.into(),
            ..Self::default()
        }
    }

    /// The yield horizon date: the offer date when present and non-empty,
    /// otherwise the maturity date.
    pub fn event_date(&self) -> &str {
        match self.offer_date.as_deref() {
            Some(offer) if !offer.is_empty() => offer,
            _ => &self.mat_date,
        }
    }

    /// The explicit settlement date, if the exchange provided a non-empty one.
    pub fn settle_date(&self) -> Option<&str> {
        self.settle_date.as_deref().filter(|s| !s.is_empty())
    }
}

/// Last trade of an instrument.
///
/// `last_price` is a percentage of face value. `None` means the exchange
/// published no last price at all, which is different from a zero price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Last traded price, percent of face value
    #[serde(rename = "last")]
    pub last_price: Option<f64>,
}

impl MarketQuote {
    /// Creates a quote with a last price.
    pub fn new(last_price: f64) -> Self {
        Self {
            last_price: Some(last_price),
        }
    }

    /// A quote without a last price.
    pub fn absent() -> Self {
        Self { last_price: None }
    }
}
