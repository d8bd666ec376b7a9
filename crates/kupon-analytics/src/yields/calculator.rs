//! Indicator calculator.

use kupon_core::{Bond, BondIndicators, Coupon, Date, MarketQuote};

use crate::dates::parse_date;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::rounding::round_to;

use super::tax::{credit_date, maturity_tax};

/// Everything the calculator needs about one bond at one settlement date.
#[derive(Debug, Clone, Copy)]
pub struct YieldInput<'a> {
    /// Static data
    pub bond: &'a Bond,
    /// Last trade
    pub quote: &'a MarketQuote,
    /// Full coupon schedule; past coupons are ignored
    pub coupons: &'a [Coupon],
    /// Settlement date of a purchase today
    pub settlement: Date,
    /// Offer date or maturity date
    pub event: Date,
    /// Calendar days from today to the event
    pub days_to_event: i64,
    /// Yield denominator in days, see [`horizon_days`]
    pub horizon_days: f64,
}

/// Calendar days from `today` to `event`; negative once the event has passed.
pub fn days_to_event(event: Date, today: Date) -> i64 {
    event - today
}

/// Chooses the yield denominator.
///
/// The net period (measured from settlement) is used when the bond has
/// amortizations still ahead of settlement, which is exactly when it is
/// positive. Otherwise the calendar days from today are used. The two
/// are kept on their historical bases rather than reconciled.
pub fn horizon_days(net_period: f64, days_to_event: i64) -> f64 {
    if net_period > 0.0 {
        net_period
    } else {
        days_to_event as f64
    }
}

/// Full price in currency: `round(face * percent / 100) + accrued`.
pub fn full_price(face_value: f64, percent_price: f64, accrued: f64, amount_precision: u32) -> f64 {
    round_to(face_value * percent_price / 100.0, amount_precision) + accrued
}

/// Sum of coupons paid strictly after `settlement`.
///
/// Coupons whose amount is not fixed yet contribute nothing.
///
/// # Errors
///
/// `DateParse` on the first coupon with an unparseable payment date,
/// whether or not it lies in the future.
pub fn coupons_amount(coupons: &[Coupon], settlement: Date) -> AnalyticsResult<f64> {
    let mut amount = 0.0;
    let mut unknown = 0usize;
    for coupon in coupons {
        let payment_date = parse_date("coupondate", &coupon.coupon_date)?;
        if payment_date <= settlement {
            continue;
        }
        match coupon.value {
            Some(value) => amount += value,
            None => unknown += 1,
        }
    }
    if unknown > 0 {
        log::warn!("{unknown} future coupon(s) without a fixed amount are left out of the sum");
    }
    Ok(amount)
}

/// Calculator for price, yields and tax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldCalculator {
    tax_rate: f64,
    rate_precision: u32,
    amount_precision: u32,
    credit_years: i32,
}

impl Default for YieldCalculator {
    fn default() -> Self {
        Self {
            tax_rate: 0.13,
            rate_precision: 4,
            amount_precision: 2,
            credit_years: 3,
        }
    }
}

impl YieldCalculator {
    /// Creates a calculator with the default tax rule and precision.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the income tax rate.
    pub fn with_tax_rate(mut self, tax_rate: f64) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    /// Sets the decimal digits of published rates.
    pub fn with_rate_precision(mut self, digits: u32) -> Self {
        self.rate_precision = digits;
        self
    }

    /// Sets the decimal digits of currency amounts.
    pub fn with_amount_precision(mut self, digits: u32) -> Self {
        self.amount_precision = digits;
        self
    }

    /// Sets the tax-exempt holding period.
    pub fn with_credit_years(mut self, years: i32) -> Self {
        self.credit_years = years;
        self
    }

    /// Income tax rate.
    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    /// Computes the indicator record.
    ///
    /// # Errors
    ///
    /// - `NoMarketData` if the quote has no last price
    /// - `DateParse` if a coupon date is unparseable
    /// - `DegeneratePrice` if the full price is zero
    /// - `DegenerateHorizon` if the horizon is zero or not finite
    pub fn calculate(&self, input: &YieldInput<'_>) -> AnalyticsResult<BondIndicators> {
        let bond = input.bond;
        let last = input
            .quote
            .last_price
            .ok_or_else(|| AnalyticsError::NoMarketData {
                isin: bond.isin.clone(),
            })?;

        let price = full_price(bond.face_value, last, bond.accrued_int, self.amount_precision);

        let mut indicators = BondIndicators {
            isin: bond.isin.clone(),
            face_value: bond.face_value,
            accrued_int: bond.accrued_int,
            coupon: bond.coupon_value,
            percent_price: last,
            price,
            days_to_event: input.days_to_event,
            mat_date: bond.mat_date.clone(),
            offer_date: bond.offer_date.clone().unwrap_or_default(),
            ..BondIndicators::default()
        };

        // A zero last trade is a legitimate illiquid state: current yields stay zero
        if last != 0.0 {
            indicators.current_yield = round_to(bond.coupon_percent / last, self.rate_precision);
            indicators.net_current_yield = round_to(
                bond.coupon_percent * bond.face_value * (1.0 - self.tax_rate) / price / 100.0,
                self.rate_precision,
            );
        }

        let coupons = coupons_amount(input.coupons, input.settlement)?;

        if price == 0.0 {
            return Err(AnalyticsError::DegeneratePrice(format!(
                "full price of {} is zero",
                bond.isin
            )));
        }
        let horizon = input.horizon_days;
        if horizon == 0.0 || !horizon.is_finite() {
            return Err(AnalyticsError::DegenerateHorizon(format!(
                "{horizon} days from {} to {}",
                input.settlement, input.event
            )));
        }
        let annualize = 365.0 / horizon;

        indicators.simple_yield = round_to(
            (coupons + bond.face_value - price) / price * annualize,
            self.rate_precision,
        );

        let credit = credit_date(input.settlement, self.credit_years)?;
        let tax = maturity_tax(
            bond.face_value,
            price,
            input.event,
            credit,
            self.tax_rate,
            self.amount_precision,
        );
        indicators.net_simple_yield = round_to(
            (coupons * (1.0 - self.tax_rate) + bond.face_value - tax - price) / price * annualize,
            self.rate_precision,
        );
        indicators.maturity_tax = tax;

        Ok(indicators)
    }
}
