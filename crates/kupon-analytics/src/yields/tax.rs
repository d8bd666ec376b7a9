//! Tax on redemption gain.

use kupon_core::Date;

use crate::error::AnalyticsResult;
use crate::rounding::round_to;

/// Long-holding threshold: redemption after this date is exempt.
pub fn credit_date(settlement: Date, credit_years: i32) -> AnalyticsResult<Date> {
    Ok(settlement.add_years(credit_years)?)
}

/// Estimated tax on the gain between price and face value at the event.
///
/// Charged only when the event is on or before `credit` (inclusive) and the
/// bond is bought below face value; zero otherwise.
pub fn maturity_tax(
    face_value: f64,
    price: f64,
    event: Date,
    credit: Date,
    tax_rate: f64,
    amount_precision: u32,
) -> f64 {
    if event <= credit && price < face_value {
        round_to((face_value - price) * tax_rate, amount_precision)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn test_credit_date() {
        assert_eq!(credit_date(date("2024-01-10"), 3).unwrap(), date("2027-01-10"));
        assert_eq!(credit_date(date("2024-02-29"), 3).unwrap(), date("2027-03-01"));
    }

    #[test]
    fn test_leap_day_settlement_taxes_event_on_march_first() {
        let credit = credit_date(date("2024-02-29"), 3).unwrap();
        assert_eq!(maturity_tax(1000.0, 950.0, date("2027-03-01"), credit, 0.13, 2), 6.5);
        assert_eq!(maturity_tax(1000.0, 950.0, date("2027-03-02"), credit, 0.13, 2), 0.0);
    }

    #[test]
    fn test_tax_on_threshold_is_charged() {
        let credit = date("2027-01-10");
        assert_eq!(maturity_tax(1000.0, 960.0, credit, credit, 0.13, 2), 5.2);
    }

    #[test]
    fn test_tax_after_threshold_is_exempt() {
        let credit = date("2027-01-10");
        assert_eq!(maturity_tax(1000.0, 960.0, date("2027-01-11"), credit, 0.13, 2), 0.0);
    }

    #[test]
    fn test_no_tax_above_par() {
        let credit = date("2027-01-10");
        assert_eq!(maturity_tax(1000.0, 1000.0, date("2026-01-10"), credit, 0.13, 2), 0.0);
        assert_eq!(maturity_tax(1000.0, 1012.5, date("2026-01-10"), credit, 0.13, 2), 0.0);
    }
}
