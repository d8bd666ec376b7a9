//! Net period to event for amortizing bonds.
//!
//! When a bond repays principal before its event date, the plain calendar
//! distance overstates the horizon: the holder gets part of the money back
//! early. The net period weights every interval between consecutive
//! amortizations by the share of principal still outstanding over it.
//!
//! # Formula
//!
//! ```text
//! a_1 .. a_n   future amortizations, ascending by date
//! net  = days(a_1 - settle)
//! out  = face(a_1)
//! for k in 2..=n:
//!     out -= pay(a_{k-1})
//!     net += days(a_k - a_{k-1}) * out / face(a_k)
//! ```

use kupon_core::{Amortization, Date};

use crate::dates::parse_date;
use crate::error::AnalyticsResult;

#[derive(Debug, Clone, Copy)]
struct Accumulator {
    net_period: f64,
    outstanding_face: f64,
    last_payment: f64,
    previous_date: Date,
}

impl Accumulator {
    fn first(settlement: Date, date: Date, amortization: &Amortization) -> Self {
        Self {
            net_period: (date - settlement) as f64,
            outstanding_face: amortization.face_value,
            last_payment: amortization.value,
            previous_date: date,
        }
    }

    fn step(mut self, date: Date, amortization: &Amortization) -> Self {
        self.outstanding_face -= self.last_payment;
        self.net_period +=
            (date - self.previous_date) as f64 * self.outstanding_face / amortization.face_value;
        self.last_payment = amortization.value;
        self.previous_date = date;
        self
    }
}

/// Computes the net number of days from `settlement` to the end of the
/// amortization schedule.
///
/// Only amortizations strictly after `settlement` contribute. Returns `0.0`
/// when none do; callers substitute the calendar horizon in that case.
///
/// # Errors
///
/// `DateParse` if any amortization date is not a valid `YYYY-MM-DD` date.
/// Nothing is computed from a schedule with a bad date, including past entries.
pub fn net_period(amortizations: &[Amortization], settlement: Date) -> AnalyticsResult<f64> {
    let mut dated = amortizations
        .iter()
        .map(|a| Ok((parse_date("amortdate", &a.amort_date)?, a)))
        .collect::<AnalyticsResult<Vec<_>>>()?;

    // Stable: equal dates keep provider order
    dated.sort_by_key(|(date, _)| *date);

    let folded = dated
        .into_iter()
        .filter(|(date, _)| *date > settlement)
        .fold(None, |acc: Option<Accumulator>, (date, amortization)| {
            Some(match acc {
                None => Accumulator::first(settlement, date, amortization),
                Some(acc) => acc.step(date, amortization),
            })
        });

    let net = folded.map_or(0.0, |acc| acc.net_period);
    log::debug!("net period from {settlement}: {net} days");
    Ok(net)
}
