//! Pipeline stages of one indicator computation.

use std::fmt;

/// Steps of `compute_bond_indicators`, in execution order.
///
/// The pipeline is linear: the first failing stage ends the computation
/// and its error is returned as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Bond static data
    FetchBondStatic,
    /// Last trade
    FetchMarketQuote,
    /// Offer date, else maturity date
    ResolveEventDate,
    /// Explicit settlement date, else today + 1
    ResolveSettlementDate,
    /// Cursor and every coupon page
    FetchCoupons,
    /// Amortization schedule
    FetchAmortizations,
    /// Weighted horizon
    ComputeNetPeriod,
    /// Price, yields and tax, as the result record
    ComputeYields,
}

impl Stage {
    /// Stable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::FetchBondStatic => "fetch_bond_static",
            Stage::FetchMarketQuote => "fetch_market_quote",
            Stage::ResolveEventDate => "resolve_event_date",
            Stage::ResolveSettlementDate => "resolve_settlement_date",
            Stage::FetchCoupons => "fetch_coupons",
            Stage::FetchAmortizations => "fetch_amortizations",
            Stage::ComputeNetPeriod => "compute_net_period",
            Stage::ComputeYields => "compute_yields",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        assert!(Stage::FetchMarketQuote < Stage::ResolveEventDate);
        assert!(Stage::FetchAmortizations < Stage::ComputeNetPeriod);
        assert_eq!(Stage::FetchCoupons.to_string(), "fetch_coupons");
    }
}
