//! Engine configuration.
//!
//! Configuration contains:
//! - The tax rule (rate and long-holding threshold)
//! - Rounding precision of published indicators
//! - How independent provider requests are scheduled
//!
//! Configuration does NOT contain:
//! - Market data values
//! - Bond terms (that's security static data)

use serde::{Deserialize, Serialize};

/// How the engine schedules provider requests that do not depend on each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// One request at a time, in pipeline order.
    #[default]
    Sequential,
    /// Independent requests (and coupon pages once the cursor is known) in
    /// flight together; the first failure aborts the computation.
    Concurrent,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Income tax rate applied to coupons and redemption gain
    pub tax_rate: f64,
    /// Decimal digits kept in published rates
    pub rate_precision: u32,
    /// Decimal digits kept in currency amounts
    pub amount_precision: u32,
    /// Holding period in years after which redemption gain is tax-exempt
    pub credit_years: i32,
    /// Request scheduling
    pub fetch_mode: FetchMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tax_rate: 0.13,
            rate_precision: 4,
            amount_precision: 2,
            credit_years: 3,
            fetch_mode: FetchMode::Sequential,
        }
    }
}

impl EngineConfig {
    /// Sets the fetch mode.
    pub fn with_fetch_mode(mut self, mode: FetchMode) -> Self {
        self.fetch_mode = mode;
        self
    }

    /// Sets the tax rate.
    pub fn with_tax_rate(mut self, tax_rate: f64) -> Self {
        self.tax_rate = tax_rate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.tax_rate, 0.13);
        assert_eq!(config.rate_precision, 4);
        assert_eq!(config.amount_precision, 2);
        assert_eq!(config.fetch_mode, FetchMode::Sequential);
    }

    #[test]
    fn test_partial_toml() {
        let config: EngineConfig = toml::from_str("fetch_mode = \"concurrent\"").unwrap();
        assert_eq!(config.fetch_mode, FetchMode::Concurrent);
        assert_eq!(config.tax_rate, 0.13);
    }
}
