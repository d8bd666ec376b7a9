//! Builder pattern for the indicator engine.

use std::sync::Arc;

use kupon_traits::config::EngineConfig;
use kupon_traits::market_data::MarketDataProvider;

use crate::error::EngineError;
use crate::IndicatorEngine;

/// Builder for constructing an [`IndicatorEngine`].
#[derive(Default)]
pub struct IndicatorEngineBuilder {
    config: Option<EngineConfig>,
    market_data: Option<Arc<MarketDataProvider>>,
}

impl IndicatorEngineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the market data provider.
    pub fn with_market_data(mut self, provider: Arc<MarketDataProvider>) -> Self {
        self.market_data = Some(provider);
        self
    }

    /// Build the indicator engine.
    pub fn build(self) -> Result<IndicatorEngine, EngineError> {
        let config = self.config.unwrap_or_default();

        let market_data = self
            .market_data
            .ok_or_else(|| EngineError::ConfigError("market_data not configured".into()))?;

        if !(0.0..1.0).contains(&config.tax_rate) {
            return Err(EngineError::ConfigError(format!(
                "tax_rate must be in [0, 1), got {}",
                config.tax_rate
            )));
        }

        Ok(IndicatorEngine::new(config, market_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kupon_ext_file::InMemorySource;

    #[test]
    fn test_missing_market_data() {
        let err = IndicatorEngineBuilder::new().build().unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }

    #[test]
    fn test_bad_tax_rate() {
        let provider = MarketDataProvider::from_source(Arc::new(InMemorySource::new()));
        let err = IndicatorEngineBuilder::new()
            .with_market_data(Arc::new(provider))
            .with_config(EngineConfig::default().with_tax_rate(1.5))
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }

    #[test]
    fn test_build() {
        let provider = MarketDataProvider::from_source(Arc::new(InMemorySource::new()));
        let engine = IndicatorEngineBuilder::new()
            .with_market_data(Arc::new(provider))
            .build()
            .unwrap();
        assert_eq!(engine.config().tax_rate, 0.13);
    }
}
