//! ISS implementation of the source traits.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use kupon_core::{Amortization, Bond, Coupon, Dividend, MarketQuote};
use kupon_traits::error::SourceResult;
use kupon_traits::ids::InstrumentId;
use kupon_traits::market_data::{
    CouponCursor, DividendSource, MarketDataProvider, ScheduleSource, SecuritySource,
};

use crate::config::IssConfig;
use crate::schedule::{
    bondization_path, parse_amortizations, parse_coupons, parse_cursor, AMORTIZATION_TABLE,
    COUPON_TABLE, CURSOR_TABLE,
};
use crate::securities::{parse_bond, parse_dividends, parse_quote, BOND_COLUMNS};
use crate::transport::{HttpTransport, IssTransport};

/// Exchange data over ISS.
///
/// Stateless: every call is a fresh request, nothing is cached.
#[derive(Debug, Clone)]
pub struct IssProvider<T = HttpTransport> {
    transport: T,
    config: IssConfig,
}

impl IssProvider<HttpTransport> {
    /// Creates a provider talking HTTP to the configured API root.
    pub fn connect(config: IssConfig) -> SourceResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: IssTransport> IssProvider<T> {
    /// Creates a provider over an explicit transport.
    pub fn new(transport: T, config: IssConfig) -> Self {
        Self { transport, config }
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: IssTransport + 'static> IssProvider<T> {
    /// Wraps the provider as the composite used by the engine.
    pub fn into_market_data(self) -> MarketDataProvider {
        MarketDataProvider::from_source(Arc::new(self))
    }
}

fn meta_off(only: &str) -> Vec<(&'static str, String)> {
    vec![
        ("iss.meta", "off".to_string()),
        ("iss.only", only.to_string()),
    ]
}

#[async_trait]
impl<T: IssTransport> SecuritySource for IssProvider<T> {
    async fn get_bond(&self, instrument_id: &InstrumentId) -> SourceResult<Option<Bond>> {
        let mut query = meta_off("securities");
        query.push(("securities.columns", BOND_COLUMNS.to_string()));

        let path = self.config.security_path(instrument_id.as_str());
        let document = self.transport.get_json(&path, &query).await?;
        parse_bond(&document, instrument_id.as_str())
    }

    async fn get_quote(&self, instrument_id: &InstrumentId) -> SourceResult<MarketQuote> {
        let mut query = meta_off("marketdata");
        query.push(("marketdata.columns", "LAST".to_string()));

        let path = self.config.security_path(instrument_id.as_str());
        let document = self.transport.get_json(&path, &query).await?;
        parse_quote(&document)
    }
}

#[async_trait]
impl<T: IssTransport> ScheduleSource for IssProvider<T> {
    async fn coupon_cursor(&self, instrument_id: &InstrumentId) -> SourceResult<CouponCursor> {
        let path = bondization_path(instrument_id.as_str());
        let document = self.transport.get_json(&path, &meta_off(CURSOR_TABLE)).await?;
        let cursor = parse_cursor(&document)?;
        debug!(isin = %instrument_id, ?cursor, "coupon cursor");
        Ok(cursor)
    }

    async fn coupon_page(
        &self,
        instrument_id: &InstrumentId,
        start: i64,
    ) -> SourceResult<Vec<Coupon>> {
        let mut query = meta_off(COUPON_TABLE);
        query.push(("start", start.to_string()));

        let path = bondization_path(instrument_id.as_str());
        let document = self.transport.get_json(&path, &query).await?;
        let page = parse_coupons(&document)?;
        debug!(isin = %instrument_id, start, rows = page.len(), "coupon page");
        Ok(page)
    }

    async fn amortizations(
        &self,
        instrument_id: &InstrumentId,
    ) -> SourceResult<Vec<Amortization>> {
        let path = bondization_path(instrument_id.as_str());
        let document = self
            .transport
            .get_json(&path, &meta_off(AMORTIZATION_TABLE))
            .await?;
        parse_amortizations(&document)
    }
}

#[async_trait]
impl<T: IssTransport> DividendSource for IssProvider<T> {
    async fn dividends(&self, instrument_id: &InstrumentId) -> SourceResult<Vec<Dividend>> {
        let path = format!("securities/{}/dividends.json", instrument_id.as_str());
        let document = self.transport.get_json(&path, &meta_off("dividends")).await?;
        parse_dividends(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use kupon_traits::SourceError;
    use serde_json::{json, Value};

    use crate::transport::Query;

    /// Serves documents keyed by `iss.only` (plus `start` for coupon pages).
    #[derive(Default)]
    struct CannedTransport {
        documents: Vec<(String, Value)>,
        requests: Mutex<Vec<String>>,
    }

    impl CannedTransport {
        fn with(mut self, key: &str, document: Value) -> Self {
            self.documents.push((key.to_string(), document));
            self
        }
    }

    fn request_key(path: &str, query: &Query) -> String {
        let mut key = path.to_string();
        for (name, value) in query {
            if *name == "iss.only" || *name == "start" {
                key.push_str(&format!("|{value}"));
            }
        }
        key
    }

    #[async_trait]
    impl IssTransport for CannedTransport {
        async fn get_json(&self, path: &str, query: &Query) -> SourceResult<Value> {
            let key = request_key(path, query);
            self.requests.lock().unwrap().push(key.clone());
            self.documents
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, doc)| doc.clone())
                .ok_or_else(|| SourceError::Status { status: 404, url: key })
        }
    }

    const ISIN: &str = "RU000A101QE0";

    fn bondization(only: &str) -> String {
        format!("statistics/engines/stock/markets/bonds/bondization/{ISIN}.json|{only}")
    }

    #[tokio::test]
    async fn test_coupon_requests() {
        let transport = CannedTransport::default()
            .with(
                &bondization("coupons.cursor"),
                json!({"coupons.cursor": {"data": [[0, 2, 20]]}}),
            )
            .with(
                &format!("{}|0", bondization("coupons")),
                json!({"coupons": {"data": [
                    [ISIN, "B", 1, "2021-01-28", null, null, 1000, 1000, "SUR", 41.88, 8.4, 41.88],
                    [ISIN, "B", 1, "2021-07-29", null, null, 1000, 1000, "SUR", 41.88, 8.4, 41.88]
                ]}}),
            );
        let provider = IssProvider::new(transport, IssConfig::default());
        let id = InstrumentId::new(ISIN);

        let cursor = provider.coupon_cursor(&id).await.unwrap();
        assert_eq!(cursor, CouponCursor::new(0, 2, 20));

        let page = provider.coupon_page(&id, 0).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[1].coupon_date, "2021-07-29");

        let requests = provider.transport().requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 2);
    }

    #[tokio::test]
    async fn test_bond_and_quote_requests() {
        let path = format!("engines/stock/markets/bonds/securities/{ISIN}.json");
        let transport = CannedTransport::default()
            .with(
                &format!("{path}|securities"),
                json!({"securities": {"data": [
                    [ISIN, "Bond", 3.1, 1000, "2030-07-28", 182, 8.4, "Bond", "SUR", "", "2024-03-12", 41.88]
                ]}}),
            )
            .with(&format!("{path}|marketdata"), json!({"marketdata": {"data": [[null]]}}));
        let provider = IssProvider::new(transport, IssConfig::default());
        let id = InstrumentId::new(ISIN);

        let bond = provider.get_bond(&id).await.unwrap().unwrap();
        assert_eq!(bond.event_date(), "2030-07-28");
        assert_eq!(provider.get_quote(&id).await.unwrap().last_price, None);
    }

    #[tokio::test]
    async fn test_status_error_propagates() {
        let provider = IssProvider::new(CannedTransport::default(), IssConfig::default());
        let err = provider
            .amortizations(&InstrumentId::new(ISIN))
            .await
            .unwrap_err();
        assert!(err.is_fetch());
    }
}
