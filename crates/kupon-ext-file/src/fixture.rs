//! JSON fixture files.
//!
//! A fixture file maps ISINs to everything the exchange would serve for them:
//!
//! ```json
//! {
//!   "RU000A101QE0": {
//!     "bond": { "isin": "RU000A101QE0", "shortname": "...", ... },
//!     "quote": { "last": 97.31 },
//!     "coupons": [ ... ],
//!     "amortizations": [ ... ],
//!     "dividends": [ ... ]
//!   }
//! }
//! ```
//!
//! Every section is optional.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use kupon_core::{Amortization, Bond, Coupon, Dividend, MarketQuote};
use kupon_traits::error::{SourceError, SourceResult};
use kupon_traits::ids::InstrumentId;
use kupon_traits::market_data::*;

use crate::memory::InMemorySource;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FixtureEntry {
    bond: Option<Bond>,
    quote: Option<MarketQuote>,
    coupons: Vec<Coupon>,
    amortizations: Vec<Amortization>,
    dividends: Vec<Dividend>,
}

/// Source loaded from a JSON fixture file.
#[derive(Debug)]
pub struct JsonFixtureSource {
    file_path: PathBuf,
    source: InMemorySource,
}

impl JsonFixtureSource {
    /// Load a fixture file.
    pub fn load(file_path: impl AsRef<Path>) -> SourceResult<Self> {
        Self::load_with_page_size(file_path, crate::memory::DEFAULT_PAGE_SIZE)
    }

    /// Load a fixture file, serving coupons in pages of `page_size` rows.
    pub fn load_with_page_size(file_path: impl AsRef<Path>, page_size: usize) -> SourceResult<Self> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            source: InMemorySource::new().with_page_size(page_size),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload the file, replacing everything loaded before.
    pub fn reload(&self) -> SourceResult<()> {
        let content = std::fs::read_to_string(&self.file_path).map_err(|e| {
            SourceError::Fetch(format!("cannot read {}: {e}", self.file_path.display()))
        })?;

        let entries: BTreeMap<String, FixtureEntry> = serde_json::from_str(&content)
            .map_err(|e| SourceError::Decode(format!("{}: {e}", self.file_path.display())))?;

        self.source.clear();
        for (isin, entry) in entries {
            self.populate(isin, entry);
        }
        Ok(())
    }

    fn populate(&self, isin: String, entry: FixtureEntry) {
        let source = &self.source;
        if let Some(mut bond) = entry.bond {
            if bond.isin.is_empty() {
                bond.isin = isin.clone();
            }
            source.insert_bond(bond);
        }
        if let Some(quote) = entry.quote {
            source.insert_quote(isin.clone(), quote);
        }
        source.insert_schedules(isin, entry.coupons, entry.amortizations, entry.dividends);
    }

    /// The loaded records.
    pub fn source(&self) -> &InMemorySource {
        &self.source
    }
}

#[async_trait]
impl SecuritySource for JsonFixtureSource {
    async fn get_bond(&self, instrument_id: &InstrumentId) -> SourceResult<Option<Bond>> {
        self.source.get_bond(instrument_id).await
    }

    async fn get_quote(&self, instrument_id: &InstrumentId) -> SourceResult<MarketQuote> {
        self.source.get_quote(instrument_id).await
    }
}

#[async_trait]
impl ScheduleSource for JsonFixtureSource {
    async fn coupon_cursor(&self, instrument_id: &InstrumentId) -> SourceResult<CouponCursor> {
        self.source.coupon_cursor(instrument_id).await
    }

    async fn coupon_page(
        &self,
        instrument_id: &InstrumentId,
        start: i64,
    ) -> SourceResult<Vec<Coupon>> {
        self.source.coupon_page(instrument_id, start).await
    }

    async fn amortizations(
        &self,
        instrument_id: &InstrumentId,
    ) -> SourceResult<Vec<Amortization>> {
        self.source.amortizations(instrument_id).await
    }
}

#[async_trait]
impl DividendSource for JsonFixtureSource {
    async fn dividends(&self, instrument_id: &InstrumentId) -> SourceResult<Vec<Dividend>> {
        self.source.dividends(instrument_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FIXTURE: &str = r#"{
        "RU000A101QE0": {
            "bond": {
                "isin": "RU000A101QE0", "shortname": "Test 1P1", "accruedint": 3.1,
                "facevalue": 1000, "matdate": "2030-07-28", "couponperiod": 182,
                "couponpercent": 8.4, "couponvalue": 41.88, "secname": "Test 1P1",
                "faceunit": "SUR"
            },
            "quote": { "last": 97.31 },
            "coupons": [
                { "isin": "RU000A101QE0", "coupondate": "2021-01-28", "recorddate": null,
                  "initialfacevalue": 1000, "facevalue": 1000, "faceunit": "SUR",
                  "value": 41.88, "valueprc": 8.4, "value_rub": 41.88 }
            ]
        },
        "SBER": {
            "dividends": [
                { "secid": "SBER", "isin": "RU0009029540", "registryclosedate": "2024-07-11",
                  "value": 33.3, "currencyid": "RUB" }
            ]
        }
    }"#;

    fn fixture_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_fixture() {
        let file = fixture_file();
        let source = JsonFixtureSource::load(file.path()).unwrap();
        let id = InstrumentId::new("RU000A101QE0");

        let bond = source.get_bond(&id).await.unwrap().unwrap();
        assert_eq!(bond.short_name, "Test 1P1");
        assert_eq!(bond.offer_date, None);
        assert_eq!(source.get_quote(&id).await.unwrap(), MarketQuote::new(97.31));
        assert_eq!(source.coupon_page(&id, 0).await.unwrap().len(), 1);
        assert!(source.amortizations(&id).await.unwrap().is_empty());

        let dividends = source.dividends(&InstrumentId::new("SBER")).await.unwrap();
        assert_eq!(dividends[0].value, 33.3);
    }

    #[test]
    fn test_missing_file() {
        let err = JsonFixtureSource::load("/nonexistent/fixtures.json").unwrap_err();
        assert!(matches!(err, SourceError::Fetch(_)));
    }

    #[test]
    fn test_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = JsonFixtureSource::load(file.path()).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
