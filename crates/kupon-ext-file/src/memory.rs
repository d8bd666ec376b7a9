//! In-memory source.

use async_trait::async_trait;
use dashmap::DashMap;

use kupon_core::{Amortization, Bond, Coupon, Dividend, MarketQuote};
use kupon_traits::error::SourceResult;
use kupon_traits::ids::InstrumentId;
use kupon_traits::market_data::*;

/// Rows per coupon page when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Source backed by maps, for tests and offline runs.
///
/// Coupon schedules are served in pages of `page_size` rows so callers go
/// through the same cursor walk as against the exchange. Unknown
/// instruments have no bond row, no last price, and empty schedules.
#[derive(Debug)]
pub struct InMemorySource {
    bonds: DashMap<InstrumentId, Bond>,
    quotes: DashMap<InstrumentId, MarketQuote>,
    coupons: DashMap<InstrumentId, Vec<Coupon>>,
    amortizations: DashMap<InstrumentId, Vec<Amortization>>,
    dividends: DashMap<InstrumentId, Vec<Dividend>>,
    page_size: usize,
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self {
            bonds: DashMap::new(),
            quotes: DashMap::new(),
            coupons: DashMap::new(),
            amortizations: DashMap::new(),
            dividends: DashMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the coupon page size. Zero reproduces a cursor that cannot advance.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Add bond static data, keyed by its ISIN.
    pub fn with_bond(self, bond: Bond) -> Self {
        self.insert_bond(bond);
        self
    }

    /// Add a quote.
    pub fn with_quote(self, isin: impl Into<String>, quote: MarketQuote) -> Self {
        self.quotes.insert(InstrumentId::new(isin), quote);
        self
    }

    /// Add a coupon schedule.
    pub fn with_coupons(self, isin: impl Into<String>, coupons: Vec<Coupon>) -> Self {
        self.coupons.insert(InstrumentId::new(isin), coupons);
        self
    }

    /// Add an amortization schedule.
    pub fn with_amortizations(self, isin: impl Into<String>, schedule: Vec<Amortization>) -> Self {
        self.amortizations.insert(InstrumentId::new(isin), schedule);
        self
    }

    /// Add dividends.
    pub fn with_dividends(self, isin: impl Into<String>, dividends: Vec<Dividend>) -> Self {
        self.dividends.insert(InstrumentId::new(isin), dividends);
        self
    }

    /// Replace bond static data.
    pub fn insert_bond(&self, bond: Bond) {
        self.bonds.insert(InstrumentId::new(bond.isin.clone()), bond);
    }

    /// Replace the quote of an instrument.
    pub fn insert_quote(&self, isin: impl Into<String>, quote: MarketQuote) {
        self.quotes.insert(InstrumentId::new(isin), quote);
    }

    /// Replace the payment schedules and dividends of an instrument.
    pub fn insert_schedules(
        &self,
        isin: impl Into<String>,
        coupons: Vec<Coupon>,
        amortizations: Vec<Amortization>,
        dividends: Vec<Dividend>,
    ) {
        let id = InstrumentId::new(isin);
        self.coupons.insert(id.clone(), coupons);
        self.amortizations.insert(id.clone(), amortizations);
        self.dividends.insert(id, dividends);
    }

    /// Drop every record.
    pub fn clear(&self) {
        self.bonds.clear();
        self.quotes.clear();
        self.coupons.clear();
        self.amortizations.clear();
        self.dividends.clear();
    }

    /// Number of instruments with bond static data.
    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    /// True if no bond static data is loaded.
    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }
}

#[async_trait]
impl SecuritySource for InMemorySource {
    async fn get_bond(&self, instrument_id: &InstrumentId) -> SourceResult<Option<Bond>> {
        Ok(self.bonds.get(instrument_id).map(|b| b.clone()))
    }

    async fn get_quote(&self, instrument_id: &InstrumentId) -> SourceResult<MarketQuote> {
        Ok(self
            .quotes
            .get(instrument_id)
            .map(|q| *q)
            .unwrap_or_else(MarketQuote::absent))
    }
}

#[async_trait]
impl ScheduleSource for InMemorySource {
    async fn coupon_cursor(&self, instrument_id: &InstrumentId) -> SourceResult<CouponCursor> {
        let total = self.coupons.get(instrument_id).map_or(0, |c| c.len());
        Ok(CouponCursor::new(0, total as i64, self.page_size as i64))
    }

    async fn coupon_page(
        &self,
        instrument_id: &InstrumentId,
        start: i64,
    ) -> SourceResult<Vec<Coupon>> {
        let Some(coupons) = self.coupons.get(instrument_id) else {
            return Ok(Vec::new());
        };
        let start = usize::try_from(start).unwrap_or(0).min(coupons.len());
        let end = start.saturating_add(self.page_size).min(coupons.len());
        Ok(coupons[start..end].to_vec())
    }

    async fn amortizations(
        &self,
        instrument_id: &InstrumentId,
    ) -> SourceResult<Vec<Amortization>> {
        Ok(self
            .amortizations
            .get(instrument_id)
            .map(|a| a.clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl DividendSource for InMemorySource {
    async fn dividends(&self, instrument_id: &InstrumentId) -> SourceResult<Vec<Dividend>> {
        Ok(self
            .dividends
            .get(instrument_id)
            .map(|d| d.clone())
            .unwrap_or_default())
    }
}
