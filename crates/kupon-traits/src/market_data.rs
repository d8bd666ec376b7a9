//! Market data source traits.
//!
//! These traits define interfaces for the exchange data the engine consumes:
//! - [`SecuritySource`]: Bond static data and last trade quote
//! - [`ScheduleSource`]: Coupon schedule (paginated) and amortization schedule
//! - [`DividendSource`]: Declared dividends of shares
//!
//! All sources are snapshot (request/response); nothing is cached between calls.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use kupon_core::{Amortization, Bond, Coupon, Dividend, MarketQuote};

use crate::error::{SourceError, SourceResult};
use crate::ids::InstrumentId;

// =============================================================================
// SECURITY SOURCE
// =============================================================================

/// Trait for bond static data and quote providers.
#[async_trait]
pub trait SecuritySource: Send + Sync {
    /// Latest static data of a bond, `None` when the provider has no row for it.
    async fn get_bond(&self, instrument_id: &InstrumentId) -> SourceResult<Option<Bond>>;

    /// Last trade quote. A missing last price is `last_price: None`, not an error.
    async fn get_quote(&self, instrument_id: &InstrumentId) -> SourceResult<MarketQuote>;
}

// =============================================================================
// SCHEDULE SOURCE
// =============================================================================

/// Position of the coupon schedule pagination: `(start, total, page_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponCursor {
    /// Index of the first row the provider serves
    pub start: i64,
    /// Total number of rows
    pub total: i64,
    /// Rows per page
    pub page_size: i64,
}

impl CouponCursor {
    /// Creates a cursor.
    pub fn new(start: i64, total: i64, page_size: i64) -> Self {
        Self {
            start,
            total,
            page_size,
        }
    }

    /// Start offsets of every page, in ascending order.
    ///
    /// # Errors
    ///
    /// `MalformedSchedule` when rows remain but the page size cannot advance.
    pub fn offsets(&self) -> SourceResult<Vec<i64>> {
        if self.start >= self.total {
            return Ok(Vec::new());
        }
        if self.page_size <= 0 {
            return Err(SourceError::malformed(format!(
                "page size {} cannot cover rows {}..{}",
                self.page_size, self.start, self.total
            )));
        }

        let mut offsets = Vec::new();
        let mut offset = self.start;
        while offset < self.total {
            offsets.push(offset);
            offset += self.page_size;
        }
        Ok(offsets)
    }
}

/// Trait for payment schedule providers.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Pagination cursor of the coupon schedule.
    async fn coupon_cursor(&self, instrument_id: &InstrumentId) -> SourceResult<CouponCursor>;

    /// One page of the coupon schedule starting at `start`, in provider order.
    async fn coupon_page(
        &self,
        instrument_id: &InstrumentId,
        start: i64,
    ) -> SourceResult<Vec<Coupon>>;

    /// The full amortization schedule (served as a single page).
    async fn amortizations(&self, instrument_id: &InstrumentId)
        -> SourceResult<Vec<Amortization>>;
}

// =============================================================================
// DIVIDEND SOURCE
// =============================================================================

/// Trait for dividend providers.
#[async_trait]
pub trait DividendSource: Send + Sync {
    /// Declared dividends of a share.
    async fn dividends(&self, instrument_id: &InstrumentId) -> SourceResult<Vec<Dividend>>;
}

// =============================================================================
// COMPOSITE MARKET DATA PROVIDER
// =============================================================================

/// Combined market data provider (concrete struct holding all sources).
#[derive(Clone)]
pub struct MarketDataProvider {
    /// Bond static data and quotes
    pub securities: Arc<dyn SecuritySource>,
    /// Coupon and amortization schedules
    pub schedules: Arc<dyn ScheduleSource>,
    /// Dividends
    pub dividends: Arc<dyn DividendSource>,
}

impl MarketDataProvider {
    /// Uses one source for every kind of data.
    pub fn from_source<S>(source: Arc<S>) -> Self
    where
        S: SecuritySource + ScheduleSource + DividendSource + 'static,
    {
        Self {
            securities: source.clone(),
            schedules: source.clone(),
            dividends: source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_walk_pages() {
        let cursor = CouponCursor::new(0, 45, 20);
        assert_eq!(cursor.offsets().unwrap(), vec![0, 20, 40]);
    }

    #[test]
    fn test_offsets_exact_multiple() {
        let cursor = CouponCursor::new(0, 40, 20);
        assert_eq!(cursor.offsets().unwrap(), vec![0, 20]);
    }

    #[test]
    fn test_offsets_empty_schedule() {
        assert!(CouponCursor::new(0, 0, 20).offsets().unwrap().is_empty());
        assert!(CouponCursor::new(5, 5, 0).offsets().unwrap().is_empty());
    }

    #[test]
    fn test_offsets_zero_page_size() {
        let err = CouponCursor::new(0, 10, 0).offsets().unwrap_err();
        assert!(matches!(err, SourceError::MalformedSchedule(_)));
    }
}
