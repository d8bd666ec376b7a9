//! Indicator orchestration.
//!
//! [`IndicatorEngine`] turns an ISIN into [`BondIndicators`] by walking the
//! stages of [`Stage`] against the injected [`MarketDataProvider`]. Every
//! call fetches afresh; nothing is cached between computations.

use std::sync::Arc;

use futures::future::try_join_all;
use futures::TryFutureExt;
use tracing::{debug, info, instrument, warn};

use kupon_analytics::{
    net_period, parse_date,
    yields::{days_to_event, horizon_days},
    AnalyticsError, YieldCalculator, YieldInput,
};
use kupon_core::{Amortization, Bond, BondIndicators, Coupon, Date, Dividend, MarketQuote};
use kupon_traits::config::{EngineConfig, FetchMode};
use kupon_traits::ids::InstrumentId;
use kupon_traits::market_data::MarketDataProvider;

use crate::error::{EngineError, EngineResult};
use crate::stage::Stage;

/// Everything fetched for one computation.
struct Snapshot {
    bond: Bond,
    quote: MarketQuote,
    coupons: Vec<Coupon>,
    amortizations: Vec<Amortization>,
}

/// Event and settlement dates of one computation.
#[derive(Debug, Clone, Copy)]
struct Dates {
    event: Date,
    settlement: Date,
}

fn step<T, E: Into<EngineError>>(stage: Stage, result: Result<T, E>) -> EngineResult<T> {
    result.map_err(|e| {
        let err = e.into();
        debug!(%stage, error = %err, "stage failed");
        err
    })
}

/// Computes bond indicators from exchange data.
pub struct IndicatorEngine {
    config: EngineConfig,
    market_data: Arc<MarketDataProvider>,
    calculator: YieldCalculator,
}

impl std::fmt::Debug for IndicatorEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorEngine")
            .field("config", &self.config)
            .field("calculator", &self.calculator)
            .finish_non_exhaustive()
    }
}

impl IndicatorEngine {
    /// Creates an engine. Prefer [`crate::IndicatorEngineBuilder`].
    pub fn new(config: EngineConfig, market_data: Arc<MarketDataProvider>) -> Self {
        let calculator = YieldCalculator::new()
            .with_tax_rate(config.tax_rate)
            .with_rate_precision(config.rate_precision)
            .with_amount_precision(config.amount_precision)
            .with_credit_years(config.credit_years);

        Self {
            config,
            market_data,
            calculator,
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes indicators as of today (UTC).
    pub async fn compute_bond_indicators(&self, isin: &str) -> EngineResult<BondIndicators> {
        self.compute_bond_indicators_on(isin, Date::today()).await
    }

    /// Computes indicators as of `today`.
    ///
    /// `today` only enters through the calendar days to the event and the
    /// default settlement date (`today + 1`).
    #[instrument(skip(self, isin), fields(isin = %isin))]
    pub async fn compute_bond_indicators_on(
        &self,
        isin: &str,
        today: Date,
    ) -> EngineResult<BondIndicators> {
        let id = InstrumentId::new(isin);

        let (snapshot, dates) = match self.config.fetch_mode {
            FetchMode::Sequential => self.fetch_sequential(&id, today).await?,
            FetchMode::Concurrent => self.fetch_concurrent(&id, today).await?,
        };

        let net = step(
            Stage::ComputeNetPeriod,
            net_period(&snapshot.amortizations, dates.settlement),
        )?;
        let days = days_to_event(dates.event, today);
        let horizon = horizon_days(net, days);
        debug!(net_period = net, days_to_event = days, horizon, "horizon resolved");

        let input = YieldInput {
            bond: &snapshot.bond,
            quote: &snapshot.quote,
            coupons: &snapshot.coupons,
            settlement: dates.settlement,
            event: dates.event,
            days_to_event: days,
            horizon_days: horizon,
        };
        let indicators = step(Stage::ComputeYields, self.calculator.calculate(&input))?;

        info!(
            price = indicators.price,
            simple_yield = indicators.simple_yield,
            net_simple_yield = indicators.net_simple_yield,
            "bond indicators computed"
        );
        Ok(indicators)
    }

    /// The full coupon schedule, every page concatenated in offset order.
    #[instrument(skip(self, isin), fields(isin = %isin))]
    pub async fn fetch_coupons(&self, isin: &str) -> EngineResult<Vec<Coupon>> {
        self.coupons(&InstrumentId::new(isin)).await
    }

    /// The amortization schedule as served.
    #[instrument(skip(self, isin), fields(isin = %isin))]
    pub async fn fetch_amortizations(&self, isin: &str) -> EngineResult<Vec<Amortization>> {
        Ok(self
            .market_data
            .schedules
            .amortizations(&InstrumentId::new(isin))
            .await?)
    }

    /// Declared dividends of a share.
    ///
    /// Dropping the returned future abandons the request.
    #[instrument(skip(self, isin), fields(isin = %isin))]
    pub async fn fetch_dividends(&self, isin: &str) -> EngineResult<Vec<Dividend>> {
        Ok(self
            .market_data
            .dividends
            .dividends(&InstrumentId::new(isin))
            .await?)
    }

    async fn fetch_sequential(
        &self,
        id: &InstrumentId,
        today: Date,
    ) -> EngineResult<(Snapshot, Dates)> {
        let securities = &self.market_data.securities;

        let bond = step(Stage::FetchBondStatic, securities.get_bond(id).await)?;
        let bond = bond_or_empty(bond, id);
        let quote = step(Stage::FetchMarketQuote, securities.get_quote(id).await)?;
        let dates = resolve_dates(&bond, &quote, today)?;

        let coupons = step(Stage::FetchCoupons, self.coupons(id).await)?;
        let amortizations = step(
            Stage::FetchAmortizations,
            self.market_data.schedules.amortizations(id).await,
        )?;

        let snapshot = Snapshot {
            bond,
            quote,
            coupons,
            amortizations,
        };
        Ok((snapshot, dates))
    }

    async fn fetch_concurrent(
        &self,
        id: &InstrumentId,
        today: Date,
    ) -> EngineResult<(Snapshot, Dates)> {
        let securities = &self.market_data.securities;
        let schedules = &self.market_data.schedules;

        let (bond, quote, coupons, amortizations) = futures::try_join!(
            securities.get_bond(id).err_into::<EngineError>(),
            securities.get_quote(id).err_into::<EngineError>(),
            self.coupons(id),
            schedules.amortizations(id).err_into::<EngineError>(),
        )?;

        let bond = bond_or_empty(bond, id);
        let dates = resolve_dates(&bond, &quote, today)?;

        let snapshot = Snapshot {
            bond,
            quote,
            coupons,
            amortizations,
        };
        Ok((snapshot, dates))
    }

    async fn coupons(&self, id: &InstrumentId) -> EngineResult<Vec<Coupon>> {
        let schedules = &self.market_data.schedules;
        let cursor = schedules.coupon_cursor(id).await?;
        let offsets = cursor.offsets()?;

        let coupons = match self.config.fetch_mode {
            FetchMode::Sequential => {
                let mut coupons = Vec::new();
                for offset in offsets {
                    let page = schedules.coupon_page(id, offset).await?;
                    debug!(offset, rows = page.len(), "coupon page fetched");
                    coupons.extend(page);
                }
                coupons
            }
            FetchMode::Concurrent => {
                let pages =
                    try_join_all(offsets.iter().map(|&offset| schedules.coupon_page(id, offset)))
                        .await?;
                pages.into_iter().flatten().collect()
            }
        };

        debug!(total = cursor.total, rows = coupons.len(), "coupon schedule assembled");
        Ok(coupons)
    }
}

fn bond_or_empty(bond: Option<Bond>, id: &InstrumentId) -> Bond {
    bond.unwrap_or_else(|| {
        warn!(isin = %id, "no security row, continuing with an empty record");
        Bond::empty(id.as_str())
    })
}

/// Checks the quote, then resolves the event and settlement dates.
fn resolve_dates(bond: &Bond, quote: &MarketQuote, today: Date) -> EngineResult<Dates> {
    if quote.last_price.is_none() {
        return step(
            Stage::FetchMarketQuote,
            Err(AnalyticsError::NoMarketData {
                isin: bond.isin.clone(),
            }),
        );
    }

    let event_field = match bond.offer_date.as_deref() {
        Some(offer) if !offer.is_empty() => "offerdate",
        _ => "matdate",
    };
    let event = step(Stage::ResolveEventDate, parse_date(event_field, bond.event_date()))?;

    let settlement = match bond.settle_date() {
        Some(settle) => step(Stage::ResolveSettlementDate, parse_date("settledate", settle))?,
        None => today.add_days(1),
    };

    Ok(Dates { event, settlement })
}
