//! End-to-end indicator computations over an in-memory provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use approx::assert_relative_eq;
use async_trait::async_trait;

use kupon_core::{Amortization, Bond, Coupon, Date, Dividend, MarketQuote};
use kupon_engine::{ErrorKind, IndicatorEngine, IndicatorEngineBuilder};
use kupon_ext_file::InMemorySource;
use kupon_traits::{
    CouponCursor, DividendSource, EngineConfig, FetchMode, InstrumentId, MarketDataProvider,
    ScheduleSource, SecuritySource, SourceError, SourceResult,
};

const ISIN: &str = "RU000A1002C2";

fn date(s: &str) -> Date {
    Date::parse(s).unwrap()
}

fn bond() -> Bond {
    Bond {
        isin: ISIN.to_string(),
        short_name: "Test 1P1".to_string(),
        accrued_int: 10.0,
        face_value: 1000.0,
        mat_date: "2026-01-10".to_string(),
        coupon_period: 182,
        coupon_percent: 8.0,
        coupon_value: 40.0,
        sec_name: "Test Issuer 1P1".to_string(),
        face_unit: "SUR".to_string(),
        offer_date: None,
        settle_date: Some("2024-01-10".to_string()),
    }
}

fn coupons() -> Vec<Coupon> {
    [
        "2023-07-10",
        "2024-01-10",
        "2024-07-10",
        "2025-01-10",
        "2025-07-10",
        "2026-01-10",
    ]
    .iter()
    .map(|d| Coupon {
        isin: ISIN.to_string(),
        coupon_date: d.to_string(),
        initial_face_value: 1000.0,
        face_value: 1000.0,
        face_unit: "SUR".to_string(),
        value: Some(40.0),
        value_prc: Some(8.0),
        value_rub: Some(40.0),
        ..Default::default()
    })
    .collect()
}

fn amortization(d: &str, value: f64) -> Amortization {
    Amortization {
        isin: ISIN.to_string(),
        amort_date: d.to_string(),
        face_value: 1000.0,
        initial_face_value: 1000.0,
        face_unit: "SUR".to_string(),
        value,
        value_rub: Some(value),
    }
}

fn source(bond: Bond, quote: MarketQuote) -> InMemorySource {
    InMemorySource::new()
        .with_page_size(4)
        .with_bond(bond)
        .with_quote(ISIN, quote)
        .with_coupons(ISIN, coupons())
}

fn engine_with(source: InMemorySource, mode: FetchMode) -> IndicatorEngine {
    engine_over(Arc::new(source), mode)
}

fn engine_over<S>(source: Arc<S>, mode: FetchMode) -> IndicatorEngine
where
    S: SecuritySource + ScheduleSource + DividendSource + 'static,
{
    IndicatorEngineBuilder::new()
        .with_market_data(Arc::new(MarketDataProvider::from_source(source)))
        .with_config(EngineConfig::default().with_fetch_mode(mode))
        .build()
        .unwrap()
}

fn today() -> Date {
    date("2024-01-09")
}

#[tokio::test]
async fn test_non_amortizing_bond() {
    let engine = engine_with(source(bond(), MarketQuote::new(95.0)), FetchMode::Sequential);

    let result = engine.compute_bond_indicators_on(ISIN, today()).await.unwrap();

    assert_relative_eq!(result.price, 960.0);
    assert_eq!(result.days_to_event, 732);
    assert_relative_eq!(result.simple_yield, 0.1039);
    assert_relative_eq!(result.net_simple_yield, 0.0904);
    assert_relative_eq!(result.current_yield, 0.0842);
    assert_relative_eq!(result.net_current_yield, 0.0725);
    assert_relative_eq!(result.maturity_tax, 5.2);
}

#[tokio::test]
async fn test_amortizing_bond_uses_net_period() {
    let source = source(bond(), MarketQuote::new(95.0)).with_amortizations(
        ISIN,
        vec![
            amortization("2026-01-10", 500.0),
            amortization("2025-01-10", 500.0),
            amortization("2023-01-10", 0.0),
        ],
    );
    let engine = engine_with(source, FetchMode::Sequential);

    let result = engine.compute_bond_indicators_on(ISIN, today()).await.unwrap();

    // 366 full days + 365 days at half principal = 548.5
    assert_relative_eq!(result.simple_yield, 0.1386);
    assert_relative_eq!(result.net_simple_yield, 0.1206);
    // Still reported in calendar days
    assert_eq!(result.days_to_event, 732);
}

#[tokio::test]
async fn test_default_settlement_is_tomorrow() {
    let mut bond = bond();
    bond.settle_date = None;
    let engine = engine_with(source(bond, MarketQuote::new(95.0)), FetchMode::Sequential);

    let result = engine.compute_bond_indicators_on(ISIN, today()).await.unwrap();
    assert_relative_eq!(result.simple_yield, 0.1039);
    assert_relative_eq!(result.maturity_tax, 5.2);
}

#[tokio::test]
async fn test_zero_quote_degrades() {
    let engine = engine_with(source(bond(), MarketQuote::new(0.0)), FetchMode::Sequential);

    let result = engine.compute_bond_indicators_on(ISIN, today()).await.unwrap();
    assert_relative_eq!(result.price, 10.0);
    assert_eq!(result.current_yield, 0.0);
    assert_eq!(result.net_current_yield, 0.0);
    assert_relative_eq!(result.simple_yield, 57.3429);
    assert_relative_eq!(result.net_simple_yield, 49.8883);
}

#[tokio::test]
async fn test_missing_quote_is_no_market_data() {
    let engine = engine_with(source(bond(), MarketQuote::absent()), FetchMode::Sequential);

    let err = engine
        .compute_bond_indicators_on(ISIN, today())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoMarketData);
}

#[tokio::test]
async fn test_event_today_is_degenerate() {
    let mut bond = bond();
    bond.mat_date = "2024-01-10".to_string();
    let engine = engine_with(source(bond, MarketQuote::new(95.0)), FetchMode::Sequential);

    let err = engine
        .compute_bond_indicators_on(ISIN, date("2024-01-10"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DegenerateHorizon);
}

#[tokio::test]
async fn test_offer_date_takes_precedence() {
    let mut bond = bond();
    bond.offer_date = Some("2025-01-10".to_string());
    let engine = engine_with(source(bond, MarketQuote::new(95.0)), FetchMode::Sequential);

    let result = engine.compute_bond_indicators_on(ISIN, today()).await.unwrap();
    assert_eq!(result.days_to_event, 367);
    assert_eq!(result.offer_date, "2025-01-10");
    assert_eq!(result.mat_date, "2026-01-10");
}

#[tokio::test]
async fn test_unknown_bond_fails_on_event_date() {
    let source = InMemorySource::new().with_quote(ISIN, MarketQuote::new(95.0));
    let engine = engine_with(source, FetchMode::Sequential);

    let err = engine
        .compute_bond_indicators_on(ISIN, today())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DateParse);
}

#[tokio::test]
async fn test_stuck_cursor_is_malformed() {
    let source = source(bond(), MarketQuote::new(95.0)).with_page_size(0);
    let engine = engine_with(source, FetchMode::Sequential);

    let err = engine
        .compute_bond_indicators_on(ISIN, today())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedSchedule);
}

#[tokio::test]
async fn test_idempotent() {
    let engine = engine_with(source(bond(), MarketQuote::new(97.31)), FetchMode::Sequential);

    let first = engine.compute_bond_indicators_on(ISIN, today()).await.unwrap();
    let second = engine.compute_bond_indicators_on(ISIN, today()).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_matches_sequential() {
    let make = || {
        source(bond(), MarketQuote::new(97.31)).with_amortizations(
            ISIN,
            vec![
                amortization("2025-01-10", 250.0),
                amortization("2025-07-10", 250.0),
                amortization("2026-01-10", 500.0),
            ],
        )
    };
    let sequential = engine_with(make(), FetchMode::Sequential);
    let concurrent = engine_with(make(), FetchMode::Concurrent);

    let a = sequential.compute_bond_indicators_on(ISIN, today()).await.unwrap();
    let b = concurrent.compute_bond_indicators_on(ISIN, today()).await.unwrap();
    assert_eq!(a, b);

    let pages_a = sequential.fetch_coupons(ISIN).await.unwrap();
    let pages_b = concurrent.fetch_coupons(ISIN).await.unwrap();
    assert_eq!(pages_a, coupons());
    assert_eq!(pages_b, coupons());
}

#[tokio::test]
async fn test_passthrough_reads() {
    let source = source(bond(), MarketQuote::new(95.0))
        .with_amortizations(ISIN, vec![amortization("2026-01-10", 1000.0)])
        .with_dividends(
            "SBER",
            vec![Dividend {
                secid: "SBER".into(),
                isin: "RU0009029540".into(),
                registry_close_date: "2024-07-11".into(),
                value: 33.3,
                currency: "RUB".into(),
            }],
        );
    let engine = engine_with(source, FetchMode::Sequential);

    assert_eq!(engine.fetch_amortizations(ISIN).await.unwrap().len(), 1);
    assert_eq!(engine.fetch_dividends("SBER").await.unwrap()[0].value, 33.3);
    assert!(engine.fetch_dividends("GAZP").await.unwrap().is_empty());
}

/// Wraps a source and fails schedule requests after the quote is read.
struct FailingSchedules {
    inner: InMemorySource,
    schedule_calls: AtomicUsize,
}

#[async_trait]
impl SecuritySource for FailingSchedules {
    async fn get_bond(&self, id: &InstrumentId) -> SourceResult<Option<Bond>> {
        self.inner.get_bond(id).await
    }

    async fn get_quote(&self, id: &InstrumentId) -> SourceResult<MarketQuote> {
        self.inner.get_quote(id).await
    }
}

#[async_trait]
impl ScheduleSource for FailingSchedules {
    async fn coupon_cursor(&self, _id: &InstrumentId) -> SourceResult<CouponCursor> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        Err(SourceError::Timeout("coupons.cursor".into()))
    }

    async fn coupon_page(&self, _id: &InstrumentId, _start: i64) -> SourceResult<Vec<Coupon>> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        Err(SourceError::Timeout("coupons".into()))
    }

    async fn amortizations(&self, _id: &InstrumentId) -> SourceResult<Vec<Amortization>> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

#[async_trait]
impl DividendSource for FailingSchedules {
    async fn dividends(&self, id: &InstrumentId) -> SourceResult<Vec<Dividend>> {
        self.inner.dividends(id).await
    }
}

#[tokio::test]
async fn test_fetch_failure_aborts() {
    for mode in [FetchMode::Sequential, FetchMode::Concurrent] {
        let source = Arc::new(FailingSchedules {
            inner: source(bond(), MarketQuote::new(95.0)),
            schedule_calls: AtomicUsize::new(0),
        });
        let engine = engine_over(source, mode);

        let err = engine
            .compute_bond_indicators_on(ISIN, today())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert!(err.to_string().contains("coupons.cursor"));
    }
}

#[tokio::test]
async fn test_missing_quote_skips_schedules() {
    let source = Arc::new(FailingSchedules {
        inner: source(bond(), MarketQuote::absent()),
        schedule_calls: AtomicUsize::new(0),
    });
    let engine = engine_over(source.clone(), FetchMode::Sequential);

    let err = engine
        .compute_bond_indicators_on(ISIN, today())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoMarketData);
    assert_eq!(source.schedule_calls.load(Ordering::SeqCst), 0);
}
