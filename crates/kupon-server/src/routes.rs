//! Route definitions.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use kupon_engine::IndicatorEngine;

use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `engine` - The indicator engine
pub fn create_router(engine: Arc<IndicatorEngine>) -> Router {
    let state = Arc::new(AppState { engine });

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/bondindicators", get(handlers::bond_indicators))
        .route("/coupons", get(handlers::coupons))
        .route("/amortizations", get(handlers::amortizations))
        .route("/dividends", get(handlers::dividends))
        .with_state(state)
}
