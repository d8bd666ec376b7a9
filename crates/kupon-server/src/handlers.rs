//! Request handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use kupon_core::{Amortization, BondIndicators, Coupon, Dividend};
use kupon_engine::{EngineError, ErrorKind, IndicatorEngine};

/// Application state.
pub struct AppState {
    /// The indicator engine
    pub engine: Arc<IndicatorEngine>,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Liveness banner.
pub async fn root() -> &'static str {
    "kupon: bond indicators from exchange payment schedules"
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Error response.
#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ErrorKind>,
}

/// A failed request.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    kind: Option<ErrorKind>,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            kind: None,
        }
    }
}

/// HTTP status for an engine failure.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Fetch => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::NoMarketData => StatusCode::NOT_FOUND,
        ErrorKind::SchemaMismatch | ErrorKind::MalformedSchedule | ErrorKind::DateParse => {
            StatusCode::BAD_GATEWAY
        }
        ErrorKind::DegenerateHorizon | ErrorKind::DegeneratePrice => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorKind::Config => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let kind = err.kind();
        Self {
            status: status_for(kind),
            message: err.to_string(),
            kind: Some(kind),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
            kind: self.kind,
        };
        (self.status, Json(body)).into_response()
    }
}

/// `?isin=` of every data endpoint.
#[derive(Debug, Deserialize)]
pub struct IsinQuery {
    /// Instrument
    pub isin: Option<String>,
}

impl IsinQuery {
    fn require(self) -> Result<String, ApiError> {
        match self.isin {
            Some(isin) if !isin.trim().is_empty() => Ok(isin.trim().to_string()),
            _ => Err(ApiError::bad_request("missing required query parameter: isin")),
        }
    }
}

fn logged(isin: &str, err: EngineError) -> ApiError {
    warn!(isin, kind = err.kind().as_str(), error = %err, "request failed");
    ApiError::from(err)
}

/// Compute bond indicators.
pub async fn bond_indicators(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IsinQuery>,
) -> Result<Json<BondIndicators>, ApiError> {
    let isin = query.require()?;
    let indicators = state
        .engine
        .compute_bond_indicators(&isin)
        .await
        .map_err(|e| logged(&isin, e))?;
    Ok(Json(indicators))
}

/// Full coupon schedule.
pub async fn coupons(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IsinQuery>,
) -> Result<Json<Vec<Coupon>>, ApiError> {
    let isin = query.require()?;
    let coupons = state
        .engine
        .fetch_coupons(&isin)
        .await
        .map_err(|e| logged(&isin, e))?;
    Ok(Json(coupons))
}

/// Amortization schedule.
pub async fn amortizations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IsinQuery>,
) -> Result<Json<Vec<Amortization>>, ApiError> {
    let isin = query.require()?;
    let schedule = state
        .engine
        .fetch_amortizations(&isin)
        .await
        .map_err(|e| logged(&isin, e))?;
    Ok(Json(schedule))
}

/// Share dividends.
pub async fn dividends(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IsinQuery>,
) -> Result<Json<Vec<Dividend>>, ApiError> {
    let isin = query.require()?;
    let dividends = state
        .engine
        .fetch_dividends(&isin)
        .await
        .map_err(|e| logged(&isin, e))?;
    Ok(Json(dividends))
}
