//! Offer and sale totals routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use salesdesk_core::currency::ExchangeRates;
use salesdesk_core::currency::format::{FormattedLineTotals, FormattedTotals};
use salesdesk_core::totals::{AggregationResult, LineItem, LineTotals, Payment, TotalsAggregator};
use salesdesk_shared::AppError;

use super::{error_response, rejection_response};
use crate::AppState;

/// Creates the totals routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/totals", post(sale_totals))
        .route("/offers/totals", post(offer_totals))
}

/// Request body for sale totals. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleTotalsRequest {
    /// Product lines.
    #[serde(default)]
    pub products: Vec<LineItem>,
    /// License lines.
    #[serde(default)]
    pub licenses: Vec<LineItem>,
    /// Rental lines.
    #[serde(default)]
    pub rentals: Vec<LineItem>,
    /// Payments received.
    #[serde(default)]
    pub payments: Vec<Payment>,
    /// 1 USD in TRY.
    #[serde(default)]
    pub usd_rate: Option<Decimal>,
    /// 1 EUR in TRY.
    #[serde(default)]
    pub eur_rate: Option<Decimal>,
}

/// Request body for offer totals. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferTotalsRequest {
    /// Product lines.
    #[serde(default)]
    pub products: Vec<LineItem>,
    /// License lines.
    #[serde(default)]
    pub licenses: Vec<LineItem>,
    /// Rental lines.
    #[serde(default)]
    pub rentals: Vec<LineItem>,
    /// 1 USD in TRY.
    #[serde(default)]
    pub usd_rate: Option<Decimal>,
    /// 1 EUR in TRY.
    #[serde(default)]
    pub eur_rate: Option<Decimal>,
}

/// Response for sale totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleTotalsResponse {
    /// Raw totals.
    pub totals: AggregationResult,
    /// Overall grand total minus payments, in TRY.
    pub balance_due: Decimal,
    /// Display strings.
    pub display: FormattedTotals,
}

/// Response for offer totals.
#[derive(Debug, Serialize)]
pub struct OfferTotalsResponse {
    /// Raw totals.
    pub totals: LineTotals,
    /// Display strings.
    pub display: FormattedLineTotals,
}

fn out_of_range() -> Response {
    warn!("Rejecting totals outside the decimal range");
    error_response(&AppError::Validation(
        "Amounts exceed the supported numeric range".to_string(),
    ))
}

fn aggregator(usd_rate: Option<Decimal>, eur_rate: Option<Decimal>) -> TotalsAggregator {
    TotalsAggregator::new(ExchangeRates::new(
        usd_rate.unwrap_or_default(),
        eur_rate.unwrap_or_default(),
    ))
}

/// POST `/totals` - Compute sale totals with payments.
async fn sale_totals(
    State(state): State<AppState>,
    payload: Result<Json<SaleTotalsRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(&rejection),
    };

    debug!(
        products = request.products.len(),
        licenses = request.licenses.len(),
        rentals = request.rentals.len(),
        payments = request.payments.len(),
        "Aggregating sale totals"
    );

    let totals = aggregator(request.usd_rate, request.eur_rate).aggregate(
        &request.products,
        &request.licenses,
        &request.rentals,
        &request.payments,
    );
    if totals.overflowed() {
        return out_of_range();
    }
    let display = state.formatter.format_totals(&totals);

    let response = SaleTotalsResponse {
        balance_due: totals.balance_due(),
        totals,
        display,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// POST `/offers/totals` - Compute offer totals (no payments).
async fn offer_totals(
    State(state): State<AppState>,
    payload: Result<Json<OfferTotalsRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(&rejection),
    };

    debug!(
        products = request.products.len(),
        licenses = request.licenses.len(),
        rentals = request.rentals.len(),
        "Aggregating offer totals"
    );

    let totals = aggregator(request.usd_rate, request.eur_rate).offer_totals(
        &request.products,
        &request.licenses,
        &request.rentals,
    );
    if totals.overflowed() {
        return out_of_range();
    }
    let display = state.formatter.format_line_totals(&totals);

    (StatusCode::OK, Json(OfferTotalsResponse { totals, display })).into_response()
}
