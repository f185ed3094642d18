//! HTTP request handlers for the quote costing API.
//!
//! Every handler parses its body, runs one costing function and maps the
//! outcome to JSON. No costing rules live here.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    compute_aggregate_labor, compute_quote_totals, compute_shift_cost,
    compute_subcontractor_monthly_cost, price_quote,
};
use crate::error::EngineError;
use crate::models::Shift;

use super::request::{
    AggregateLaborRequest, PriceQuoteRequest, QuoteTotalsRequest, ShiftCostQuery,
    SubcontractorCostRequest,
};
use super::response::{ApiError, ApiErrorResponse, SubcontractorCostResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shifts/cost", post(shift_cost_handler))
        .route("/labor/aggregate", post(aggregate_labor_handler))
        .route("/subcontractors/monthly-cost", post(subcontractor_cost_handler))
        .route("/quotes/totals", post(quote_totals_handler))
        .route("/quotes/price", post(price_quote_handler))
        .with_state(state)
}

/// Handler for `POST /shifts/cost`.
///
/// Costs a single shift against the rates in force on the optional
/// `effective_date` query parameter, or the latest rates.
async fn shift_cost_handler(
    State(state): State<AppState>,
    query: Result<Query<ShiftCostQuery>, QueryRejection>,
    payload: Result<Json<Shift>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shift cost request");

    let effective_date = match query {
        Ok(Query(query)) => query.effective_date,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Query string error"
            );
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ApiError::validation_error(rejection.body_text())),
            )
                .into_response();
        }
    };

    let shift = match payload {
        Ok(Json(shift)) => shift,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match state
        .rates_for(effective_date)
        .and_then(|rates| compute_shift_cost(&shift, &rates))
    {
        Ok(cost) => {
            info!(
                correlation_id = %correlation_id,
                shift_id = %cost.shift_id,
                estimated_cost = %cost.estimated_cost,
                duration_us = start_time.elapsed().as_micros(),
                "Shift costed"
            );
            json_response(&cost)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for `POST /labor/aggregate`.
async fn aggregate_labor_handler(
    State(state): State<AppState>,
    payload: Result<Json<AggregateLaborRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing labour aggregate request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match state
        .rates_for(request.effective_date)
        .and_then(|rates| compute_aggregate_labor(&request.shifts, &rates))
    {
        Ok(labor) => {
            info!(
                correlation_id = %correlation_id,
                shifts_count = request.shifts.len(),
                total_cost = %labor.total_cost,
                broken_shift_days = labor.broken_shift_days.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Labour aggregated"
            );
            json_response(&labor)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for `POST /subcontractors/monthly-cost`.
async fn subcontractor_cost_handler(
    payload: Result<Json<SubcontractorCostRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing subcontractor cost request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match compute_subcontractor_monthly_cost(&request.subcontractors) {
        Ok(monthly_cost) => {
            info!(
                correlation_id = %correlation_id,
                lines = request.subcontractors.len(),
                monthly_cost = %monthly_cost,
                "Subcontractors normalised"
            );
            json_response(&SubcontractorCostResponse { monthly_cost })
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for `POST /quotes/totals`.
async fn quote_totals_handler(
    payload: Result<Json<QuoteTotalsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote totals request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match compute_quote_totals(
        request.labor_cost,
        request.subcontractor_monthly_cost,
        request.overhead_percentage,
        request.margin_percentage,
    ) {
        Ok(totals) => {
            info!(
                correlation_id = %correlation_id,
                total_price = %totals.total_price,
                "Quote totals computed"
            );
            json_response(&totals)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for `POST /quotes/price`.
async fn price_quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<PriceQuoteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote price request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match state
        .rates_for(request.effective_date)
        .and_then(|rates| price_quote(&request.quote, &rates))
    {
        Ok(priced) => {
            info!(
                correlation_id = %correlation_id,
                quote_id = %priced.quote_id,
                shifts_count = request.quote.shifts.len(),
                total_price = %priced.totals.total_price,
                duration_us = start_time.elapsed().as_micros(),
                "Quote priced"
            );
            json_response(&priced)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

fn json_response<T: Serialize>(body: &T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Costing failed"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Body text carries serde's message: missing field, unknown variant, bad value.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
