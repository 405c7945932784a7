//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_payroll;
use crate::error::EngineError;
use crate::models::CalculationInput;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/history", get(list_history_handler).delete(clear_history_handler))
        .route(
            "/history/:id",
            get(get_history_handler).delete(delete_history_handler),
        )
        .route("/jurisdictions", get(jurisdictions_handler))
        .with_state(state)
}

/// Maps a JSON body rejection to a 400 response.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
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
    ApiErrorResponse::bad_request(error)
}

fn parse_id(raw: &str) -> Result<Uuid, ApiErrorResponse> {
    Uuid::parse_str(raw).map_err(|_| ApiErrorResponse::bad_request(ApiError::invalid_id(raw)))
}

/// Handler for POST /calculate.
///
/// Runs the calculation, records it in history, and returns the result.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_error(rejection, correlation_id).into_response(),
    };

    let input: CalculationInput = request.into();

    let start_time = Instant::now();
    let result = match calculate_payroll(&input, state.config().config()) {
        Ok(result) => result,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation rejected"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let recorded = result.clone();
    if let Err(err) = state
        .update_history(move |history| history.record(recorded))
        .await
    {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Failed to record calculation in history"
        );
        return ApiErrorResponse::from(err).into_response();
    }

    info!(
        correlation_id = %correlation_id,
        calculation_id = %result.id,
        period = %result.period,
        total_company_cost = %result.total_company_cost,
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );

    (StatusCode::OK, Json(result)).into_response()
}

/// Handler for GET /history.
async fn list_history_handler(State(state): State<AppState>) -> Response {
    let summaries = state.history().read().await.summaries();
    (StatusCode::OK, Json(summaries)).into_response()
}

/// Handler for GET /history/:id.
async fn get_history_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response.into_response(),
    };

    let history = state.history().read().await;
    match history.get(id) {
        Some(result) => (StatusCode::OK, Json(result)).into_response(),
        None => {
            ApiErrorResponse::from(EngineError::CalculationNotFound { id: id.to_string() })
                .into_response()
        }
    }
}

/// Handler for DELETE /history/:id.
async fn delete_history_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response.into_response(),
    };

    match state.update_history(move |history| history.delete(id)).await {
        Ok(true) => {
            info!(calculation_id = %id, "Deleted calculation from history");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => {
            ApiErrorResponse::from(EngineError::CalculationNotFound { id: id.to_string() })
                .into_response()
        }
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for DELETE /history.
async fn clear_history_handler(State(state): State<AppState>) -> Response {
    match state.update_history(|history| history.clear()).await {
        Ok(()) => {
            info!("Cleared calculation history");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for GET /jurisdictions.
async fn jurisdictions_handler(State(state): State<AppState>) -> Response {
    (StatusCode::OK, Json(state.config().jurisdictions())).into_response()
}
