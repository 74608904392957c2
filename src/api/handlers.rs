//! HTTP request handlers for the coverage engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ScheduleEntry;
use crate::error::EngineResult;
use crate::export::{export_csv, export_file_name};
use crate::models::{ComputeResult, Device, Holiday, Post, ScheduleTemplate};

use super::request::{ComputeRequest, NameRequest, RangeQuery};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/compute", post(compute_handler))
        .route("/devices", get(list_devices).post(create_device))
        .route("/devices/:device_id", delete(delete_device))
        .route("/devices/:device_id/posts", get(list_posts).post(create_post))
        .route("/devices/:device_id/results", get(results_handler))
        .route("/devices/:device_id/export", get(export_handler))
        .route("/posts/:post_id", delete(delete_post))
        .route(
            "/posts/:post_id/schedules",
            get(list_schedules).put(upsert_schedules),
        )
        .route("/holidays", get(list_holidays))
        .with_state(state)
}

/// Logs a failed request and converts the error into a response.
fn reject(correlation_id: Uuid, error: impl Into<ApiErrorResponse>) -> ApiErrorResponse {
    let response = error.into();
    warn!(
        correlation_id = %correlation_id,
        status = response.status.as_u16(),
        code = %response.error.code,
        message = %response.error.message,
        "Request rejected"
    );
    response
}

/// Handler for POST /compute.
///
/// Computes coverage over the records carried in the request body.
async fn compute_handler(
    State(state): State<AppState>,
    payload: Result<Json<ComputeRequest>, JsonRejection>,
) -> ApiResult<Json<ComputeResult>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing compute request");

    let Json(request) = payload.map_err(|rejection| reject(correlation_id, rejection))?;
    let (input, start_date, end_date) = request.into_parts();

    let started = Instant::now();
    let result = input
        .compute(start_date, end_date, state.settings())
        .map_err(|err| reject(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        posts = result.posts.len(),
        period_days = result.period_days,
        total_hours = %result.totals.total,
        duration_us = started.elapsed().as_micros(),
        "Compute completed successfully"
    );
    Ok(Json(result))
}

/// Handler for GET /devices.
async fn list_devices(State(state): State<AppState>) -> Json<Vec<Device>> {
    Json(state.store().read().await.devices())
}

/// Handler for POST /devices.
async fn create_device(
    State(state): State<AppState>,
    payload: Result<Json<NameRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Device>)> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|rejection| reject(correlation_id, rejection))?;
    let name = validated_name(correlation_id, &request.name)?;

    let device = state
        .store()
        .write()
        .await
        .create_device(name)
        .map_err(|err| reject(correlation_id, err))?;
    info!(correlation_id = %correlation_id, device_id = device.id, "Device created");
    Ok((StatusCode::CREATED, Json(device)))
}

/// Handler for DELETE /devices/:device_id.
async fn delete_device(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();
    let Path(device_id) = path.map_err(|rejection| reject(correlation_id, rejection))?;
    state
        .store()
        .write()
        .await
        .delete_device(device_id)
        .map_err(|err| reject(correlation_id, err))?;

    info!(correlation_id = %correlation_id, device_id, "Device deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /devices/:device_id/posts.
async fn list_posts(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<Post>>> {
    let correlation_id = Uuid::new_v4();
    let Path(device_id) = path.map_err(|rejection| reject(correlation_id, rejection))?;
    let posts = state
        .store()
        .read()
        .await
        .posts(device_id)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(posts))
}

/// Handler for POST /devices/:device_id/posts.
async fn create_post(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<NameRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let correlation_id = Uuid::new_v4();
    let Path(device_id) = path.map_err(|rejection| reject(correlation_id, rejection))?;
    let Json(request) = payload.map_err(|rejection| reject(correlation_id, rejection))?;
    let name = validated_name(correlation_id, &request.name)?;

    let post = state
        .store()
        .write()
        .await
        .create_post(device_id, name)
        .map_err(|err| reject(correlation_id, err))?;

    info!(correlation_id = %correlation_id, device_id, post_id = post.id, "Post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// Handler for DELETE /posts/:post_id.
async fn delete_post(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();
    let Path(post_id) = path.map_err(|rejection| reject(correlation_id, rejection))?;
    state
        .store()
        .write()
        .await
        .delete_post(post_id)
        .map_err(|err| reject(correlation_id, err))?;

    info!(correlation_id = %correlation_id, post_id, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /posts/:post_id/schedules.
async fn list_schedules(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<ScheduleTemplate>>> {
    let correlation_id = Uuid::new_v4();
    let Path(post_id) = path.map_err(|rejection| reject(correlation_id, rejection))?;
    let rows = state
        .store()
        .read()
        .await
        .schedules(post_id)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(rows))
}

/// Handler for PUT /posts/:post_id/schedules.
///
/// Inserts or replaces one row per day key and returns every row of the
/// post afterwards.
async fn upsert_schedules(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Vec<ScheduleEntry>>, JsonRejection>,
) -> ApiResult<Json<Vec<ScheduleTemplate>>> {
    let correlation_id = Uuid::new_v4();
    let Path(post_id) = path.map_err(|rejection| reject(correlation_id, rejection))?;
    let Json(rows) = payload.map_err(|rejection| reject(correlation_id, rejection))?;
    let submitted = rows.len();

    let saved = state
        .store()
        .write()
        .await
        .upsert_schedules(post_id, rows)
        .map_err(|err| reject(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        post_id,
        submitted,
        stored = saved.len(),
        "Schedules saved"
    );
    Ok(Json(saved))
}

/// Handler for GET /holidays.
async fn list_holidays(State(state): State<AppState>) -> Json<Vec<Holiday>> {
    Json(state.store().read().await.holidays().to_vec())
}

/// Handler for GET /devices/:device_id/results.
async fn results_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> ApiResult<Json<ComputeResult>> {
    let correlation_id = Uuid::new_v4();
    let Path(device_id) = path.map_err(|rejection| reject(correlation_id, rejection))?;
    let Query(range) = query.map_err(|rejection| reject(correlation_id, rejection))?;

    let result = compute_for_device(&state, device_id, range)
        .await
        .map_err(|err| reject(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        device_id,
        posts = result.posts.len(),
        total_hours = %result.totals.total,
        "Device results computed"
    );
    Ok(Json(result))
}

/// Handler for GET /devices/:device_id/export.
///
/// Returns the device results as a CSV attachment.
async fn export_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let Path(device_id) = path.map_err(|rejection| reject(correlation_id, rejection))?;
    let Query(range) = query.map_err(|rejection| reject(correlation_id, rejection))?;

    let csv = compute_for_device(&state, device_id, range)
        .await
        .and_then(|result| export_csv(&result, range.start_date, range.end_date))
        .map_err(|err| reject(correlation_id, err))?;

    info!(correlation_id = %correlation_id, device_id, bytes = csv.len(), "Export generated");

    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(range.start_date, range.end_date)
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}

/// Snapshots a device's records under a read lock and computes without it.
async fn compute_for_device(
    state: &AppState,
    device_id: i64,
    range: RangeQuery,
) -> EngineResult<ComputeResult> {
    let input = state.store().read().await.compute_input(device_id)?;
    input.compute(range.start_date, range.end_date, state.settings())
}

fn validated_name(correlation_id: Uuid, name: &str) -> ApiResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(reject(
            correlation_id,
            ApiErrorResponse::bad_request(ApiError::validation_error("name must not be empty")),
        ));
    }
    Ok(trimmed)
}
