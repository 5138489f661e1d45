//! HTTP routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use recauth_auth::{ValidationRequest, ValidationResult};
use recauth_store::{NewRecord, PageError, PageRequest};
use tracing::{info, warn};

use crate::api::{
    AuditQuery, CreateRecordBody, DeleteRecordBody, HealthResponse, PaginationResponse,
    RecordResponse, ValidateRecordBody, ValidateUserBody,
};
use crate::convert::data_text;
use crate::error::ApiError;
use crate::state::AppState;

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/audit/{record_name}", get(get_audit_logs))
        .route("/users/validate", post(validate_user))
        .route("/records/validate", post(validate_record))
        .route(
            "/records/{record_name}",
            get(get_record).post(create_record).delete(delete_record),
        )
        .with_state(state)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(v)| v)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

/// A validation result as a response, with the status its code implies.
fn validation_response(result: ValidationResult) -> Response {
    if result.is_valid {
        (StatusCode::OK, Json(result)).into_response()
    } else {
        ApiError::Rejected(result).into_response()
    }
}

async fn health(State(state): State<AppState>) -> Response {
    match state.db.health_check().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response(),
        Err(e) => {
            warn!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                }),
            )
                .into_response()
        }
    }
}

/// Parse an optional positive integer query value.
fn parse_param(raw: Option<&str>, default: u64, err: PageError) -> Result<u64, PageError> {
    match raw {
        None => Ok(default),
        Some(s) => s.trim().parse::<u64>().map_err(|_| err),
    }
}

async fn get_audit_logs(
    State(state): State<AppState>,
    Path(record_name): Path<String>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<PaginationResponse>, ApiError> {
    let ceiling = state.pagination.max_records_ceiling;
    let start = parse_param(
        query.start_position.as_deref(),
        1,
        PageError::InvalidStartPosition,
    )?;
    let max = parse_param(
        query.max_records.as_deref(),
        state.pagination.default_max_records,
        PageError::InvalidMaxRecords { ceiling },
    )?;
    let page = PageRequest::new(start, max, ceiling)?;

    let page = state.audit.get_audit_logs(&record_name, page).await?;
    Ok(Json(page.into()))
}

async fn validate_user(
    State(state): State<AppState>,
    payload: Result<Json<ValidateUserBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let creds = body(payload)?;
    let result = state
        .validations
        .validate(&ValidationRequest::User(creds))
        .await?;
    Ok(validation_response(result))
}

async fn validate_record(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRecordBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request: ValidationRequest = body(payload)?.into();
    let result = state.validations.validate(&request).await?;
    Ok(validation_response(result))
}

async fn get_record(
    State(state): State<AppState>,
    Path(record_name): Path<String>,
) -> Result<Json<RecordResponse>, ApiError> {
    match state.records.get(&record_name).await? {
        Some(row) => Ok(Json(row.into())),
        None => Err(ApiError::NotFound(record_name)),
    }
}

async fn create_record(
    State(state): State<AppState>,
    Path(record_name): Path<String>,
    payload: Result<Json<CreateRecordBody>, JsonRejection>,
) -> Result<(StatusCode, Json<RecordResponse>), ApiError> {
    let req = body(payload)?;

    let verdict = state
        .validations
        .validate_create(&req.username, &req.password, &record_name)
        .await?;
    if !verdict.is_valid {
        return Err(ApiError::Rejected(verdict));
    }

    let authorized_by = req.authorized_by.unwrap_or_else(|| req.username.clone());
    let mut new = NewRecord::new(&record_name, req.username, authorized_by);
    new.data = req.data.as_ref().and_then(data_text);

    let row = state.records.create(new).await?;
    info!(record_name = %row.record_name, "create authorized");
    Ok((StatusCode::CREATED, Json(row.into())))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(record_name): Path<String>,
    payload: Result<Json<DeleteRecordBody>, JsonRejection>,
) -> Result<Json<RecordResponse>, ApiError> {
    let req = body(payload)?;

    let verdict = state
        .validations
        .validate_delete(&req.username, &req.password, &record_name)
        .await?;
    if !verdict.is_valid {
        return Err(ApiError::Rejected(verdict));
    }

    let authorized_by = req.authorized_by.as_deref().unwrap_or(&req.username);
    match state
        .records
        .delete(&record_name, &req.username, authorized_by)
        .await?
    {
        Some(row) => {
            info!(record_name = %row.record_name, "delete authorized");
            Ok(Json(row.into()))
        }
        None => Err(ApiError::NotFound(record_name)),
    }
}
