//! Server and HTTP error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use recauth_auth::{AuthError, ValidationCode, ValidationResult};
use recauth_config::ConfigError;
use recauth_core::{ERROR_IO, ERROR_VALIDATION};
use recauth_store::{PageError, StoreError};
use tracing::{error, warn};

use crate::api::ErrorBody;

const MSG_INTERNAL: &str = "Internal server error";

/// Bootstrap / serve error.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("store: {0}")]
    Store(#[from] StoreError),
    #[error("auth: {0}")]
    Auth(#[from] AuthError),
}

impl ServerError {
    /// Error domain, see [`recauth_core::errors`].
    pub fn domain(&self) -> &'static str {
        match self {
            ServerError::Io(_) => ERROR_IO,
            ServerError::Config(e) => e.domain(),
            ServerError::Store(e) => e.domain(),
            ServerError::Auth(e) => e.domain(),
        }
    }
}

/// A request that did not produce its success response.
///
/// Internal causes are logged here and never sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Credentials or record permission rejected.
    #[error("validation rejected: {}", .0.code)]
    Rejected(ValidationResult),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("record '{0}' not found")]
    NotFound(String),

    /// Malformed request body.
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// No validation outcome could be reached.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    pub fn domain(&self) -> &'static str {
        match self {
            ApiError::Rejected(_)
            | ApiError::Page(_)
            | ApiError::NotFound(_)
            | ApiError::BadRequest(_) => ERROR_VALIDATION,
            ApiError::Store(e) => e.domain(),
            ApiError::Auth(e) => e.domain(),
        }
    }

    pub fn status(&self) -> StatusCode {
        let code = match self {
            ApiError::Rejected(result) => result.code.http_status(),
            ApiError::Page(e) => e.http_status(),
            ApiError::NotFound(_) => 404,
            ApiError::BadRequest(_) => 400,
            ApiError::Store(e) => e.http_status(),
            ApiError::Auth(e) => e.http_status(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Rejected(result) => (status, Json(result)).into_response(),
            ApiError::Page(e) => (status, Json(ErrorBody::new(e.to_string(), e.code()))).into_response(),
            ApiError::NotFound(_) => (
                status,
                Json(ErrorBody::new("Record not found", "RECORD_NOT_FOUND")),
            )
                .into_response(),
            ApiError::BadRequest(reason) => {
                warn!(%reason, "malformed request");
                (
                    status,
                    Json(ErrorBody::new("Malformed request body", "INVALID_REQUEST")),
                )
                    .into_response()
            }
            ApiError::Store(StoreError::Conflict(_)) => (
                status,
                Json(ErrorBody::new(
                    "Record already exists",
                    ValidationCode::InvalidRecordName.as_str(),
                )),
            )
                .into_response(),
            ApiError::Store(e) => {
                error!(error = %e, domain = e.domain(), "store failure");
                (
                    status,
                    Json(ErrorBody::new(MSG_INTERNAL, ValidationCode::InternalError.as_str())),
                )
                    .into_response()
            }
            ApiError::Auth(e) => {
                error!(
                    error = %e,
                    domain = e.domain(),
                    retryable = e.is_retryable(),
                    "validation could not complete"
                );
                (
                    status,
                    Json(ValidationResult::failure(
                        ValidationCode::InternalError,
                        MSG_INTERNAL,
                    )),
                )
                    .into_response()
            }
        }
    }
}
