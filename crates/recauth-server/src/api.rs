//! Request and response bodies. JSON, camelCase.

use recauth_auth::{RecordRequest, UserCredentials, ValidationRequest};
use recauth_store::AuditAction;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An extractable record as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub id: i64,
    pub record_name: String,
    pub username: String,
    pub authorized_by: String,
    /// RFC 3339, UTC.
    pub authorized_at: String,
    pub data: Value,
}

/// One audit entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogResponse {
    pub id: i64,
    pub record_name: String,
    pub username: String,
    pub authorized_by: String,
    pub action: AuditAction,
    /// RFC 3339, UTC.
    pub authorized_at: String,
    pub data: Value,
}

/// A page of audit entries. `nextRecord` is `null` on the last page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse {
    pub number_of_records: u64,
    pub number_of_records_returned: u64,
    pub next_record: Option<u64>,
    pub records: Vec<AuditLogResponse>,
}

/// Raw pagination parameters. Parsed by hand so bad values map to our own
/// error codes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuditQuery {
    pub start_position: Option<String>,
    pub max_records: Option<String>,
}

/// Which permission `POST /records/validate` checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordAction {
    #[default]
    Create,
    Delete,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidateRecordBody {
    pub action: RecordAction,
    pub username: String,
    pub password: String,
    pub record_name: String,
}

impl From<ValidateRecordBody> for ValidationRequest {
    fn from(body: ValidateRecordBody) -> Self {
        let request = RecordRequest {
            username: body.username,
            password: body.password,
            record_name: body.record_name,
        };
        match body.action {
            RecordAction::Create => ValidationRequest::Create(request),
            RecordAction::Delete => ValidationRequest::Delete(request),
        }
    }
}

/// Body of `POST /users/validate`.
pub(crate) type ValidateUserBody = UserCredentials;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateRecordBody {
    pub username: String,
    pub password: String,
    /// Defaults to `username`.
    pub authorized_by: Option<String>,
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteRecordBody {
    pub username: String,
    pub password: String,
    /// Defaults to `username`.
    pub authorized_by: Option<String>,
}

/// Error body for audit and record endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub status: &'static str,
}
