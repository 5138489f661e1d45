//! Conversions between store rows and API bodies.

use chrono::{DateTime, SecondsFormat, Utc};
use recauth_store::{AuditLogRow, AuditPage, ExtractableRecordRow};
use serde_json::Value;

use crate::api::{AuditLogResponse, PaginationResponse, RecordResponse};

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("invalid timestamp '{0}'")]
    Timestamp(String),
}

/// Render Unix milliseconds as RFC 3339 UTC, e.g. `2024-05-01T12:00:00.000Z`.
pub(crate) fn millis_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn rfc3339_to_millis(s: &str) -> Result<i64, ConvertError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.timestamp_millis())
        .map_err(|_| ConvertError::Timestamp(s.to_string()))
}

/// Stored JSON text to a value. Absent or unparseable text becomes `null`.
fn data_value(data: Option<&str>) -> Value {
    data.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or(Value::Null)
}

/// A value to stored JSON text. `null` is stored as absent.
pub(crate) fn data_text(data: &Value) -> Option<String> {
    (!data.is_null()).then(|| data.to_string())
}

impl From<ExtractableRecordRow> for RecordResponse {
    fn from(row: ExtractableRecordRow) -> Self {
        Self {
            id: row.id,
            data: data_value(row.data.as_deref()),
            authorized_at: millis_to_rfc3339(row.authorized_at),
            record_name: row.record_name,
            username: row.username,
            authorized_by: row.authorized_by,
        }
    }
}

impl RecordResponse {
    /// Back to the stored representation.
    pub fn into_row(self) -> Result<ExtractableRecordRow, ConvertError> {
        Ok(ExtractableRecordRow {
            id: self.id,
            authorized_at: rfc3339_to_millis(&self.authorized_at)?,
            data: data_text(&self.data),
            record_name: self.record_name,
            username: self.username,
            authorized_by: self.authorized_by,
        })
    }
}

impl From<AuditLogRow> for AuditLogResponse {
    fn from(row: AuditLogRow) -> Self {
        Self {
            id: row.id,
            action: row.action,
            data: data_value(row.data.as_deref()),
            authorized_at: millis_to_rfc3339(row.authorized_at),
            record_name: row.record_name,
            username: row.username,
            authorized_by: row.authorized_by,
        }
    }
}

impl From<AuditPage> for PaginationResponse {
    fn from(page: AuditPage) -> Self {
        Self {
            number_of_records: page.number_of_records,
            number_of_records_returned: page.number_of_records_returned,
            next_record: page.next_record,
            records: page.records.into_iter().map(Into::into).collect(),
        }
    }
}
