//! Row models.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::any::AnyRow;

use crate::error::StoreError;

/// Kind of authorization action recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Delete => "DELETE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(AuditAction::Create),
            "DELETE" => Ok(AuditAction::Delete),
            other => Err(StoreError::Corrupt(format!("unknown audit action '{other}'"))),
        }
    }
}

/// A row of `extractable_records`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractableRecordRow {
    pub id: i64,
    pub record_name: String,
    pub username: String,
    pub authorized_by: String,
    /// Unix milliseconds.
    pub authorized_at: i64,
    /// JSON text.
    pub data: Option<String>,
}

impl ExtractableRecordRow {
    pub(crate) fn from_row(row: &AnyRow) -> Result<Self, StoreError> {
        Ok(Self {
            id: row.try_get("id")?,
            record_name: row.try_get("record_name")?,
            username: row.try_get("username")?,
            authorized_by: row.try_get("authorized_by")?,
            authorized_at: row.try_get("authorized_at")?,
            data: row.try_get("data")?,
        })
    }
}

/// A row of `audit_log`. Append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogRow {
    pub id: i64,
    pub record_name: String,
    pub username: String,
    pub authorized_by: String,
    pub action: AuditAction,
    /// Unix milliseconds.
    pub authorized_at: i64,
    /// JSON text.
    pub data: Option<String>,
}

impl AuditLogRow {
    pub(crate) fn from_row(row: &AnyRow) -> Result<Self, StoreError> {
        let action: String = row.try_get("action")?;
        Ok(Self {
            id: row.try_get("id")?,
            record_name: row.try_get("record_name")?,
            username: row.try_get("username")?,
            authorized_by: row.try_get("authorized_by")?,
            action: action.parse()?,
            authorized_at: row.try_get("authorized_at")?,
            data: row.try_get("data")?,
        })
    }
}

/// Input for [`RecordsManager::create`](crate::RecordsManager::create).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub record_name: String,
    /// User whose credentials authorized the change.
    pub username: String,
    /// Approver recorded alongside; defaults to `username` at the HTTP layer.
    pub authorized_by: String,
    /// JSON text.
    pub data: Option<String>,
}

impl NewRecord {
    pub fn new(
        record_name: impl Into<String>,
        username: impl Into<String>,
        authorized_by: impl Into<String>,
    ) -> Self {
        Self {
            record_name: record_name.into(),
            username: username.into(),
            authorized_by: authorized_by.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// Current time as Unix milliseconds.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
