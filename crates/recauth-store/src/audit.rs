//! Audit log reads and appends.

use std::sync::Arc;

use recauth_core::ERROR_VALIDATION;
use sqlx::{AnyConnection, Row};
use tracing::debug;

use crate::connection::{ConnectionManager, DatabaseType};
use crate::error::StoreError;
use crate::models::{AuditAction, AuditLogRow};
use crate::queries;

/// A rejected page request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("startPosition must be a positive integer")]
    InvalidStartPosition,

    #[error("maxRecords must be between 1 and {ceiling}")]
    InvalidMaxRecords { ceiling: u64 },
}

impl PageError {
    #[inline]
    pub fn domain(&self) -> &'static str {
        ERROR_VALIDATION
    }

    /// Wire code.
    pub fn code(&self) -> &'static str {
        match self {
            PageError::InvalidStartPosition => "INVALID_START_POSITION",
            PageError::InvalidMaxRecords { .. } => "INVALID_MAX_RECORDS",
        }
    }

    #[inline]
    pub fn http_status(&self) -> u16 {
        400
    }
}

/// Validated `(startPosition, maxRecords)` pair. `start_position` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    start_position: u64,
    max_records: u64,
}

impl PageRequest {
    pub fn new(start_position: u64, max_records: u64, ceiling: u64) -> Result<Self, PageError> {
        // Offsets are bound as i64.
        if start_position < 1 || start_position > i64::MAX as u64 {
            return Err(PageError::InvalidStartPosition);
        }
        if max_records < 1 || max_records > ceiling {
            return Err(PageError::InvalidMaxRecords { ceiling });
        }
        Ok(Self {
            start_position,
            max_records,
        })
    }

    #[inline]
    pub fn start_position(&self) -> u64 {
        self.start_position
    }

    #[inline]
    pub fn max_records(&self) -> u64 {
        self.max_records
    }
}

/// One page of audit entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuditPage {
    /// Entries matching the record name in total.
    pub number_of_records: u64,
    pub number_of_records_returned: u64,
    /// 1-based position of the next page, `None` on the last page.
    pub next_record: Option<u64>,
    pub records: Vec<AuditLogRow>,
}

/// Position of the next page, or `None` when this page reaches the end.
pub fn next_record(start_position: u64, returned: u64, total: u64) -> Option<u64> {
    let consumed = start_position.saturating_sub(1).saturating_add(returned);
    (returned > 0 && consumed < total).then(|| start_position + returned)
}

/// Read side of the audit log.
#[derive(Debug, Clone)]
pub struct AuditManager {
    db: Arc<ConnectionManager>,
}

impl AuditManager {
    pub fn new(db: Arc<ConnectionManager>) -> Self {
        Self { db }
    }

    /// Fetch one page of a record's audit trail, oldest entry first.
    ///
    /// A record with no entries yields an empty page, not an error.
    pub async fn get_audit_logs(
        &self,
        record_name: &str,
        page: PageRequest,
    ) -> Result<AuditPage, StoreError> {
        let pool = self.db.pool()?;
        let db_type = self.db.database_type();

        // Count and page read one snapshot.
        let mut tx = pool.begin().await?;
        if db_type == DatabaseType::PostgreSQL {
            sqlx::query(queries::SNAPSHOT_READ_PG)
                .execute(&mut *tx)
                .await?;
        }

        let total: i64 = sqlx::query(queries::count_audit(db_type))
            .bind(record_name)
            .fetch_one(&mut *tx)
            .await?
            .try_get(0)?;
        let total = u64::try_from(total).unwrap_or(0);

        if total == 0 {
            tx.commit().await?;
            return Ok(AuditPage::default());
        }

        #[allow(clippy::cast_possible_wrap)]
        let rows = sqlx::query(queries::page_audit(db_type))
            .bind(record_name)
            .bind(page.max_records as i64)
            .bind((page.start_position - 1) as i64)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        let records = rows
            .iter()
            .map(AuditLogRow::from_row)
            .collect::<Result<Vec<_>, _>>()?;
        let returned = records.len() as u64;

        debug!(
            record_name,
            start_position = page.start_position,
            total,
            returned,
            "audit page fetched"
        );

        Ok(AuditPage {
            number_of_records: total,
            number_of_records_returned: returned,
            next_record: next_record(page.start_position, returned, total),
            records,
        })
    }
}

/// Audit entry about to be appended.
pub(crate) struct AuditEntry<'a> {
    pub record_name: &'a str,
    pub username: &'a str,
    pub authorized_by: &'a str,
    pub action: AuditAction,
    pub authorized_at: i64,
    pub data: Option<&'a str>,
}

/// Append an entry on an open connection (normally a transaction).
pub(crate) async fn append_entry(
    conn: &mut AnyConnection,
    db_type: DatabaseType,
    entry: AuditEntry<'_>,
) -> Result<(), StoreError> {
    sqlx::query(queries::insert_audit(db_type))
        .bind(entry.record_name)
        .bind(entry.username)
        .bind(entry.authorized_by)
        .bind(entry.action.as_str())
        .bind(entry.authorized_at)
        .bind(entry.data)
        .execute(conn)
        .await?;
    Ok(())
}
