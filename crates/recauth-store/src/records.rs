//! Extractable record repository.

use std::sync::Arc;

use sqlx::Row;
use tracing::{debug, info};

use crate::audit::{AuditEntry, append_entry};
use crate::connection::ConnectionManager;
use crate::error::StoreError;
use crate::models::{AuditAction, ExtractableRecordRow, NewRecord, now_millis};
use crate::queries;

/// Reads and writes `extractable_records`.
///
/// Every create and delete appends exactly one audit entry in the same
/// transaction as the record change.
#[derive(Debug, Clone)]
pub struct RecordsManager {
    db: Arc<ConnectionManager>,
}

impl RecordsManager {
    pub fn new(db: Arc<ConnectionManager>) -> Self {
        Self { db }
    }

    /// Look up a record by name.
    pub async fn get(&self, record_name: &str) -> Result<Option<ExtractableRecordRow>, StoreError> {
        let pool = self.db.pool()?;
        let row = sqlx::query(queries::find_record(self.db.database_type()))
            .bind(record_name)
            .fetch_optional(&pool)
            .await?;

        row.as_ref().map(ExtractableRecordRow::from_row).transpose()
    }

    pub async fn exists(&self, record_name: &str) -> Result<bool, StoreError> {
        let pool = self.db.pool()?;
        let count: i64 = sqlx::query(queries::count_record(self.db.database_type()))
            .bind(record_name)
            .fetch_one(&pool)
            .await?
            .try_get(0)?;
        Ok(count > 0)
    }

    /// Insert a record and its `CREATE` audit entry.
    ///
    /// A record with the same name yields [`StoreError::Conflict`] and
    /// leaves both tables untouched.
    pub async fn create(&self, record: NewRecord) -> Result<ExtractableRecordRow, StoreError> {
        let pool = self.db.pool()?;
        let db_type = self.db.database_type();
        let authorized_at = now_millis();

        let mut tx = pool.begin().await?;

        let id: i64 = sqlx::query(queries::insert_record(db_type))
            .bind(&record.record_name)
            .bind(&record.username)
            .bind(&record.authorized_by)
            .bind(authorized_at)
            .bind(record.data.as_deref())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| StoreError::from_insert(e, &record.record_name))?
            .try_get(0)?;

        append_entry(
            &mut tx,
            db_type,
            AuditEntry {
                record_name: &record.record_name,
                username: &record.username,
                authorized_by: &record.authorized_by,
                action: AuditAction::Create,
                authorized_at,
                data: record.data.as_deref(),
            },
        )
        .await?;

        tx.commit().await?;

        info!(
            record_name = %record.record_name,
            username = %record.username,
            "record created"
        );

        Ok(ExtractableRecordRow {
            id,
            record_name: record.record_name,
            username: record.username,
            authorized_by: record.authorized_by,
            authorized_at,
            data: record.data,
        })
    }

    /// Delete a record and append its `DELETE` audit entry.
    ///
    /// Returns the deleted row, or `None` when no record has that name (in
    /// which case nothing is written).
    pub async fn delete(
        &self,
        record_name: &str,
        username: &str,
        authorized_by: &str,
    ) -> Result<Option<ExtractableRecordRow>, StoreError> {
        let pool = self.db.pool()?;
        let db_type = self.db.database_type();

        let mut tx = pool.begin().await?;

        // DELETE runs first: a concurrent delete of the same name waits on it
        // and then removes nothing.
        let removed = sqlx::query(queries::delete_record(db_type))
            .bind(record_name)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(removed) = removed else {
            debug!(record_name, "delete requested for missing record");
            return Ok(None);
        };
        let record = ExtractableRecordRow::from_row(&removed)?;

        append_entry(
            &mut tx,
            db_type,
            AuditEntry {
                record_name,
                username,
                authorized_by,
                action: AuditAction::Delete,
                authorized_at: now_millis(),
                data: record.data.as_deref(),
            },
        )
        .await?;

        tx.commit().await?;

        info!(record_name, username, "record deleted");
        Ok(Some(record))
    }
}
