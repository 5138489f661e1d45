//! Table bootstrap.
//!
//! Idempotent `CREATE TABLE IF NOT EXISTS` statements only; there is no
//! migration tooling.
//!
//! ```sql
//! extractable_records(id, record_name UNIQUE, username, authorized_by, authorized_at, data)
//! audit_log(id, record_name, username, authorized_by, action, authorized_at, data)
//! ```

use sqlx::AnyPool;
use tracing::debug;

use crate::connection::DatabaseType;
use crate::error::StoreError;

/// PostgreSQL schema.
pub const SCHEMA_PG: &str = r#"
CREATE TABLE IF NOT EXISTS extractable_records (
    id BIGSERIAL PRIMARY KEY,
    record_name VARCHAR(255) NOT NULL UNIQUE,
    username VARCHAR(255) NOT NULL,
    authorized_by VARCHAR(255) NOT NULL,
    authorized_at BIGINT NOT NULL,
    data TEXT
);
CREATE INDEX IF NOT EXISTS idx_extractable_records_username ON extractable_records(username);
CREATE INDEX IF NOT EXISTS idx_extractable_records_authorized_at ON extractable_records(authorized_at);
CREATE TABLE IF NOT EXISTS audit_log (
    id BIGSERIAL PRIMARY KEY,
    record_name VARCHAR(255) NOT NULL,
    username VARCHAR(255) NOT NULL,
    authorized_by VARCHAR(255) NOT NULL,
    action VARCHAR(16) NOT NULL,
    authorized_at BIGINT NOT NULL,
    data TEXT
);
CREATE INDEX IF NOT EXISTS idx_audit_log_record_name ON audit_log(record_name);
CREATE INDEX IF NOT EXISTS idx_audit_log_username ON audit_log(username);
CREATE INDEX IF NOT EXISTS idx_audit_log_action ON audit_log(action);
CREATE INDEX IF NOT EXISTS idx_audit_log_authorized_at ON audit_log(authorized_at)
"#;

/// SQLite schema.
pub const SCHEMA_SQLITE: &str = r#"
CREATE TABLE IF NOT EXISTS extractable_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    record_name TEXT NOT NULL UNIQUE,
    username TEXT NOT NULL,
    authorized_by TEXT NOT NULL,
    authorized_at INTEGER NOT NULL,
    data TEXT
);
CREATE INDEX IF NOT EXISTS idx_extractable_records_username ON extractable_records(username);
CREATE INDEX IF NOT EXISTS idx_extractable_records_authorized_at ON extractable_records(authorized_at);
CREATE TABLE IF NOT EXISTS audit_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    record_name TEXT NOT NULL,
    username TEXT NOT NULL,
    authorized_by TEXT NOT NULL,
    action TEXT NOT NULL,
    authorized_at INTEGER NOT NULL,
    data TEXT
);
CREATE INDEX IF NOT EXISTS idx_audit_log_record_name ON audit_log(record_name);
CREATE INDEX IF NOT EXISTS idx_audit_log_username ON audit_log(username);
CREATE INDEX IF NOT EXISTS idx_audit_log_action ON audit_log(action);
CREATE INDEX IF NOT EXISTS idx_audit_log_authorized_at ON audit_log(authorized_at)
"#;

/// Schema text for a database type.
pub fn schema_sql(db_type: DatabaseType) -> &'static str {
    match db_type {
        DatabaseType::PostgreSQL => SCHEMA_PG,
        DatabaseType::SQLite => SCHEMA_SQLITE,
    }
}

/// Create tables and indexes when missing.
pub async fn init_schema(pool: &AnyPool, db_type: DatabaseType) -> Result<(), StoreError> {
    // Execute each statement separately
    for stmt in schema_sql(db_type)
        .split(';')
        .filter(|s| !s.trim().is_empty())
    {
        sqlx::query(stmt).execute(pool).await?;
    }

    debug!(?db_type, "database schema ensured");
    Ok(())
}
