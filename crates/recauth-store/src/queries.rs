//! SQL queries for different databases.
//!
//! PostgreSQL uses `$n` placeholders, SQLite uses `?`. Pick with the
//! selector functions at the bottom rather than matching at each call site.

use crate::connection::DatabaseType;

/// Find an extractable record by name (PostgreSQL).
pub const FIND_RECORD_PG: &str = r#"
SELECT id, record_name, username, authorized_by, authorized_at, data
FROM extractable_records
WHERE record_name = $1
"#;

/// Find an extractable record by name (SQLite).
pub const FIND_RECORD_SQLITE: &str = r#"
SELECT id, record_name, username, authorized_by, authorized_at, data
FROM extractable_records
WHERE record_name = ?
"#;

/// Count records with a given name (PostgreSQL).
pub const COUNT_RECORD_PG: &str = r#"
SELECT COUNT(*) FROM extractable_records WHERE record_name = $1
"#;

/// Count records with a given name (SQLite).
pub const COUNT_RECORD_SQLITE: &str = r#"
SELECT COUNT(*) FROM extractable_records WHERE record_name = ?
"#;

/// Insert an extractable record (PostgreSQL).
pub const INSERT_RECORD_PG: &str = r#"
INSERT INTO extractable_records (record_name, username, authorized_by, authorized_at, data)
VALUES ($1, $2, $3, $4, $5)
RETURNING id
"#;

/// Insert an extractable record (SQLite).
pub const INSERT_RECORD_SQLITE: &str = r#"
INSERT INTO extractable_records (record_name, username, authorized_by, authorized_at, data)
VALUES (?, ?, ?, ?, ?)
RETURNING id
"#;

/// Delete an extractable record by name, returning the removed row (PostgreSQL).
pub const DELETE_RECORD_PG: &str = r#"
DELETE FROM extractable_records
WHERE record_name = $1
RETURNING id, record_name, username, authorized_by, authorized_at, data
"#;

/// Delete an extractable record by name, returning the removed row (SQLite).
pub const DELETE_RECORD_SQLITE: &str = r#"
DELETE FROM extractable_records
WHERE record_name = ?
RETURNING id, record_name, username, authorized_by, authorized_at, data
"#;

/// Give a read transaction a single snapshot (PostgreSQL only; SQLite read
/// transactions already see one).
pub const SNAPSHOT_READ_PG: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ";

/// Append an audit entry (PostgreSQL).
pub const INSERT_AUDIT_PG: &str = r#"
INSERT INTO audit_log (record_name, username, authorized_by, action, authorized_at, data)
VALUES ($1, $2, $3, $4, $5, $6)
"#;

/// Append an audit entry (SQLite).
pub const INSERT_AUDIT_SQLITE: &str = r#"
INSERT INTO audit_log (record_name, username, authorized_by, action, authorized_at, data)
VALUES (?, ?, ?, ?, ?, ?)
"#;

/// Count audit entries for a record (PostgreSQL).
pub const COUNT_AUDIT_PG: &str = r#"
SELECT COUNT(*) FROM audit_log WHERE record_name = $1
"#;

/// Count audit entries for a record (SQLite).
pub const COUNT_AUDIT_SQLITE: &str = r#"
SELECT COUNT(*) FROM audit_log WHERE record_name = ?
"#;

/// One page of audit entries, oldest first (PostgreSQL).
pub const PAGE_AUDIT_PG: &str = r#"
SELECT id, record_name, username, authorized_by, action, authorized_at, data
FROM audit_log
WHERE record_name = $1
ORDER BY id ASC
LIMIT $2 OFFSET $3
"#;

/// One page of audit entries, oldest first (SQLite).
pub const PAGE_AUDIT_SQLITE: &str = r#"
SELECT id, record_name, username, authorized_by, action, authorized_at, data
FROM audit_log
WHERE record_name = ?
ORDER BY id ASC
LIMIT ? OFFSET ?
"#;

#[inline]
pub fn find_record(db: DatabaseType) -> &'static str {
    match db {
        DatabaseType::PostgreSQL => FIND_RECORD_PG,
        DatabaseType::SQLite => FIND_RECORD_SQLITE,
    }
}

#[inline]
pub fn count_record(db: DatabaseType) -> &'static str {
    match db {
        DatabaseType::PostgreSQL => COUNT_RECORD_PG,
        DatabaseType::SQLite => COUNT_RECORD_SQLITE,
    }
}

#[inline]
pub fn insert_record(db: DatabaseType) -> &'static str {
    match db {
        DatabaseType::PostgreSQL => INSERT_RECORD_PG,
        DatabaseType::SQLite => INSERT_RECORD_SQLITE,
    }
}

#[inline]
pub fn delete_record(db: DatabaseType) -> &'static str {
    match db {
        DatabaseType::PostgreSQL => DELETE_RECORD_PG,
        DatabaseType::SQLite => DELETE_RECORD_SQLITE,
    }
}

#[inline]
pub fn insert_audit(db: DatabaseType) -> &'static str {
    match db {
        DatabaseType::PostgreSQL => INSERT_AUDIT_PG,
        DatabaseType::SQLite => INSERT_AUDIT_SQLITE,
    }
}

#[inline]
pub fn count_audit(db: DatabaseType) -> &'static str {
    match db {
        DatabaseType::PostgreSQL => COUNT_AUDIT_PG,
        DatabaseType::SQLite => COUNT_AUDIT_SQLITE,
    }
}

#[inline]
pub fn page_audit(db: DatabaseType) -> &'static str {
    match db {
        DatabaseType::PostgreSQL => PAGE_AUDIT_PG,
        DatabaseType::SQLite => PAGE_AUDIT_SQLITE,
    }
}
