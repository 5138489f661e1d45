//! Default configuration values.
//!
//! Centralized default constants for use across all crates.

// ============================================================================
// Server Defaults
// ============================================================================

/// Default HTTP listen address.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
/// Default graceful shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Database Defaults
// ============================================================================

/// Default PostgreSQL port.
pub const DEFAULT_DB_PORT: u16 = 5432;
/// Default maximum number of pooled connections.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
/// Default minimum number of pooled connections.
pub const DEFAULT_DB_MIN_CONNECTIONS: u32 = 1;
/// Default number of connection attempts made by `ConnectionManager::init`.
pub const DEFAULT_MAX_CONNECT_RETRIES: u32 = 5;
/// Default delay (ms) between connection attempts.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 5000;
/// Default timeout (ms) for health checks, connection acquire and shutdown.
pub const DEFAULT_DB_TIMEOUT_MS: u64 = 5000;
/// Create tables on startup when missing.
pub const DEFAULT_INIT_SCHEMA: bool = true;

// ============================================================================
// Pagination Defaults
// ============================================================================

/// Default page size when `maxRecords` is not supplied.
pub const DEFAULT_MAX_RECORDS: u64 = 25;
/// Upper bound accepted for `maxRecords`.
pub const DEFAULT_MAX_RECORDS_CEILING: u64 = 100;

// ============================================================================
// Catalog Defaults
// ============================================================================

/// Default catalog request timeout (ms).
pub const DEFAULT_CATALOG_TIMEOUT_MS: u64 = 3000;
