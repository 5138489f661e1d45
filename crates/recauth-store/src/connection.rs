//! Connection lifecycle management.

use parking_lot::RwLock;
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::schema;

/// Database type enum for query selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// PostgreSQL database.
    PostgreSQL,
    /// SQLite database.
    SQLite,
}

impl DatabaseType {
    /// Detect database type from URL.
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Self::PostgreSQL)
        } else if url.starts_with("sqlite:") {
            Some(Self::SQLite)
        } else {
            None
        }
    }
}

/// Owner of the single pool to the relational store.
///
/// State machine: `Uninitialized -> (init) -> Ready -> (shutdown) -> Uninitialized`.
/// Components receive the manager by `Arc` and borrow the pool through
/// [`pool`](Self::pool); only the manager closes or replaces it.
pub struct ConnectionManager {
    config: StoreConfig,
    db_type: DatabaseType,
    pool: RwLock<Option<AnyPool>>,
    /// Serializes `init` and `shutdown`.
    lifecycle: Mutex<()>,
}

impl ConnectionManager {
    /// Create an uninitialized manager. No I/O happens until [`init`](Self::init).
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let db_type =
            DatabaseType::from_url(&config.database_url).ok_or(StoreError::UnsupportedUrl)?;

        Ok(Self {
            config,
            db_type,
            pool: RwLock::new(None),
            lifecycle: Mutex::new(()),
        })
    }

    /// Establish the pool, making up to `max_connect_retries` attempts with a
    /// fixed `retry_delay` between them.
    ///
    /// Calling `init` on a ready manager is a no-op.
    pub async fn init(&self) -> Result<(), StoreError> {
        let _guard = self.lifecycle.lock().await;

        if self.is_ready() {
            debug!("database already initialized, skipping init");
            return Ok(());
        }

        // Install database drivers for the "any" pool
        sqlx::any::install_default_drivers();

        let attempts = self.config.max_connect_retries.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            match self.connect_once().await {
                Ok(pool) => {
                    if self.config.init_schema
                        && let Err(e) = schema::init_schema(&pool, self.db_type).await
                    {
                        pool.close().await;
                        return Err(e);
                    }
                    *self.pool.write() = Some(pool);
                    info!(
                        attempt,
                        db_type = ?self.db_type,
                        "database connection established"
                    );
                    return Ok(());
                }
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts = attempts,
                        error = %e,
                        "database connection attempt failed"
                    );
                    last_error = Some(e);
                    if attempt < attempts {
                        tokio::time::sleep(self.config.retry_delay).await;
                    }
                }
            }
        }

        Err(StoreError::ConnectFailed {
            attempts,
            reason: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }

    async fn connect_once(&self) -> Result<AnyPool, sqlx::Error> {
        AnyPoolOptions::new()
            .max_connections(self.config.max_connections)
            .min_connections(self.config.min_connections)
            .acquire_timeout(self.config.db_timeout)
            .max_lifetime(self.config.max_lifetime)
            .idle_timeout(self.config.idle_timeout)
            .connect(&self.config.database_url)
            .await
    }

    /// Get the live pool.
    ///
    /// Fails with [`StoreError::NotInitialized`] before `init` or after `shutdown`.
    pub fn pool(&self) -> Result<AnyPool, StoreError> {
        self.pool.read().clone().ok_or(StoreError::NotInitialized)
    }

    /// Whether `init` has succeeded and `shutdown` has not run since.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.pool.read().is_some()
    }

    /// Get database type.
    #[inline]
    pub fn database_type(&self) -> DatabaseType {
        self.db_type
    }

    /// Run a `SELECT 1` liveness check bounded by `db_timeout`.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        let pool = self.pool()?;
        let timeout = self.config.db_timeout;

        // Pool acquire is bounded by the same timeout and may fire first.
        match tokio::time::timeout(timeout, sqlx::query("SELECT 1").execute(&pool)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(sqlx::Error::PoolTimedOut)) | Err(_) => Err(StoreError::Timeout(timeout)),
            Ok(Err(e)) => Err(e.into()),
        }
    }

    /// Close the pool and return to the uninitialized state.
    ///
    /// A manager that was never initialized logs and returns `Ok`.
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        let _guard = self.lifecycle.lock().await;

        let taken = self.pool.write().take();
        let Some(pool) = taken else {
            info!("database shutdown requested but no connection is open");
            return Ok(());
        };

        let timeout = self.config.db_timeout;
        tokio::time::timeout(timeout, pool.close())
            .await
            .map_err(|_| StoreError::Timeout(timeout))?;

        info!("database connection closed");
        Ok(())
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("db_type", &self.db_type)
            .field("ready", &self.is_ready())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn memory_config() -> StoreConfig {
        StoreConfig::new("sqlite::memory:")
            .max_connections(1)
            .retry_delay(Duration::from_millis(10))
    }

    #[test]
    fn test_database_type_detection() {
        assert_eq!(
            DatabaseType::from_url("postgres://localhost/db"),
            Some(DatabaseType::PostgreSQL)
        );
        assert_eq!(
            DatabaseType::from_url("postgresql://localhost/db"),
            Some(DatabaseType::PostgreSQL)
        );
        assert_eq!(
            DatabaseType::from_url("sqlite::memory:"),
            Some(DatabaseType::SQLite)
        );
        assert_eq!(DatabaseType::from_url("mysql://localhost/db"), None);
    }

    #[test]
    fn test_unsupported_url() {
        let result = ConnectionManager::new(StoreConfig::new("redis://localhost"));
        assert!(matches!(result, Err(StoreError::UnsupportedUrl)));
    }

    #[test]
    fn test_pool_before_init() {
        let manager = ConnectionManager::new(memory_config()).unwrap();
        let err = manager.pool().unwrap_err();
        assert!(matches!(err, StoreError::NotInitialized));
        assert_eq!(err.domain(), "db");
        assert!(!manager.is_ready());
    }

    #[tokio::test]
    async fn test_init_health_shutdown_cycle() {
        let manager = ConnectionManager::new(memory_config()).unwrap();

        manager.init().await.unwrap();
        assert!(manager.is_ready());
        manager.health_check().await.unwrap();

        manager.shutdown().await.unwrap();
        assert!(!manager.is_ready());
        assert!(matches!(manager.pool(), Err(StoreError::NotInitialized)));
        assert!(matches!(
            manager.health_check().await,
            Err(StoreError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_init_twice_is_noop() {
        let manager = ConnectionManager::new(memory_config()).unwrap();
        manager.init().await.unwrap();

        // Same pool handle survives a second init: the schema created by the
        // first init is still visible through the single memory connection.
        manager.init().await.unwrap();
        let pool = manager.pool().unwrap();
        sqlx::query("SELECT COUNT(*) FROM audit_log")
            .fetch_one(&pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_without_init_is_ok() {
        let manager = ConnectionManager::new(memory_config()).unwrap();
        manager.shutdown().await.unwrap();
        manager.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_init_exhausts_retries() {
        // A read-only open of a file that doesn't exist fails on every attempt.
        let config = StoreConfig::new("sqlite:/nonexistent-recauth-dir/records.db?mode=ro")
            .max_connections(1)
            .max_connect_retries(3)
            .retry_delay(Duration::from_millis(50));
        let manager = ConnectionManager::new(config).unwrap();

        let started = Instant::now();
        let err = manager.init().await.unwrap_err();
        let elapsed = started.elapsed();

        match err {
            StoreError::ConnectFailed { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("expected ConnectFailed, got {other:?}"),
        }
        // Two delays separate three attempts.
        assert!(elapsed >= Duration::from_millis(100), "elapsed {elapsed:?}");
        assert!(!manager.is_ready());
        assert!(matches!(manager.pool(), Err(StoreError::NotInitialized)));
    }

    #[tokio::test]
    async fn test_health_check_times_out_when_pool_exhausted() {
        let config = memory_config().db_timeout(Duration::from_millis(50));
        let manager = ConnectionManager::new(config).unwrap();
        manager.init().await.unwrap();

        // Hold the only connection.
        let pool = manager.pool().unwrap();
        let held = pool.acquire().await.unwrap();

        let err = manager.health_check().await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(_)), "got {err:?}");
        assert_eq!(err.domain(), "db");
        assert_eq!(err.http_status(), 500);

        drop(held);
        manager.health_check().await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_times_out_with_checked_out_connection() {
        let config = memory_config().db_timeout(Duration::from_millis(50));
        let manager = ConnectionManager::new(config).unwrap();
        manager.init().await.unwrap();

        let pool = manager.pool().unwrap();
        let held = pool.acquire().await.unwrap();

        let started = Instant::now();
        let err = manager.shutdown().await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(_)), "got {err:?}");
        assert!(started.elapsed() >= Duration::from_millis(50));
        // The pool was taken out before closing, so the manager is reset.
        assert!(!manager.is_ready());
        drop(held);
    }

    #[tokio::test]
    async fn test_reinit_after_shutdown() {
        let manager = ConnectionManager::new(memory_config()).unwrap();
        manager.init().await.unwrap();
        manager.shutdown().await.unwrap();
        manager.init().await.unwrap();
        manager.health_check().await.unwrap();
    }
}
