//! Store error types.

use std::time::Duration;

use recauth_core::ERROR_DB;

/// Store / connection-lifecycle error.
///
/// Never retryable at this layer: a failed `init` aborts boot, and request
/// paths map everything except [`StoreError::Conflict`] to a 500.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `pool()` called before `init()` or after `shutdown()`.
    #[error("database not initialized")]
    NotInitialized,

    /// All startup connection attempts failed.
    #[error("failed to connect after {attempts} attempt(s): {reason}")]
    ConnectFailed { attempts: u32, reason: String },

    /// A bounded operation (health check, shutdown) ran out of time.
    #[error("database operation timed out after {0:?}")]
    Timeout(Duration),

    /// Unique constraint on `record_name` rejected an insert.
    #[error("record '{0}' already exists")]
    Conflict(String),

    #[error("unsupported database URL scheme")]
    UnsupportedUrl,

    /// A stored value could not be interpreted.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("sql: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    /// Error domain, see [`recauth_core::errors`].
    #[inline]
    pub fn domain(&self) -> &'static str {
        ERROR_DB
    }

    /// HTTP-equivalent status.
    pub fn http_status(&self) -> u16 {
        match self {
            StoreError::Conflict(_) => 409,
            _ => 500,
        }
    }

    #[inline]
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Map an insert failure, turning unique violations into [`StoreError::Conflict`].
    pub(crate) fn from_insert(err: sqlx::Error, record_name: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(record_name.to_string())
            }
            _ => StoreError::Sqlx(err),
        }
    }
}
