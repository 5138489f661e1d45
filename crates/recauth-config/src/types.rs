//! Configuration type definitions for server, database, auth, records, catalog,
//! pagination and logging.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::defaults::*;
use crate::loader::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub records: RecordsConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen address, e.g. `0.0.0.0:8080`.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Time allowed for in-flight requests after a shutdown signal.
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
        }
    }
}

/// Relational store connection settings.
///
/// Either `url` is given verbatim (postgres or sqlite), or the PostgreSQL URL
/// is assembled from `host`/`port`/`username`/`password`/`database` and the
/// optional TLS settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_db_port")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    /// PostgreSQL `sslmode` (disable, prefer, require, verify-ca, verify-full).
    #[serde(default)]
    pub ssl_mode: Option<String>,
    /// CA certificate path.
    #[serde(default)]
    pub ssl_root_cert: Option<String>,
    /// Client certificate path.
    #[serde(default)]
    pub ssl_cert: Option<String>,
    /// Client key path.
    #[serde(default)]
    pub ssl_key: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection attempts made at startup before giving up.
    #[serde(default = "default_max_connect_retries")]
    pub max_connect_retries: u32,
    /// Delay between connection attempts (ms).
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Bound for health checks, pool acquire and shutdown (ms).
    #[serde(default = "default_db_timeout_ms")]
    pub db_timeout_ms: u64,
    /// Create tables on startup when missing.
    #[serde(default = "default_init_schema")]
    pub init_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: None,
            port: default_db_port(),
            username: None,
            password: None,
            database: None,
            ssl_mode: None,
            ssl_root_cert: None,
            ssl_cert: None,
            ssl_key: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            max_connect_retries: default_max_connect_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            db_timeout_ms: default_db_timeout_ms(),
            init_schema: default_init_schema(),
        }
    }
}

impl DatabaseConfig {
    /// Config pointing at an explicit connection URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    #[inline]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    #[inline]
    pub fn db_timeout(&self) -> Duration {
        Duration::from_millis(self.db_timeout_ms)
    }

    /// Resolve the connection URL handed to the SQL driver.
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = self.url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Ok(url.to_string());
        }

        let host = self
            .host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| ConfigError::Validation("database.url or database.host is required".into()))?;

        let invalid = |e: String| ConfigError::Validation(format!("database: {e}"));
        let mut url =
            Url::parse(&format!("postgres://{host}")).map_err(|e| invalid(e.to_string()))?;
        url.set_port(Some(self.port))
            .map_err(|_| invalid("invalid port".into()))?;
        if let Some(user) = &self.username {
            url.set_username(user)
                .map_err(|_| invalid("invalid username".into()))?;
        }
        if let Some(password) = &self.password {
            url.set_password(Some(password))
                .map_err(|_| invalid("invalid password".into()))?;
        }
        if let Some(db) = &self.database {
            url.set_path(db);
        }
        {
            let mut query = url.query_pairs_mut();
            if let Some(mode) = &self.ssl_mode {
                query.append_pair("sslmode", mode);
            }
            if let Some(ca) = &self.ssl_root_cert {
                query.append_pair("sslrootcert", ca);
            }
            if let Some(cert) = &self.ssl_cert {
                query.append_pair("sslcert", cert);
            }
            if let Some(key) = &self.ssl_key {
                query.append_pair("sslkey", key);
            }
        }
        let mut out = url.to_string();
        // query_pairs_mut leaves a bare '?' when nothing was appended
        if out.ends_with('?') {
            out.pop();
        }
        Ok(out)
    }
}

// Don't leak credentials into logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .field("max_connect_retries", &self.max_connect_retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("db_timeout_ms", &self.db_timeout_ms)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// User roster.
    /// ```toml
    /// [[auth.users]]
    /// username = "alice"
    /// password = "secret1"
    ///
    /// [[auth.users]]
    /// username = "bob"
    /// password_hash = "<sha224 hex>"
    /// ```
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

/// One roster entry. Exactly one of `password` / `password_hash` is set.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserEntry {
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
    /// Lowercase SHA-224 hex digest of the password.
    #[serde(default)]
    pub password_hash: Option<String>,
}

impl UserEntry {
    /// Entry with a plaintext password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Some(password.into()),
            password_hash: None,
        }
    }
}

impl fmt::Debug for UserEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEntry")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Statically known record names, used when no catalog is configured.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RecordsConfig {
    #[serde(default)]
    pub known: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog base URL. When unset, `records.known` is used instead.
    #[serde(default)]
    pub url: Option<String>,
    /// Bearer token sent to the catalog.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_catalog_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout_ms: default_catalog_timeout_ms(),
        }
    }
}

impl CatalogConfig {
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the request has no `maxRecords`.
    #[serde(default = "default_max_records")]
    pub default_max_records: u64,
    /// Largest accepted `maxRecords`.
    #[serde(default = "default_max_records_ceiling")]
    pub max_records_ceiling: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_max_records: default_max_records(),
            max_records_ceiling: default_max_records_ceiling(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: Option<String>,
    /// Log format: json, pretty, or compact. Default: pretty.
    pub format: Option<String>,
    /// Output target: stdout or stderr. Default: stderr.
    pub output: Option<String>,
    /// Per-module log level filters (e.g., {"recauth_store": "debug", "sqlx": "warn"}).
    #[serde(default)]
    pub filters: HashMap<String, String>,
}
