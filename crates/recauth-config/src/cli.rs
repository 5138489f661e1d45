//! CLI override definitions and application logic.

use clap::Parser;

use crate::Config;
use crate::loader::ConfigError;
use crate::types::UserEntry;

#[derive(Debug, Clone, Parser, Default)]
pub struct CliOverrides {
    /// Override HTTP listen address, e.g. 0.0.0.0:8080
    #[arg(long)]
    pub listen: Option<String>,
    /// Override database connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
    /// Override startup connection attempts
    #[arg(long)]
    pub max_connect_retries: Option<u32>,
    /// Override delay between connection attempts (ms)
    #[arg(long)]
    pub retry_delay_ms: Option<u64>,
    /// Replace the user roster with a JSON list of {"username","password"} objects
    #[arg(long, env = "RECAUTH_USERS", hide_env_values = true)]
    pub users: Option<String>,
    /// Override known record names (repeatable or comma-separated)
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub known_record: Option<Vec<String>>,
    /// Override catalog base URL
    #[arg(long, env = "RECAUTH_CATALOG_URL")]
    pub catalog_url: Option<String>,
    /// Override maximum accepted maxRecords
    #[arg(long)]
    pub max_records_ceiling: Option<u64>,
    /// Override log level (trace/debug/info/warn/error)
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<(), ConfigError> {
    if let Some(v) = &overrides.listen {
        config.server.listen = v.clone();
    }
    if let Some(v) = &overrides.database_url {
        config.database.url = Some(v.clone());
    }
    if let Some(v) = overrides.max_connect_retries {
        config.database.max_connect_retries = v;
    }
    if let Some(v) = overrides.retry_delay_ms {
        config.database.retry_delay_ms = v;
    }
    if let Some(json) = &overrides.users {
        let users: Vec<UserEntry> = serde_json::from_str(json)?;
        config.auth.users = users;
    }
    if let Some(v) = &overrides.known_record {
        config.records.known = v.clone();
    }
    if let Some(v) = &overrides.catalog_url {
        config.catalog.url = Some(v.clone());
    }
    if let Some(v) = overrides.max_records_ceiling {
        config.pagination.max_records_ceiling = v;
    }
    if let Some(v) = &overrides.log_level {
        config.logging.level = Some(v.clone());
    }
    Ok(())
}
