//! Configuration validation logic.

use std::collections::HashSet;

use crate::Config;
use crate::loader::ConfigError;

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.listen.trim().is_empty() {
        return Err(ConfigError::Validation("server.listen is empty".into()));
    }
    // Surfaces a missing url/host early instead of at connect time.
    config.database.connection_url()?;
    if config.database.max_connect_retries == 0 {
        return Err(ConfigError::Validation(
            "database.max_connect_retries must be > 0".into(),
        ));
    }
    if config.database.max_connections == 0 {
        return Err(ConfigError::Validation(
            "database.max_connections must be > 0".into(),
        ));
    }
    if config.database.min_connections > config.database.max_connections {
        return Err(ConfigError::Validation(
            "database.min_connections cannot exceed max_connections".into(),
        ));
    }
    if config.database.db_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "database.db_timeout_ms must be > 0".into(),
        ));
    }
    if config.pagination.max_records_ceiling == 0 {
        return Err(ConfigError::Validation(
            "pagination.max_records_ceiling must be > 0".into(),
        ));
    }
    if config.pagination.default_max_records == 0
        || config.pagination.default_max_records > config.pagination.max_records_ceiling
    {
        return Err(ConfigError::Validation(
            "pagination.default_max_records must be 1..=max_records_ceiling".into(),
        ));
    }
    if config.auth.users.is_empty() {
        return Err(ConfigError::Validation("auth.users is empty".into()));
    }
    let mut seen = HashSet::new();
    for user in &config.auth.users {
        if user.username.is_empty() {
            return Err(ConfigError::Validation(
                "auth.users: username is empty".into(),
            ));
        }
        if !seen.insert(user.username.as_str()) {
            return Err(ConfigError::Validation(format!(
                "auth.users: duplicate username '{}'",
                user.username
            )));
        }
        match (&user.password, &user.password_hash) {
            (Some(_), None) => {}
            (None, Some(hash)) => {
                if hash.len() != 56 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(ConfigError::Validation(format!(
                        "auth.users: password_hash for '{}' is not a SHA-224 hex digest",
                        user.username
                    )));
                }
            }
            _ => {
                return Err(ConfigError::Validation(format!(
                    "auth.users: '{}' needs exactly one of password or password_hash",
                    user.username
                )));
            }
        }
    }
    if let Some(url) = &config.catalog.url
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        return Err(ConfigError::Validation(
            "catalog.url must be an http(s) URL".into(),
        ));
    }
    if config.catalog.timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "catalog.timeout_ms must be > 0".into(),
        ));
    }
    if let Some(format) = config.logging.format.as_deref()
        && !["json", "pretty", "compact"].contains(&format)
    {
        return Err(ConfigError::Validation(
            "logging.format must be one of: json, pretty, compact".into(),
        ));
    }
    if let Some(output) = config.logging.output.as_deref()
        && !["stdout", "stderr"].contains(&output)
    {
        return Err(ConfigError::Validation(
            "logging.output must be 'stdout' or 'stderr'".into(),
        ));
    }
    Ok(())
}
