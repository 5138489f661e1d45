//! Default value functions for serde deserialization.
//!
//! These functions forward to constants defined in `recauth_core::defaults`.

use recauth_core::defaults;

/// Generate default value functions that forward to recauth_core::defaults constants.
macro_rules! default_fns {
    // For Copy types (integers, bool, etc.)
    ($($fn_name:ident => $const_name:ident : $ty:ty),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> $ty {
                defaults::$const_name
            }
        )*
    };
}

/// Generate default value functions that return String from &str constants.
macro_rules! default_string_fns {
    ($($fn_name:ident => $const_name:ident),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> String {
                defaults::$const_name.to_string()
            }
        )*
    };
}

default_fns! {
    default_shutdown_timeout_secs => DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64,
    default_db_port               => DEFAULT_DB_PORT: u16,
    default_max_connections       => DEFAULT_DB_MAX_CONNECTIONS: u32,
    default_min_connections       => DEFAULT_DB_MIN_CONNECTIONS: u32,
    default_max_connect_retries   => DEFAULT_MAX_CONNECT_RETRIES: u32,
    default_retry_delay_ms        => DEFAULT_RETRY_DELAY_MS: u64,
    default_db_timeout_ms         => DEFAULT_DB_TIMEOUT_MS: u64,
    default_init_schema           => DEFAULT_INIT_SCHEMA: bool,
    default_max_records           => DEFAULT_MAX_RECORDS: u64,
    default_max_records_ceiling   => DEFAULT_MAX_RECORDS_CEILING: u64,
    default_catalog_timeout_ms    => DEFAULT_CATALOG_TIMEOUT_MS: u64,
}

default_string_fns! {
    default_listen => DEFAULT_LISTEN,
}
