//! # recauth-rs
//!
//! Record authorization service: credential validation, extractable records
//! and their audit trail.
//!
//! ## Crates
//!
//! - [`recauth_core`] - Default values and error domains
//! - [`recauth_config`] - Configuration loading and validation
//! - [`recauth_store`] - Connection lifecycle, records and audit log
//! - [`recauth_auth`] - Roster, validations and record lookups
//! - [`recauth_server`] - HTTP API and server CLI

pub use recauth_auth as auth;
pub use recauth_config as config;
pub use recauth_core as core;
pub use recauth_server as server;
pub use recauth_store as store;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use recauth_auth::{
        RecordLookup, StaticRecords, UserRoster, ValidationCode, ValidationResult,
        ValidationsManager,
    };
    pub use recauth_config::{Config, load_config};
    pub use recauth_store::{AuditManager, ConnectionManager, PageRequest, RecordsManager};
}
