//! Error domain constants.
//!
//! Every typed error in the workspace reports one of these as its domain so
//! logs and HTTP mapping classify failures consistently.

/// Relational store / connection lifecycle error.
pub const ERROR_DB: &str = "db";
/// Outbound catalog service error.
pub const ERROR_CATALOG: &str = "catalog";
/// Configuration error.
pub const ERROR_CONFIG: &str = "config";
/// Request validation error (bad parameters, not credential outcomes).
pub const ERROR_VALIDATION: &str = "validation";
/// I/O error.
pub const ERROR_IO: &str = "io";
