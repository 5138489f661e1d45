//! Validation error types.

use recauth_core::ERROR_CATALOG;

/// Failure to reach a validation outcome.
///
/// Negative outcomes (bad password, unknown record) are
/// [`ValidationResult`](crate::ValidationResult) values, not errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The catalog could not answer (transport, status or body failure).
    #[error("catalog error: {0}")]
    Catalog(String),
}

impl AuthError {
    /// Create a catalog error from any error type.
    #[inline]
    pub fn catalog<E: std::fmt::Display>(err: E) -> Self {
        Self::Catalog(err.to_string())
    }

    #[inline]
    pub fn domain(&self) -> &'static str {
        ERROR_CATALOG
    }

    #[inline]
    pub fn http_status(&self) -> u16 {
        500
    }

    /// Catalog failures are transient from the caller's point of view.
    #[inline]
    pub fn is_retryable(&self) -> bool {
        true
    }
}
