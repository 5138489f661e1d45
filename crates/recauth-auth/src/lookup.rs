//! Record eligibility lookup.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AuthError;

/// Answers whether a record name is known and may be authorized.
///
/// Implementations must be thread-safe (`Send + Sync`) as they are shared by
/// all request handlers.
#[async_trait]
pub trait RecordLookup: Send + Sync {
    /// `Ok(false)` means the name is not recognized; `Err` means no answer
    /// could be obtained.
    async fn record_exists(&self, record_name: &str) -> Result<bool, AuthError>;
}

/// Blanket implementation for `Arc<L>` where `L: RecordLookup`.
#[async_trait]
impl<L: RecordLookup + ?Sized> RecordLookup for Arc<L> {
    #[inline]
    async fn record_exists(&self, record_name: &str) -> Result<bool, AuthError> {
        (**self).record_exists(record_name).await
    }
}

/// Blanket implementation for `Box<L>` where `L: RecordLookup`.
#[async_trait]
impl<L: RecordLookup + ?Sized> RecordLookup for Box<L> {
    #[inline]
    async fn record_exists(&self, record_name: &str) -> Result<bool, AuthError> {
        (**self).record_exists(record_name).await
    }
}

/// Fixed set of known record names.
#[derive(Debug, Clone, Default)]
pub struct StaticRecords {
    names: HashSet<String>,
}

impl StaticRecords {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[async_trait]
impl RecordLookup for StaticRecords {
    async fn record_exists(&self, record_name: &str) -> Result<bool, AuthError> {
        Ok(self.names.contains(record_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_records() {
        let lookup: Arc<dyn RecordLookup> = Arc::new(StaticRecords::new(["a", "b"]));
        assert!(lookup.record_exists("a").await.unwrap());
        assert!(!lookup.record_exists("c").await.unwrap());
        assert!(!lookup.record_exists("A").await.unwrap());
    }
}
