//! Catalog service client.
//!
//! The catalog is the system of record for which record names exist. The
//! contract is a single endpoint:
//!
//! ```text
//! GET {base_url}/records?recordName=<name>
//! Authorization: Bearer <token>      (optional)
//!
//! 200 {"results": [ ... ]}           non-empty means the record exists
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::AuthError;
use crate::lookup::RecordLookup;

/// HTTP client for the catalog service.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    records_url: String,
    token: Option<String>,
}

impl CatalogClient {
    /// Create a client whose every call is bounded by `timeout`.
    ///
    /// `base_url` is the catalog root (e.g. `https://catalog.internal/api`).
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AuthError::catalog)?;
        Ok(Self::with_client(client, base_url, token))
    }

    /// Create with a custom reqwest [`Client`].
    pub fn with_client(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        let base = base_url.into();
        let base = base.trim_end_matches('/');
        Self {
            client,
            records_url: format!("{base}/records"),
            token,
        }
    }

    /// Ask the catalog whether `record_name` exists.
    pub async fn find_record(&self, record_name: &str) -> Result<bool, AuthError> {
        let mut req = self
            .client
            .get(&self.records_url)
            .query(&[("recordName", record_name)]);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|e| {
            warn!(record_name, error = %e, "catalog request failed");
            AuthError::catalog(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(record_name, status = status.as_u16(), "catalog returned error status");
            return Err(AuthError::Catalog(format!("HTTP {}", status.as_u16())));
        }

        let body: wire::SearchResponse = resp.json().await.map_err(AuthError::catalog)?;
        let found = !body.results.is_empty();
        debug!(record_name, found, "catalog lookup");
        Ok(found)
    }
}

#[async_trait]
impl RecordLookup for CatalogClient {
    async fn record_exists(&self, record_name: &str) -> Result<bool, AuthError> {
        self.find_record(record_name).await
    }
}

mod wire {
    use super::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        pub results: Vec<serde_json::Value>,
    }
}
