//! Shared handler state.

use std::sync::Arc;

use recauth_auth::ValidationsManager;
use recauth_config::PaginationConfig;
use recauth_store::{AuditManager, ConnectionManager, RecordsManager};

/// Everything a request handler needs. Cheap to clone.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Arc<ConnectionManager>,
    pub validations: Arc<ValidationsManager>,
    pub records: RecordsManager,
    pub audit: AuditManager,
    pub pagination: PaginationConfig,
}

impl AppState {
    pub fn new(
        db: Arc<ConnectionManager>,
        validations: ValidationsManager,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            records: RecordsManager::new(db.clone()),
            audit: AuditManager::new(db.clone()),
            validations: Arc::new(validations),
            db,
            pagination,
        }
    }
}
