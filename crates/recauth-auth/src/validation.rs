//! User and record-permission validation.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::error::AuthError;
use crate::lookup::RecordLookup;
use crate::result::{ValidationCode, ValidationResult};
use crate::roster::UserRoster;

const MSG_MISSING_CREDENTIALS: &str = "username and password are required";
const MSG_INVALID_CREDENTIALS: &str = "Invalid username or password";
const MSG_USER_VALID: &str = "User credentials are valid";
const MSG_MISSING_RECORD_NAME: &str = "recordName is required";
const MSG_UNKNOWN_RECORD: &str = "Record name is not recognized";
const MSG_CAN_CREATE: &str = "Record can be created";
const MSG_CAN_DELETE: &str = "Record can be deleted";

/// Username and password as submitted. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserCredentials {
    pub username: String,
    pub password: String,
}

/// Credentials plus the record they want to act on.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordRequest {
    pub username: String,
    pub password: String,
    pub record_name: String,
}

/// A validation to run.
#[derive(Debug, Clone)]
pub enum ValidationRequest {
    User(UserCredentials),
    Create(RecordRequest),
    Delete(RecordRequest),
}

/// Decides whether a user may act and whether a record may be created or
/// deleted.
///
/// Never consults the audit log.
#[derive(Clone)]
pub struct ValidationsManager {
    roster: UserRoster,
    lookup: Arc<dyn RecordLookup>,
}

impl ValidationsManager {
    pub fn new(roster: UserRoster, lookup: Arc<dyn RecordLookup>) -> Self {
        Self { roster, lookup }
    }

    /// Run a tagged validation request.
    pub async fn validate(&self, request: &ValidationRequest) -> Result<ValidationResult, AuthError> {
        match request {
            ValidationRequest::User(c) => Ok(self.validate_user(&c.username, &c.password).await),
            ValidationRequest::Create(r) => {
                self.validate_create(&r.username, &r.password, &r.record_name)
                    .await
            }
            ValidationRequest::Delete(r) => {
                self.validate_delete(&r.username, &r.password, &r.record_name)
                    .await
            }
        }
    }

    /// Check credentials against the roster. Always produces a result.
    pub async fn validate_user(&self, username: &str, password: &str) -> ValidationResult {
        if username.is_empty() || password.is_empty() {
            return ValidationResult::failure(
                ValidationCode::MissingCredentials,
                MSG_MISSING_CREDENTIALS,
            );
        }

        // Unknown user and wrong password are indistinguishable to the caller.
        if !self.roster.verify(username, password) {
            debug!(username, "credential check failed");
            return ValidationResult::failure(
                ValidationCode::InvalidCredentials,
                MSG_INVALID_CREDENTIALS,
            );
        }

        ValidationResult::success(MSG_USER_VALID)
    }

    /// Whether `username` may create `record_name`.
    pub async fn validate_create(
        &self,
        username: &str,
        password: &str,
        record_name: &str,
    ) -> Result<ValidationResult, AuthError> {
        self.validate_record(username, password, record_name, MSG_CAN_CREATE)
            .await
    }

    /// Whether `username` may delete `record_name`.
    pub async fn validate_delete(
        &self,
        username: &str,
        password: &str,
        record_name: &str,
    ) -> Result<ValidationResult, AuthError> {
        self.validate_record(username, password, record_name, MSG_CAN_DELETE)
            .await
    }

    async fn validate_record(
        &self,
        username: &str,
        password: &str,
        record_name: &str,
        success_message: &str,
    ) -> Result<ValidationResult, AuthError> {
        let user = self.validate_user(username, password).await;
        if !user.is_valid {
            return Ok(user);
        }

        if record_name.is_empty() {
            return Ok(ValidationResult::failure(
                ValidationCode::MissingCredentials,
                MSG_MISSING_RECORD_NAME,
            ));
        }

        if !self.lookup.record_exists(record_name).await? {
            debug!(username, record_name, "record name not recognized");
            return Ok(ValidationResult::failure(
                ValidationCode::InvalidRecordName,
                MSG_UNKNOWN_RECORD,
            ));
        }

        Ok(ValidationResult::success(success_message))
    }
}

impl std::fmt::Debug for ValidationsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationsManager")
            .field("roster", &self.roster)
            .finish_non_exhaustive()
    }
}
