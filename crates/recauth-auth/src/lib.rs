//! Credential and record-permission validation.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use recauth_auth::{StaticRecords, UserRoster, ValidationCode, ValidationsManager};
//!
//! # async fn example() -> Result<(), recauth_auth::AuthError> {
//! let roster = UserRoster::from_pairs([("alice", "pw1")]);
//! let lookup = Arc::new(StaticRecords::new(["quarterly"]));
//! let validations = ValidationsManager::new(roster, lookup);
//!
//! let result = validations.validate_create("alice", "pw1", "quarterly").await?;
//! assert_eq!(result.code, ValidationCode::Success);
//! # Ok(())
//! # }
//! ```

mod catalog;
mod error;
mod hash;
mod lookup;
mod result;
mod roster;
mod validation;

pub use catalog::CatalogClient;
pub use error::AuthError;
pub use hash::{sha224_hex, verify_password};
pub use lookup::{RecordLookup, StaticRecords};
pub use result::{ValidationCode, ValidationResult};
pub use roster::UserRoster;
pub use validation::{RecordRequest, UserCredentials, ValidationRequest, ValidationsManager};
