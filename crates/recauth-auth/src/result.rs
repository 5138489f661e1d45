//! Validation outcome types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome code of a validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    Success,
    MissingCredentials,
    InvalidCredentials,
    InvalidRecordName,
    InternalError,
}

impl ValidationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCode::Success => "SUCCESS",
            ValidationCode::MissingCredentials => "MISSING_CREDENTIALS",
            ValidationCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ValidationCode::InvalidRecordName => "INVALID_RECORD_NAME",
            ValidationCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// HTTP status a response carrying this code is sent with.
    pub fn http_status(&self) -> u16 {
        match self {
            ValidationCode::Success => 200,
            ValidationCode::MissingCredentials | ValidationCode::InvalidRecordName => 400,
            ValidationCode::InvalidCredentials => 401,
            ValidationCode::InternalError => 500,
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a validation. `is_valid` holds exactly when `code` is `SUCCESS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
    pub code: ValidationCode,
}

impl ValidationResult {
    #[inline]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            message: message.into(),
            code: ValidationCode::Success,
        }
    }

    #[inline]
    pub fn failure(code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
            code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(ValidationResult::failure(
            ValidationCode::InvalidRecordName,
            "Record name is not recognized",
        ))
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "isValid": false,
                "message": "Record name is not recognized",
                "code": "INVALID_RECORD_NAME",
            })
        );
    }

    #[test]
    fn test_code_text_matches_serde() {
        for code in [
            ValidationCode::Success,
            ValidationCode::MissingCredentials,
            ValidationCode::InvalidCredentials,
            ValidationCode::InvalidRecordName,
            ValidationCode::InternalError,
        ] {
            assert_eq!(
                serde_json::to_value(code).unwrap(),
                serde_json::Value::String(code.as_str().to_string())
            );
        }
    }
}
