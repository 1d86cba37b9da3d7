//! Error codes carried in every error response body.
//!
//! Each code has a stable SCREAMING_SNAKE_CASE identifier for clients and an
//! integer for logs and dashboards.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidInput;
//! assert_eq!(code.as_str(), "INVALID_INPUT");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// A required field is missing or out of range
    InvalidInput,
    /// A path parameter could not be parsed
    InvalidPathParameter,
    /// The request body is not valid JSON for the expected shape
    InvalidJson,
    /// A query string value could not be parsed
    InvalidQueryParameter,
    NotFound,
    Unauthorized,
    Forbidden,

    // Server errors (5000-5999)
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Integer code for structured logs and metrics.
    ///
    /// - 1000-1999: client errors
    /// - 5000-5999: server errors
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidInput => 1001,
            Self::InvalidPathParameter => 1002,
            Self::InvalidJson => 1003,
            Self::NotFound => 1004,
            Self::InvalidQueryParameter => 1005,
            Self::Unauthorized => 1006,
            Self::Forbidden => 1007,
            Self::InternalError => 5001,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string_representation() {
        assert_eq!(ErrorCode::InvalidInput.as_str(), "INVALID_INPUT");
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::InternalError.to_string(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_error_code_integer_ranges() {
        assert_eq!(ErrorCode::InvalidInput.code(), 1001);
        assert!((1000..2000).contains(&ErrorCode::Forbidden.code()));
        assert!((5000..6000).contains(&ErrorCode::InternalError.code()));
    }

    #[test]
    fn test_error_code_serde_matches_as_str() {
        for code in [
            ErrorCode::InvalidInput,
            ErrorCode::InvalidPathParameter,
            ErrorCode::InvalidJson,
            ErrorCode::InvalidQueryParameter,
            ErrorCode::NotFound,
            ErrorCode::Unauthorized,
            ErrorCode::Forbidden,
            ErrorCode::InternalError,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
            let back: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(back, code);
        }
    }
}
