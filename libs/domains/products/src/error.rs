use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "Product not found.";
pub const GENERIC_FAILURE: &str = "Oops... our bad.";

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Product not found: {0}")]
    NotFound(i32),

    /// Client-safe message; details have already been logged
    #[error("Internal error: {0}")]
    Internal(String),

    /// Raw storage fault, only produced by repositories
    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::InvalidInput(msg) => AppError::BadRequest(msg),
            ProductError::NotFound(_) => AppError::NotFound(NOT_FOUND_MESSAGE.to_string()),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
            // Never echo storage text to clients
            ProductError::Database(_) => AppError::InternalServerError(GENERIC_FAILURE.to_string()),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for ProductError {
    fn from(err: sea_orm::DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}
