//! Commission Error Types
//!
//! Commission-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Commission-specific result type alias
pub type CommissionResult<T> = Result<T, CommissionError>;

#[derive(Debug, Error)]
pub enum CommissionError {
    #[error("Supplier not found")]
    SupplierNotFound,

    #[error("A supplier with this name already exists")]
    SupplierNameTaken,

    #[error("Supplier column mapping not found")]
    ColumnMappingNotFound,

    #[error("This supplier already has a column mapping")]
    SupplierAlreadyMapped,

    /// `app_user` does not reference an existing user
    #[error("App user not found")]
    AppUserNotFound,

    #[error("User commission codes not found")]
    UserCodesNotFound,

    #[error("This user already has commission codes")]
    UserAlreadyMapped,

    /// Code already attached to another user
    #[error("Code {0} is already assigned to another user")]
    CodeTaken(String),

    #[error("Commission not found")]
    CommissionNotFound,

    #[error("Commission import not found")]
    ImportNotFound,

    /// Supplier line amounts whose total does not fit in a decimal
    #[error("Supplier amounts are too large to total")]
    TotalOverflow,

    /// Input rejected by validation (already a client-facing error)
    #[error("{0}")]
    Rejected(AppError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommissionError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommissionError::SupplierNotFound
            | CommissionError::ColumnMappingNotFound
            | CommissionError::AppUserNotFound
            | CommissionError::UserCodesNotFound
            | CommissionError::CommissionNotFound
            | CommissionError::ImportNotFound => ErrorKind::NotFound,
            CommissionError::SupplierNameTaken
            | CommissionError::SupplierAlreadyMapped
            | CommissionError::UserAlreadyMapped
            | CommissionError::CodeTaken(_) => ErrorKind::Conflict,
            CommissionError::TotalOverflow => ErrorKind::BadRequest,
            CommissionError::Rejected(err) => err.kind(),
            CommissionError::Database(_) | CommissionError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CommissionError::Database(e) => {
                tracing::error!(error = %e, "Commission database error");
            }
            CommissionError::Internal(msg) => {
                tracing::error!(message = %msg, "Commission internal error");
            }
            CommissionError::CodeTaken(code) => {
                tracing::warn!(code = %code, "Commission code already assigned");
            }
            _ => {
                tracing::debug!(error = %self, "Commission error");
            }
        }
    }
}

impl From<CommissionError> for AppError {
    fn from(err: CommissionError) -> Self {
        match err {
            CommissionError::Rejected(app_err) => app_err,
            CommissionError::Database(e) => AppError::internal("Database error").with_source(e),
            CommissionError::Internal(_) => AppError::internal("Internal server error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl From<AppError> for CommissionError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            CommissionError::Internal(err.to_string())
        } else {
            CommissionError::Rejected(err)
        }
    }
}

impl IntoResponse for CommissionError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
