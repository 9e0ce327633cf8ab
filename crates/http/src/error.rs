//! Error handling for the BMS HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bms_api::{ApiResponse, DateError};
use bms_db::{ClauseError, DbError};
use thiserror::Error;
use uuid::Uuid;

/// Application error types that map to error envelopes
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("conflict: {message}")]
    Conflict { message: String },

    #[error("storage error: {0}")]
    Storage(#[source] DbError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client.
    fn public_message(&self) -> String {
        match self {
            AppError::Validation { message }
            | AppError::NotFound { message }
            | AppError::Conflict { message } => message.clone(),
            // Internal details stay in the logs of release builds.
            _ if cfg!(not(debug_assertions)) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(_) => AppError::conflict("Entry already exists"),
            DbError::ForeignKeyViolation(_) => {
                AppError::not_found("Referenced book or collection does not exist")
            }
            other => AppError::Storage(other),
        }
    }
}

impl From<ClauseError> for AppError {
    fn from(err: ClauseError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<DateError> for AppError {
    fn from(err: DateError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                error = %self,
                "request failed"
            );
        } else {
            tracing::warn!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                error = %self,
                "request rejected"
            );
        }

        let body = ApiResponse::<()>::error(status.as_u16(), self.public_message());
        (status, Json(body)).into_response()
    }
}
