//! Successful envelopes as axum responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bms_api::ApiResponse;
use serde::Serialize;

use crate::error::AppError;

/// Result type returned by every module handler.
pub type ApiResult<T> = Result<Reply<T>, AppError>;

/// An envelope whose HTTP status mirrors its `status_code`.
#[derive(Debug)]
pub struct Reply<T>(pub ApiResponse<T>);

impl<T> Reply<T> {
    /// `200 OK` carrying `data`.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self(ApiResponse::success(StatusCode::OK.as_u16(), data, message))
    }

    pub fn into_inner(self) -> ApiResponse<T> {
        self.0
    }
}

impl Reply<()> {
    /// `201 Created` with a message only.
    pub fn created(message: impl Into<String>) -> Self {
        Self(ApiResponse::done(StatusCode::CREATED.as_u16(), message))
    }

    /// `200 OK` with a message only.
    pub fn done(message: impl Into<String>) -> Self {
        Self(ApiResponse::done(StatusCode::OK.as_u16(), message))
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_reply_uses_201() {
        let response = Reply::created("Book created successfully").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn ok_reply_keeps_payload() {
        let reply = Reply::ok(vec!["scifi".to_string()], "Collections retrieved successfully");
        assert_eq!(reply.0.status_code(), 200);
        assert_eq!(reply.into_inner().data(), Some(&vec!["scifi".to_string()]));
    }
}
