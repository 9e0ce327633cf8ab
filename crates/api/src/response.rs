//! The JSON envelope every BMS endpoint answers with.
//!
//! On the wire it is a flat object discriminated by `type`:
//!
//! ```json
//! {"type": "success", "status_code": 200, "message": "...", "data": [...]}
//! {"type": "error", "status_code": 400, "message": "Title cannot be empty"}
//! ```

use serde::{Deserialize, Serialize};

/// Response envelope. `T` is the payload carried by successful responses:
/// `Vec<Book>`, `Vec<String>` or `()` when there is none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ApiResponse<T> {
    Success {
        status_code: u16,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<T>,
    },
    Error {
        status_code: u16,
        message: String,
    },
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload.
    pub fn success(status_code: u16, data: T, message: impl Into<String>) -> Self {
        Self::Success {
            status_code,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Successful response with only a message.
    pub fn done(status_code: u16, message: impl Into<String>) -> Self {
        Self::Success {
            status_code,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self::Error {
            status_code,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success { status_code, .. } | Self::Error { status_code, .. } => *status_code,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message, .. } => message.as_deref(),
            Self::Error { message, .. } => Some(message),
        }
    }

    /// Payload of a successful response.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => data.as_ref(),
            Self::Error { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Book;
    use serde_json::json;

    #[test]
    fn success_envelope_shape() {
        let response = ApiResponse::success(200, vec![Book::titled("Dune")], "Books retrieved successfully");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["type"], "success");
        assert_eq!(value["status_code"], 200);
        assert_eq!(value["message"], "Books retrieved successfully");
        assert_eq!(value["data"][0]["title"], "Dune");
    }

    #[test]
    fn absent_payload_is_omitted() {
        let response = ApiResponse::<()>::done(201, "Book created successfully");
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("data").is_none());
    }

    #[test]
    fn error_envelope_decodes_with_null_data() {
        let raw = json!({
            "type": "error",
            "status_code": 400,
            "message": "Title cannot be empty",
            "data": null
        });
        let response: ApiResponse<serde_json::Value> = serde_json::from_value(raw).unwrap();

        assert!(response.is_error());
        assert_eq!(response.status_code(), 400);
        assert_eq!(response.message(), Some("Title cannot be empty"));
        assert!(response.data().is_none());
    }

    #[test]
    fn success_without_message_decodes() {
        let raw = json!({ "type": "success", "status_code": 200, "data": ["scifi"] });
        let response: ApiResponse<Vec<String>> = serde_json::from_value(raw).unwrap();
        assert_eq!(response.data(), Some(&vec!["scifi".to_string()]));
        assert_eq!(response.message(), None);
    }
}
