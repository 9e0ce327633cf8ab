use bms_api::ApiResponse;
use serde_json::Value;

use crate::dispatch::Render;
use crate::error::ClientError;

/// Text printed for a decoded envelope. Error envelopes become `ClientError::Server`.
pub fn render(response: ApiResponse<Value>, rule: Render) -> Result<String, ClientError> {
    let data = match response {
        ApiResponse::Error {
            status_code,
            message,
        } => {
            return Err(ClientError::Server {
                status_code,
                message,
            })
        }
        ApiResponse::Success { data, .. } => data.unwrap_or(Value::Null),
    };

    let mut lines = Vec::new();
    if rule.json {
        lines.push(serde_json::to_string_pretty(&data)?);
    }
    if let Some(success) = rule.success {
        lines.push(success.to_string());
    }

    Ok(lines.join("\n"))
}
