use bms_api::ApiResponse;
use serde_json::Value;

use crate::dispatch::Plan;
use crate::error::ClientError;

/// Longest slice of a non-envelope body quoted back to the user.
const BODY_PREVIEW: usize = 200;

/// Thin reqwest wrapper that speaks the envelope protocol.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Send the planned request and decode the envelope, whatever its HTTP status.
    pub async fn execute(&self, plan: &Plan) -> Result<ApiResponse<Value>, ClientError> {
        let url = format!("{}{}", self.base_url, plan.path);
        tracing::debug!(method = %plan.method, url = %url, "sending request");

        let mut request = self.http.request(plan.method.clone(), &url);
        if !plan.query.is_empty() {
            request = request.query(&plan.query);
        }
        if let Some(book) = &plan.body {
            request = request.json(book);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "response received");

        serde_json::from_str(&body).map_err(|_| ClientError::UnexpectedResponse {
            status: status.as_u16(),
            body: body.chars().take(BODY_PREVIEW).collect(),
        })
    }
}
