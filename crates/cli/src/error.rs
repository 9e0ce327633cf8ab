use bms_api::DateError;
use thiserror::Error;

/// Everything that ends a CLI invocation with `Error: …` and exit code 1.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with an error envelope.
    #[error("{message}")]
    Server { status_code: u16, message: String },

    #[error(transparent)]
    InvalidDate(#[from] DateError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response (HTTP {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    #[error("failed to load settings: {0:#}")]
    Settings(anyhow::Error),

    #[error("failed to render response: {0}")]
    Render(#[from] serde_json::Error),
}
