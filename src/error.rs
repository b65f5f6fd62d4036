use thiserror::Error;

/// Failures surfaced to the host as `Error: <message>` envelopes.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response data must be an object")]
    MalformedData,

    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("argument {0} must be a string")]
    InvalidArgument(&'static str),
}

pub type Result<T> = std::result::Result<T, ToolError>;
