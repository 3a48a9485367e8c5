//! Errors raised by the remote API client and the upload bridge.

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to get upload signature: {0}")]
    Sign(String),

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("no URL returned by the media host")]
    MissingUrl,
}

impl ApiError {
    /// Whether the server rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. })
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
