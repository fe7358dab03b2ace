use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Request to {url} timed out")]
    TimeoutError { url: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected response shape: {message}")]
    UnexpectedShapeError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ProxyError {
    /// Maps a reqwest failure for `url`, keeping timeouts distinct from other transport faults.
    pub fn from_request(err: reqwest::Error, url: &str) -> Self {
        if err.is_timeout() {
            ProxyError::TimeoutError {
                url: url.to_string(),
            }
        } else {
            ProxyError::ApiError(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
