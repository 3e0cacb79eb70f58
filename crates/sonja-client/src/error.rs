use thiserror::Error;

/// Errors surfaced by the backend client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Backend unreachable: {0}")]
    Unreachable(String),
}

impl ApiError {
    /// True when the backend itself could not be reached at all, as opposed
    /// to an error it answered with.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::Unreachable(_))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
