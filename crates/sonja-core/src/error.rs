use thiserror::Error;

#[derive(Debug, Error)]
pub enum SonjaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown {what}: {value}")]
    Unknown { what: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, SonjaError>;
