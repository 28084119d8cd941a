use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Transmission error: {0}")]
    Transmission(String),
}

pub type Result<T> = std::result::Result<T, DispatchError>;
