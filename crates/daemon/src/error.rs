use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Startup-level failures. Anything that happens after the scheduler is
/// running is handled inside the cycle and logged instead of bubbling
/// up here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] dispatch::DispatchError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
