use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from the terminal or config/log files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or event channel errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid configuration value.
    #[error("Config error: {0}")]
    Config(String),

    /// Log subscriber could not be installed.
    #[error("Log error: {0}")]
    Log(String),
}
