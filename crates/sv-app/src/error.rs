//! Error types for the sv-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for sv-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<sv_core::SvError> for AppError {
    fn from(err: sv_core::SvError) -> Self {
        AppError::Data(err.to_string())
    }
}

impl From<sv_io::IoError> for AppError {
    fn from(err: sv_io::IoError) -> Self {
        AppError::Input(err.to_string())
    }
}

impl From<sv_render::RenderError> for AppError {
    fn from(err: sv_render::RenderError) -> Self {
        AppError::Render(err.to_string())
    }
}
