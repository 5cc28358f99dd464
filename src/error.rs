//! Error types for the BookNest client

use thiserror::Error;

/// Error families as presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caught before any request is sent
    Validation,
    /// The server answered but refused the operation
    Application,
    /// The server rejected the session (HTTP 401)
    Authentication,
    /// Transport failure or unreadable response
    Network,
    /// Local failure (storage, configuration)
    Local,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned invalid JSON data")]
    InvalidJson(#[source] serde_json::Error),

    #[error("{0}")]
    Application(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Validation(_) => ErrorCategory::Validation,
            AppError::Application(_) => ErrorCategory::Application,
            AppError::Authentication(_) => ErrorCategory::Authentication,
            AppError::Network(_) | AppError::InvalidJson(_) => ErrorCategory::Network,
            AppError::Storage(_)
            | AppError::Config(_)
            | AppError::InvalidUrl(_)
            | AppError::Internal(_) => ErrorCategory::Local,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the first failing field's message, like an inline form hint
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        AppError::Validation(message)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
