use axum::http::StatusCode;
use thiserror::Error;

use super::models::api_error::ApiError;

#[derive(Debug)]
pub enum DefaultApiError {
    NotFound,
}

impl DefaultApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::NotFound => ApiError {
                code: StatusCode::NOT_FOUND,
                message: "Not found.".to_string(),
            },
        }
    }
}

/// Failures that stop the process before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("missing required environment variable: {0}")]
    ConfigurationMissing(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("server error: {0}")]
    Server(String),
}

impl From<envy::Error> for StartupError {
    fn from(e: envy::Error) -> Self {
        match e {
            envy::Error::MissingValue(field) => Self::ConfigurationMissing(field.to_uppercase()),
            other => Self::InvalidConfiguration(other.to_string()),
        }
    }
}
