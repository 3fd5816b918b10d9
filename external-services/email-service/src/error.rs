use error_common::{codes, CategorizedError, ErrorCategory};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl CategorizedError for EmailError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::External
    }

    fn code(&self) -> &'static str {
        codes::external::NOTIFICATION_FAILED
    }
}

pub type EmailResult<T> = Result<T, EmailError>;
