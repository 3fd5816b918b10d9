use entity_store::StoreError;
use error_common::{codes, CategorizedError, ErrorCategory};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BillingError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl CategorizedError for BillingError {
    fn category(&self) -> ErrorCategory {
        match self {
            BillingError::Validation(_) => ErrorCategory::Validation,
            BillingError::NotFound { .. } => ErrorCategory::NotFound,
            BillingError::Store(_) => ErrorCategory::Storage,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            BillingError::Validation(_) => codes::validation::INVALID_INPUT,
            BillingError::NotFound { .. } => codes::store::NOT_FOUND,
            BillingError::Store(_) => codes::store::BACKEND_FAILURE,
        }
    }
}

/// Result type alias for billing operations
pub type BillingResult<T> = std::result::Result<T, BillingError>;
