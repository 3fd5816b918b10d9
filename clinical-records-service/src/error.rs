use entity_store::StoreError;
use error_common::{codes, CategorizedError, ErrorCategory};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ClinicalRecordsError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("appointment {appointment_id} already has a medical record")]
    DuplicateRecord { appointment_id: Uuid },

    #[error("cannot delete {entity} {id}: still referenced by {dependents}")]
    ReferencedEntity {
        entity: &'static str,
        id: String,
        dependents: &'static str,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ClinicalRecordsError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl CategorizedError for ClinicalRecordsError {
    fn category(&self) -> ErrorCategory {
        match self {
            ClinicalRecordsError::Validation(_) => ErrorCategory::Validation,
            ClinicalRecordsError::NotFound { .. } => ErrorCategory::NotFound,
            ClinicalRecordsError::DuplicateRecord { .. } => ErrorCategory::Duplicate,
            ClinicalRecordsError::ReferencedEntity { .. } => ErrorCategory::Referenced,
            ClinicalRecordsError::Store(_) => ErrorCategory::Storage,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ClinicalRecordsError::Validation(_) => codes::validation::INVALID_INPUT,
            ClinicalRecordsError::NotFound { .. } => codes::store::NOT_FOUND,
            ClinicalRecordsError::DuplicateRecord { .. } => codes::records::DUPLICATE_RECORD,
            ClinicalRecordsError::ReferencedEntity { .. } => codes::records::REFERENCED_ENTITY,
            ClinicalRecordsError::Store(_) => codes::store::BACKEND_FAILURE,
        }
    }
}

/// Result type alias for clinical record operations
pub type ClinicalRecordsResult<T> = std::result::Result<T, ClinicalRecordsError>;
