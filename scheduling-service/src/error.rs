use entity_store::{AppointmentStatus, StoreError};
use error_common::{codes, CategorizedError, ErrorCategory};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("requested window overlaps an existing appointment for doctor {doctor_id}")]
    Conflict {
        doctor_id: Uuid,
        conflicting: Vec<Uuid>,
    },

    #[error("invalid status transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SchedulingError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl CategorizedError for SchedulingError {
    fn category(&self) -> ErrorCategory {
        match self {
            SchedulingError::Validation(_) => ErrorCategory::Validation,
            SchedulingError::NotFound { .. } => ErrorCategory::NotFound,
            SchedulingError::Conflict { .. } => ErrorCategory::Conflict,
            SchedulingError::InvalidTransition { .. } => ErrorCategory::InvalidTransition,
            SchedulingError::Store(_) => ErrorCategory::Storage,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            SchedulingError::Validation(_) => codes::validation::INVALID_INPUT,
            SchedulingError::NotFound { .. } => codes::store::NOT_FOUND,
            SchedulingError::Conflict { .. } => codes::scheduling::SLOT_CONFLICT,
            SchedulingError::InvalidTransition { .. } => codes::scheduling::INVALID_TRANSITION,
            SchedulingError::Store(_) => codes::store::BACKEND_FAILURE,
        }
    }
}

/// Result type alias for scheduling operations
pub type SchedulingResult<T> = std::result::Result<T, SchedulingError>;
