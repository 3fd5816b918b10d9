use serde::{Deserialize, Serialize};

/// Broad class of a service error, shared across the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed or missing input, local to the call
    Validation,
    /// Referenced identifier does not resolve
    NotFound,
    /// Scheduling overlap detected
    Conflict,
    /// State-machine violation
    InvalidTransition,
    /// One-to-one invariant violated
    Duplicate,
    /// Deletion blocked by dependents
    Referenced,
    /// Entity store failure
    Storage,
    /// Downstream collaborator failure
    External,
}

impl ErrorCategory {
    /// Whether the caller can fix the request and retry.
    ///
    /// Storage and external failures are system errors; retrying the same
    /// request does not help and the UI should show a generic message.
    pub fn user_correctable(self) -> bool {
        !matches!(self, ErrorCategory::Storage | ErrorCategory::External)
    }
}

/// Implemented by every service error enum so callers can route
/// presentation and logging without matching concrete variants.
pub trait CategorizedError: std::error::Error {
    fn category(&self) -> ErrorCategory;

    /// Stable machine-readable code for API responses, see [`crate::codes`].
    fn code(&self) -> &'static str;

    fn user_correctable(&self) -> bool {
        self.category().user_correctable()
    }
}
