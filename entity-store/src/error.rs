use thiserror::Error;

/// Storage failures.
///
/// A missing row is not an error — finders return `Ok(None)` and the
/// calling service decides whether that is a `NotFound` for its caller.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Result type alias for entity store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
