//! Common error handling utilities for the ClinicCore engine
//!
//! Every service crate defines its own `thiserror` enum; this crate holds
//! what those enums share: the error taxonomy (`ErrorCategory`), stable
//! error codes for API responses, and the `CategorizedError` trait that
//! lets a caller decide how to present a failure without matching on each
//! service's concrete error type.
//!
//! # Taxonomy
//!
//! - **Validation**: malformed or missing input, correctable by the caller
//! - **NotFound**: a referenced identifier does not resolve
//! - **Conflict**: a scheduling overlap was detected
//! - **InvalidTransition**: a state-machine violation
//! - **Duplicate**: a one-to-one invariant would be violated
//! - **Referenced**: a deletion is blocked by dependent entities
//! - **Storage**: the entity store failed
//! - **External**: a downstream collaborator (email, etc.) failed
//!
//! Only the first six are user-correctable; `Storage` and `External` are
//! presented as generic system errors and logged.

pub mod codes;
pub mod types;

pub use codes::*;
pub use types::*;
