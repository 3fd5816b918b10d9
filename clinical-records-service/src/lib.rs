//! Clinical record linker for the ClinicCore engine
//!
//! Keeps the documentation chain — medical record, diagnoses,
//! prescription, and the references billing later relies on —
//! consistent while the UI creates, edits and deletes each piece
//! independently.
//!
//! Consistency rules owned here:
//!
//! - At most one medical record per appointment; walk-ins have none.
//! - Diagnoses are owned by their record: deleting the record removes
//!   them, and a disease cannot leave the catalog while a diagnosis
//!   references its code.
//! - A prescription is created whole or not at all, and each line
//!   snapshots the medicine's price at creation time.
//! - A medical record with dependent prescriptions cannot be deleted —
//!   callers reassign or remove the prescriptions first.

pub mod catalog;
pub mod error;
pub mod models;
pub mod prescriptions;
pub mod service;

pub use catalog::*;
pub use error::*;
pub use models::*;
pub use prescriptions::*;
pub use service::*;
