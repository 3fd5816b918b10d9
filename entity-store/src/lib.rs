//! Domain model and entity storage abstraction for the ClinicCore engine
//!
//! This crate is the single place the clinic's aggregates are defined:
//! patients, doctors, appointments, medical records, diagnoses,
//! prescriptions, medicines, bills and user accounts. Services never
//! reach past these types into a persistence context — every fetch is an
//! explicit call through a repository trait, and every relationship is a
//! plain foreign-key field on the aggregate.
//!
//! # Key pieces
//!
//! - **Models**: serde-derived aggregates with their invariant helpers
//!   (`Appointment::overlaps`, `Bill::total_amount`, ...)
//! - **Repositories**: `#[async_trait]` interfaces, one per aggregate
//! - **In-memory store**: `DashMap`-backed reference implementation for
//!   development and tests
//! - **Collaborators**: `Clock` and `IdSource` so time and identifiers
//!   are injected, never ambient

pub mod clock;
pub mod error;
pub mod memory;
pub mod models;
pub mod repository;

pub use clock::*;
pub use error::*;
pub use memory::*;
pub use models::*;
pub use repository::*;
