//! Billing for the ClinicCore engine
//!
//! Bills aggregate typed line items; a bill's total is always the sum
//! of its items' line totals, computed at read time and never stored
//! where it could drift. Medicine charges can be generated from a
//! prescription's detail lines, priced from the snapshot each line took
//! at creation — billing history is immutable once written, whatever
//! happens to the prescription or the medicine price later.

pub mod error;
pub mod models;
pub mod reporting;
pub mod service;

pub use error::*;
pub use models::*;
pub use reporting::*;
pub use service::*;
