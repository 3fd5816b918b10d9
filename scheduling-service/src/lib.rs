//! Appointment scheduling core for the ClinicCore engine
//!
//! Admits or rejects booking, reschedule, cancellation and closure
//! requests against a doctor's existing schedule. The invariants this
//! crate owns:
//!
//! - For one doctor, no two `Scheduled` appointments overlap. The
//!   conflict read and the write happen under a per-doctor lock, so
//!   concurrent requests for the same doctor serialize and at most one
//!   of two overlapping bookings succeeds.
//! - A booking starts strictly in the future and inside business hours.
//! - The appointment state machine is `Scheduled -> {Completed,
//!   Cancelled, NoShow}`, all three terminal.
//!
//! Booking confirmations and cancellation notices go to a
//! [`NotificationSink`]; sink failures are logged (addresses redacted)
//! and never fail the operation that triggered them.
//!
//! This crate is the only sanctioned mutation path for appointments —
//! nothing else writes them.

pub mod config;
pub mod conflict;
pub mod error;
pub mod lifecycle;
pub mod locks;
pub mod models;
pub mod notify;
pub mod service;

pub use config::*;
pub use conflict::*;
pub use error::*;
pub use models::*;
pub use notify::*;
pub use service::*;
