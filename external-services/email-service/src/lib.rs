//! SMTP-backed notification sink for the ClinicCore engine
//!
//! Implements the scheduling core's `NotificationSink` port: booking
//! confirmations and cancellation notices as plain-text emails over
//! SMTP (Stalwart `mail-send`/`mail-builder`). Configuration comes from
//! the environment; with `EMAIL_ENABLED=false` every send short-circuits
//! to a generated message id so development never needs a mail server.
//!
//! Failures surface as [`EmailError`] to the adapter, where the
//! scheduling core logs and swallows them — a broken mail relay must
//! never fail a booking.

pub mod error;
pub mod service;
pub mod sink;

pub use error::*;
pub use service::*;
pub use sink::*;
