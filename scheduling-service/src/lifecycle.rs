//! Appointment state machine.
//!
//! ```text
//! Scheduled -> Completed   (terminal)
//! Scheduled -> Cancelled   (terminal)
//! Scheduled -> NoShow      (terminal)
//! ```

use crate::error::{SchedulingError, SchedulingResult};
use entity_store::AppointmentStatus;
use tracing::warn;

/// All statuses reachable from `current` in one step.
pub fn valid_transitions(current: AppointmentStatus) -> &'static [AppointmentStatus] {
    match current {
        AppointmentStatus::Scheduled => &[
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NoShow,
        ],
        // Terminal states - no transitions allowed
        AppointmentStatus::Completed
        | AppointmentStatus::Cancelled
        | AppointmentStatus::NoShow => &[],
    }
}

/// Reject any step the state machine does not define.
pub fn validate_transition(
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> SchedulingResult<()> {
    if !valid_transitions(from).contains(&to) {
        warn!(?from, ?to, "invalid appointment status transition attempted");
        return Err(SchedulingError::InvalidTransition { from, to });
    }
    Ok(())
}
