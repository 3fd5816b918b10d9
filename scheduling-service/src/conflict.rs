use crate::error::SchedulingResult;
use chrono::{DateTime, Utc};
use entity_store::{Appointment, AppointmentRepository};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Two half-open windows overlap iff each starts before the other ends.
///
/// Back-to-back windows (`end1 == start2`) do not overlap; identical
/// starts always do.
pub fn windows_overlap(
    start1: DateTime<Utc>,
    end1: DateTime<Utc>,
    start2: DateTime<Utc>,
    end2: DateTime<Utc>,
) -> bool {
    start1 < end2 && start2 < end1
}

/// Reads a doctor's schedule and reports overlapping appointments.
///
/// Holds no cache — every check re-reads current state, so correctness
/// only depends on the caller serializing checks per doctor.
pub struct ConflictDetector {
    appointments: Arc<dyn AppointmentRepository>,
}

impl ConflictDetector {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    /// All `Scheduled` appointments of `doctor_id` intersecting
    /// `[start, end)`, excluding at most one appointment id (the one
    /// being updated, which must not conflict with itself).
    pub async fn find_conflicts(
        &self,
        doctor_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> SchedulingResult<Vec<Appointment>> {
        debug!(%doctor_id, %start, %end, "checking schedule for conflicts");

        let conflicting = self
            .appointments
            .find_scheduled_in_window(doctor_id, start, end, exclude)
            .await?;

        if !conflicting.is_empty() {
            warn!(
                %doctor_id,
                count = conflicting.len(),
                "conflict detected in requested window"
            );
        }

        Ok(conflicting)
    }
}
