use chrono::{DateTime, Utc};
use entity_store::AppointmentType;
use serde::Deserialize;
use uuid::Uuid;

/// Booking or reschedule request as the service layer receives it.
///
/// The patient and doctor are explicit parameters on every call — there
/// is no ambient "current doctor" context.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i64,
    pub reason: String,
    pub appointment_type: AppointmentType,
}
