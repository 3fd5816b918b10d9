use crate::config::SchedulingConfig;
use crate::conflict::ConflictDetector;
use crate::error::{SchedulingError, SchedulingResult};
use crate::lifecycle;
use crate::locks::DoctorScheduleLocks;
use crate::models::BookingRequest;
use crate::notify::{BookingNotice, CancellationNotice, NotificationSink};
use chrono::{DateTime, Duration, Timelike, Utc};
use entity_store::{
    Appointment, AppointmentRepository, AppointmentStatus, Clock, Doctor, DoctorRepository,
    IdSource, Patient, PatientRepository,
};
use logger_redacted::redact_email;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Substituted when a cancellation arrives with no usable reason.
pub const DEFAULT_CANCELLATION_REASON: &str = "Cancelled by the clinic";

/// The only sanctioned mutation path for appointments.
pub struct SchedulingService {
    appointments: Arc<dyn AppointmentRepository>,
    patients: Arc<dyn PatientRepository>,
    doctors: Arc<dyn DoctorRepository>,
    notifier: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
    config: SchedulingConfig,
    conflicts: ConflictDetector,
    schedule_locks: DoctorScheduleLocks,
}

impl SchedulingService {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        patients: Arc<dyn PatientRepository>,
        doctors: Arc<dyn DoctorRepository>,
        notifier: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdSource>,
        config: SchedulingConfig,
    ) -> Self {
        let conflicts = ConflictDetector::new(Arc::clone(&appointments));
        Self {
            appointments,
            patients,
            doctors,
            notifier,
            clock,
            ids,
            config,
            conflicts,
            schedule_locks: DoctorScheduleLocks::new(),
        }
    }

    /// Book a new appointment.
    ///
    /// Conflict read and insert happen under the doctor's lock. The
    /// confirmation email is dispatched after commit and cannot fail
    /// the booking.
    pub async fn book(&self, request: BookingRequest) -> SchedulingResult<Appointment> {
        self.validate_request(&request)?;
        let patient = self.load_patient(request.patient_id).await?;
        let doctor = self.load_doctor(request.doctor_id).await?;

        let now = self.clock.now();
        self.validate_window(&request, now)?;

        let end = request.start_time + Duration::minutes(request.duration_minutes);
        let _guard = self.schedule_locks.acquire(request.doctor_id).await;

        let conflicting = self
            .conflicts
            .find_conflicts(request.doctor_id, request.start_time, end, None)
            .await?;
        if !conflicting.is_empty() {
            return Err(SchedulingError::Conflict {
                doctor_id: request.doctor_id,
                conflicting: conflicting.iter().map(|appointment| appointment.id).collect(),
            });
        }

        let appointment = Appointment {
            id: self.ids.new_id(),
            patient_id: request.patient_id,
            doctor_id: request.doctor_id,
            start_time: request.start_time,
            duration_minutes: request.duration_minutes,
            reason: request.reason.trim().to_string(),
            appointment_type: request.appointment_type,
            status: AppointmentStatus::Scheduled,
            created_at: now,
            updated_at: now,
        };
        let saved = self.appointments.save(&appointment).await?;
        info!(appointment_id = %saved.id, doctor_id = %saved.doctor_id, "appointment booked");

        self.send_booking_notice(&patient, &doctor, &saved).await;
        Ok(saved)
    }

    /// Move an existing appointment to a new window or change its details.
    ///
    /// Only `Scheduled` appointments can be rescheduled; the appointment
    /// under update is excluded from its own conflict set.
    pub async fn reschedule(
        &self,
        appointment_id: Uuid,
        request: BookingRequest,
    ) -> SchedulingResult<Appointment> {
        self.validate_request(&request)?;
        let mut appointment = self.load_appointment(appointment_id).await?;
        if appointment.status != AppointmentStatus::Scheduled {
            return Err(SchedulingError::InvalidTransition {
                from: appointment.status,
                to: AppointmentStatus::Scheduled,
            });
        }

        self.load_patient(request.patient_id).await?;
        self.load_doctor(request.doctor_id).await?;

        let now = self.clock.now();
        self.validate_window(&request, now)?;

        let end = request.start_time + Duration::minutes(request.duration_minutes);
        let _guard = self.schedule_locks.acquire(request.doctor_id).await;

        let conflicting = self
            .conflicts
            .find_conflicts(request.doctor_id, request.start_time, end, Some(appointment_id))
            .await?;
        if !conflicting.is_empty() {
            return Err(SchedulingError::Conflict {
                doctor_id: request.doctor_id,
                conflicting: conflicting.iter().map(|existing| existing.id).collect(),
            });
        }

        appointment.patient_id = request.patient_id;
        appointment.doctor_id = request.doctor_id;
        appointment.start_time = request.start_time;
        appointment.duration_minutes = request.duration_minutes;
        appointment.reason = request.reason.trim().to_string();
        appointment.appointment_type = request.appointment_type;
        appointment.updated_at = now;

        let saved = self.appointments.save(&appointment).await?;
        info!(appointment_id = %saved.id, "appointment rescheduled");
        Ok(saved)
    }

    /// Cancel a scheduled appointment and notify the patient.
    pub async fn cancel(
        &self,
        appointment_id: Uuid,
        reason: Option<&str>,
    ) -> SchedulingResult<Appointment> {
        let saved = self
            .transition(appointment_id, AppointmentStatus::Cancelled)
            .await?;

        let reason = match reason.map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => DEFAULT_CANCELLATION_REASON.to_string(),
        };
        self.send_cancellation_notice(&saved, reason).await;
        Ok(saved)
    }

    /// Close a visit normally. Does not create the medical record — the
    /// clinical record linker does that on its own call.
    pub async fn mark_completed(&self, appointment_id: Uuid) -> SchedulingResult<Appointment> {
        self.transition(appointment_id, AppointmentStatus::Completed)
            .await
    }

    /// Operator marks the patient as absent.
    pub async fn mark_no_show(&self, appointment_id: Uuid) -> SchedulingResult<Appointment> {
        self.transition(appointment_id, AppointmentStatus::NoShow)
            .await
    }

    /// Remove an appointment outright.
    ///
    /// Allowed while `Scheduled`; `force` is the administrative
    /// override for terminal states. A medical record created from the
    /// appointment is never touched.
    pub async fn delete(&self, appointment_id: Uuid, force: bool) -> SchedulingResult<()> {
        let appointment = self.load_appointment(appointment_id).await?;
        if appointment.status != AppointmentStatus::Scheduled && !force {
            return Err(SchedulingError::Validation(format!(
                "appointment in status {:?} can only be deleted with an administrative override",
                appointment.status
            )));
        }
        self.appointments.delete(appointment_id).await?;
        info!(%appointment_id, force, "appointment deleted");
        Ok(())
    }

    pub async fn appointment(&self, appointment_id: Uuid) -> SchedulingResult<Appointment> {
        self.load_appointment(appointment_id).await
    }

    async fn transition(
        &self,
        appointment_id: Uuid,
        to: AppointmentStatus,
    ) -> SchedulingResult<Appointment> {
        let mut appointment = self.load_appointment(appointment_id).await?;
        lifecycle::validate_transition(appointment.status, to)?;

        appointment.status = to;
        appointment.updated_at = self.clock.now();
        let saved = self.appointments.save(&appointment).await?;
        info!(appointment_id = %saved.id, status = ?saved.status, "appointment status changed");
        Ok(saved)
    }

    fn validate_request(&self, request: &BookingRequest) -> SchedulingResult<()> {
        if request.reason.trim().is_empty() {
            return Err(SchedulingError::Validation(
                "appointment reason must not be blank".to_string(),
            ));
        }
        if request.duration_minutes < self.config.min_duration_minutes
            || request.duration_minutes > self.config.max_duration_minutes
        {
            return Err(SchedulingError::Validation(format!(
                "appointment duration must be between {} and {} minutes",
                self.config.min_duration_minutes, self.config.max_duration_minutes
            )));
        }
        Ok(())
    }

    fn validate_window(
        &self,
        request: &BookingRequest,
        now: DateTime<Utc>,
    ) -> SchedulingResult<()> {
        if request.start_time <= now {
            return Err(SchedulingError::Validation(
                "appointment start must be in the future".to_string(),
            ));
        }

        let end = request.start_time + Duration::minutes(request.duration_minutes);
        if !self.within_business_hours(request.start_time, end) {
            return Err(SchedulingError::Validation(format!(
                "appointment must fall within business hours ({:02}:00-{:02}:00 UTC)",
                self.config.business_hours_start, self.config.business_hours_end
            )));
        }
        Ok(())
    }

    fn within_business_hours(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        if start.date_naive() != end.date_naive() {
            // Overnight appointments are out, whatever the hours say.
            return false;
        }
        let closes_minute = self.config.business_hours_end * 60;
        let end_minute = end.hour() * 60 + end.minute();
        start.hour() >= self.config.business_hours_start && end_minute <= closes_minute
    }

    async fn load_patient(&self, patient_id: Uuid) -> SchedulingResult<Patient> {
        self.patients
            .find_by_id(patient_id)
            .await?
            .ok_or_else(|| SchedulingError::not_found("patient", patient_id))
    }

    async fn load_doctor(&self, doctor_id: Uuid) -> SchedulingResult<Doctor> {
        self.doctors
            .find_by_id(doctor_id)
            .await?
            .ok_or_else(|| SchedulingError::not_found("doctor", doctor_id))
    }

    async fn load_appointment(&self, appointment_id: Uuid) -> SchedulingResult<Appointment> {
        self.appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or_else(|| SchedulingError::not_found("appointment", appointment_id))
    }

    async fn send_booking_notice(
        &self,
        patient: &Patient,
        doctor: &Doctor,
        appointment: &Appointment,
    ) {
        let notice = BookingNotice {
            patient_name: patient.full_name(),
            patient_email: patient.email.clone(),
            doctor_name: doctor.full_name(),
            start_time: appointment.start_time,
            reason: appointment.reason.clone(),
        };
        if let Err(error) = self.notifier.notify_booking(&notice).await {
            let recipient = patient.email.as_deref().map(redact_email).unwrap_or_default();
            warn!(%recipient, %error, "booking confirmation failed; booking stands");
        } else {
            debug!(appointment_id = %appointment.id, "booking confirmation dispatched");
        }
    }

    async fn send_cancellation_notice(&self, appointment: &Appointment, reason: String) {
        // Contact details are re-read rather than cached; a failure here
        // only degrades the notice, never the cancellation.
        let patient = match self.patients.find_by_id(appointment.patient_id).await {
            Ok(Some(patient)) => patient,
            _ => {
                warn!(appointment_id = %appointment.id, "cancellation notice skipped: patient unavailable");
                return;
            }
        };
        let doctor = match self.doctors.find_by_id(appointment.doctor_id).await {
            Ok(Some(doctor)) => doctor,
            _ => {
                warn!(appointment_id = %appointment.id, "cancellation notice skipped: doctor unavailable");
                return;
            }
        };

        let notice = CancellationNotice {
            patient_name: patient.full_name(),
            patient_email: patient.email.clone(),
            doctor_name: doctor.full_name(),
            start_time: appointment.start_time,
            reason,
        };
        if let Err(error) = self.notifier.notify_cancellation(&notice).await {
            let recipient = patient.email.as_deref().map(redact_email).unwrap_or_default();
            warn!(%recipient, %error, "cancellation notice failed; cancellation stands");
        }
    }
}
