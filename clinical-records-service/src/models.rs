use chrono::{DateTime, NaiveDate, Utc};
use entity_store::DiagnosisStatus;
use serde::Deserialize;
use uuid::Uuid;

/// Request to open a medical record, with or without an appointment.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMedicalRecord {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    /// Absent for walk-ins.
    pub appointment_id: Option<Uuid>,
    /// Defaults to the current time when absent.
    pub record_date: Option<DateTime<Utc>>,
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDiagnosis {
    pub record_id: Uuid,
    pub disease_code: String,
    pub description: String,
    pub diagnosis_date: NaiveDate,
    pub status: DiagnosisStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPrescription {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    /// Weak link to the record being documented, if any.
    pub record_id: Option<Uuid>,
    pub notes: Option<String>,
    pub details: Vec<NewPrescriptionDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPrescriptionDetail {
    pub medicine_id: Uuid,
    pub quantity: u32,
    pub dosage: String,
    pub instructions: String,
}
